use alloc::vec;
use alloc::vec::Vec;

use num_traits::{One, Zero};

use crate::traits::{tol_eq, LinalgScalar, MatrixMut, MatrixRef, Scalar};
use crate::Matrix;

// ---------------------------------------------------------------------------
// Elementary row and column operations (0-based)
// ---------------------------------------------------------------------------

/// Swap rows `i` and `j`.
pub fn row_interchange<T: Copy>(a: &mut impl MatrixMut<T>, i: usize, j: usize) {
    if i == j {
        return;
    }
    for p in 0..a.ncols() {
        a.swap_elements((i, p), (j, p));
    }
}

/// `k * Ri -> Ri`.
pub fn row_scale<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T) {
    for p in 0..a.ncols() {
        let v = *a.get(i, p);
        *a.get_mut(i, p) = v * k;
    }
}

/// `k * Ri + Rj -> Rj`.
pub fn row_addition<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T, j: usize) {
    for p in 0..a.ncols() {
        let v = *a.get(i, p) * k + *a.get(j, p);
        *a.get_mut(j, p) = v;
    }
}

/// `k * Ri + k2 * Rj -> Rj`.
pub fn row_scale_add<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T, j: usize, k2: T) {
    for p in 0..a.ncols() {
        let v = *a.get(i, p) * k + *a.get(j, p) * k2;
        *a.get_mut(j, p) = v;
    }
}

/// Swap columns `i` and `j`.
pub fn col_interchange<T: Copy>(a: &mut impl MatrixMut<T>, i: usize, j: usize) {
    if i == j {
        return;
    }
    for p in 0..a.nrows() {
        a.swap_elements((p, i), (p, j));
    }
}

/// `k * Ci -> Ci`.
pub fn col_scale<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T) {
    for p in 0..a.nrows() {
        let v = *a.get(p, i);
        *a.get_mut(p, i) = v * k;
    }
}

/// `k * Ci + Cj -> Cj`.
pub fn col_addition<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T, j: usize) {
    for p in 0..a.nrows() {
        let v = *a.get(p, i) * k + *a.get(p, j);
        *a.get_mut(p, j) = v;
    }
}

/// `k * Ci + k2 * Cj -> Cj`.
pub fn col_scale_add<T: Scalar>(a: &mut impl MatrixMut<T>, i: usize, k: T, j: usize, k2: T) {
    for p in 0..a.nrows() {
        let v = *a.get(p, i) * k + *a.get(p, j) * k2;
        *a.get_mut(p, j) = v;
    }
}

// ---------------------------------------------------------------------------
// Implicit pivoting
// ---------------------------------------------------------------------------

/// Row normalisation coefficients for implicit pivoting.
///
/// Entry `i` is `1 / max_j |a(i, j)|`, or zero when that maximum is
/// tolerance-equal to zero (a degenerate row never wins a pivot search).
pub fn row_normalisation<T: LinalgScalar>(a: &impl MatrixRef<T>) -> Vec<T::Real> {
    (0..a.nrows())
        .map(|i| {
            let max = (0..a.ncols())
                .map(|j| a.get(i, j).modulus())
                .fold(T::Real::zero(), |acc, x| if x > acc { x } else { acc });
            if tol_eq(max, T::Real::zero()) {
                T::Real::zero()
            } else {
                T::Real::one() / max
            }
        })
        .collect()
}

/// First non-negligible entry of the submatrix starting at `(r1, j1)`,
/// scanning columns left to right. Within the column where it is found,
/// returns the row whose normalised magnitude `|a| * norm[row]` is largest.
fn find_pivot<T: LinalgScalar>(
    a: &impl MatrixRef<T>,
    norm: &[T::Real],
    r1: usize,
    j1: usize,
) -> Option<(usize, usize)> {
    let n = a.nrows();
    for j in j1..a.ncols() {
        let Some(first) = (r1..n).find(|&i| !tol_eq(*a.get(i, j), T::zero())) else {
            continue;
        };
        let mut best = first;
        let mut best_val = a.get(first, j).modulus() * norm[first];
        for i in first + 1..n {
            let v = a.get(i, j).modulus() * norm[i];
            if v > best_val {
                best_val = v;
                best = i;
            }
        }
        return Some((best, j));
    }
    None
}

// ---------------------------------------------------------------------------
// Echelon and row-canonical reduction
// ---------------------------------------------------------------------------

/// Forward elimination to echelon form with implicit scaled pivoting.
///
/// Returns one pivot entry per row: the 1-indexed pivot column, or 0 for rows
/// that end up with no pivot. Unpivoted rows are not moved; they are the
/// trailing rows because pivots are assigned top-down. The normalisation
/// coefficients are computed once up front and only swapped with their rows.
pub fn echelon_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>) -> Vec<usize> {
    let (n, m) = (a.nrows(), a.ncols());
    let mut norm = row_normalisation(a);
    let mut pivots = vec![0; n];
    let (mut r1, mut j1) = (0, 0);

    while let Some((i, j)) = find_pivot(a, &norm, r1, j1) {
        if r1 + 1 < n {
            if i != r1 {
                row_interchange(a, r1, i);
                norm.swap(i, r1);
            }
            let inv = T::one() / *a.get(r1, j);
            for i in r1 + 1..n {
                let c = *a.get(i, j) * inv;
                *a.get_mut(i, j) = T::zero();
                for p in j + 1..m {
                    let v = *a.get(i, p) - *a.get(r1, p) * c;
                    *a.get_mut(i, p) = v;
                }
            }
        }
        pivots[r1] = j + 1;
        r1 += 1;
        j1 = j + 1;
    }
    pivots
}

/// Back elimination from echelon form to reduced row-echelon form.
///
/// `pivots` must be the vector [`echelon_in_place`] returned for this same
/// matrix. Working bottom-up, each pivot row is scaled so its pivot is one,
/// then its pivot column is cleared in every row above.
pub fn row_canonical_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>, pivots: &[usize]) {
    let m = a.ncols();
    for r in (0..a.nrows()).rev() {
        let Some(j) = pivots.get(r).and_then(|&p| p.checked_sub(1)) else {
            continue;
        };
        let c = T::one() / *a.get(r, j);
        *a.get_mut(r, j) = T::one();
        for p in j + 1..m {
            let v = *a.get(r, p) * c;
            *a.get_mut(r, p) = v;
        }

        for i in (0..r).rev() {
            let c = -*a.get(i, j);
            let start = pivots[i].saturating_sub(1);
            for p in start..m {
                if p == j {
                    *a.get_mut(i, p) = T::zero();
                } else {
                    let v = *a.get(r, p) * c + *a.get(i, p);
                    *a.get_mut(i, p) = v;
                }
            }
        }
    }
}

/// A matrix reduced to echelon form, together with its pivot columns.
///
/// Produced by [`Matrix::into_echelon`], which consumes its input: the
/// reduction is destructive, so it only ever runs on a matrix the caller has
/// handed over. Row-canonical reduction is only reachable from here, which
/// guarantees it always sees a matrix in echelon form.
///
/// ```
/// use corematrix::Matrix;
///
/// let a = Matrix::from_row_major(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
/// let e = a.into_echelon();
/// assert_eq!(e.pivots(), &[1, 2]);
/// assert_eq!(e.rank(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Echelon<T> {
    matrix: Matrix<T>,
    pivots: Vec<usize>,
}

impl<T: LinalgScalar> Echelon<T> {
    pub(crate) fn reduce(mut matrix: Matrix<T>) -> Self {
        let pivots = if matrix.is_null() {
            Vec::new()
        } else {
            echelon_in_place(&mut matrix)
        };
        Self { matrix, pivots }
    }

    /// Continue to reduced row-echelon form.
    pub fn into_row_canonical(mut self) -> Matrix<T> {
        row_canonical_in_place(&mut self.matrix, &self.pivots);
        self.matrix
    }

    /// Continue to reduced row-echelon form, keeping the pivot list.
    pub fn into_row_canonical_parts(mut self) -> (Matrix<T>, Vec<usize>) {
        row_canonical_in_place(&mut self.matrix, &self.pivots);
        (self.matrix, self.pivots)
    }
}

impl<T> Echelon<T> {
    /// Pivot column (1-indexed) of each row, 0 where a row has none.
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of pivots.
    pub fn rank(&self) -> usize {
        self.pivots.iter().filter(|&&p| p > 0).count()
    }

    /// The echelon-form matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    #[inline]
    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    #[inline]
    pub fn into_parts(self) -> (Matrix<T>, Vec<usize>) {
        (self.matrix, self.pivots)
    }
}
