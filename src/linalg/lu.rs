use alloc::vec::Vec;

use crate::linalg::elementary::{row_interchange, row_normalisation};
use crate::linalg::LinalgError;
use crate::traits::{tol_gt, LinalgScalar, MatrixMut, MatrixRef};
use crate::{identity_permutation, Matrix};

/// Doolittle LUP decomposition with implicit pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm` must hold the permutation to update, normally
/// [`identity_permutation`]. Its entries are swapped along with the rows.
/// Pivot candidates are compared after scaling by the row normalisation
/// coefficients, and a candidate must exceed the current best by more than
/// the scalar precision. Returns `true` if the number of row swaps was even.
///
/// A column with no usable pivot is `Err(Singular)`; `a` is then left
/// partially reduced.
pub fn lup_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LUP decomposition requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    let mut norm = row_normalisation(a);
    let mut even = true;

    for j in 0..n {
        // U entries strictly above the diagonal. Row 0 of U is row 0 of A.
        for i in 1..j {
            let mut sum = *a.get(i, j);
            for k in 0..i {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
        }

        // Candidates on and below the diagonal, before division by the pivot.
        let mut pivot_row = None;
        let mut max = <T::Real as num_traits::Zero>::zero();
        for i in j..n {
            let mut p = *a.get(i, j);
            for k in 0..j {
                p = p - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = p;

            let scaled = p.modulus() * norm[i];
            if tol_gt(scaled, max) {
                max = scaled;
                pivot_row = Some(i);
            }
        }

        match pivot_row {
            Some(p) if p != j => {
                row_interchange(a, j, p);
                perm.swap(j, p);
                norm.swap(j, p);
                even = !even;
            }
            Some(_) => {}
            None => {
                log::debug!("no pivot in column {} of {n}x{n} LUP decomposition", j + 1);
                return Err(LinalgError::Singular);
            }
        }

        if j + 1 < n {
            let d = T::one() / *a.get(j, j);
            for i in j + 1..n {
                let v = *a.get(i, j) * d;
                *a.get_mut(i, j) = v;
            }
        }
    }

    Ok(even)
}

/// Solve `A X = B` from a packed LUP decomposition of `A`.
///
/// `d` is the packed L\U matrix and `perm` the 1-indexed permutation from
/// [`lup_in_place`]. Each column of `b` is solved independently: permute,
/// forward-substitute against unit-lower L, then back-substitute against U.
/// Returns null if the shapes are incompatible.
pub fn lup_solve<T: LinalgScalar>(d: &Matrix<T>, perm: &[usize], b: &Matrix<T>) -> Matrix<T> {
    let n = d.nrows();
    if !d.is_square() || perm.len() != n || b.nrows() != n || perm.iter().any(|&p| p == 0 || p > n) {
        return Matrix::null();
    }

    let mut x = Matrix::zeros(n, b.ncols());
    if x.is_null() {
        return x;
    }
    for c in 0..b.ncols() {
        for (i, &p) in perm.iter().enumerate() {
            *x.get_mut(i, c) = *b.get(p - 1, c);
        }

        for i in 0..n {
            let mut s = *x.get(i, c);
            for k in 0..i {
                s = s - *d.get(i, k) * *x.get(k, c);
            }
            *x.get_mut(i, c) = s;
        }

        for i in (0..n).rev() {
            let mut s = *x.get(i, c);
            for k in i + 1..n {
                s = s - *d.get(i, k) * *x.get(k, c);
            }
            *x.get_mut(i, c) = s / *d.get(i, i);
        }
    }
    x
}

/// LUP decomposition of a square matrix: `P A = L U`.
///
/// Stores the packed L/U factors, the 1-indexed permutation vector and the
/// swap parity. Use `solve()`, `det()` or `unpack()` to work with it.
///
/// # Example
///
/// ```
/// use corematrix::Matrix;
///
/// let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lup_decomp().unwrap();
///
/// let x = lu.solve(&Matrix::column_vector(&[4.0, 11.0]));
/// assert!((x[(1, 1)] - 1.0).abs() < 1e-12);
/// assert!((x[(2, 1)] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LupDecomposition<T> {
    lu: Matrix<T>,
    perm: Vec<usize>,
    even: bool,
}

/// Separate factors of an LUP decomposition.
#[derive(Debug, Clone)]
pub struct LupFactors<T> {
    /// Unit lower-triangular factor.
    pub l: Matrix<T>,
    /// Upper-triangular factor.
    pub u: Matrix<T>,
    /// Permutation matrix, `P A = L U`.
    pub p: Matrix<T>,
}

impl<T: LinalgScalar> LupDecomposition<T> {
    /// Decompose a square matrix.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        super::require_square(a)?;
        let mut lu = a.clone();
        let mut perm = identity_permutation(a.nrows());
        let even = lup_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Solve `A X = B`; `b` may have several columns.
    pub fn solve(&self, b: &Matrix<T>) -> Matrix<T> {
        lup_solve(&self.lu, &self.perm, b)
    }

    /// Determinant: swap parity times the product of U's diagonal.
    pub fn det(&self) -> T {
        let mut d = if self.even { T::one() } else { -T::one() };
        for i in 0..self.lu.nrows() {
            d = d * *self.lu.get(i, i);
        }
        d
    }

    /// Split into unit-lower L, upper U and the permutation matrix P.
    pub fn unpack(&self) -> LupFactors<T> {
        let n = self.lu.nrows();
        let l = Matrix::from_fn(n, n, |i, j| match i.cmp(&j) {
            core::cmp::Ordering::Greater => *self.lu.get(i, j),
            core::cmp::Ordering::Equal => T::one(),
            core::cmp::Ordering::Less => T::zero(),
        });
        let u = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                *self.lu.get(i, j)
            } else {
                T::zero()
            }
        });
        LupFactors {
            l,
            u,
            p: Matrix::permutation_matrix(&self.perm),
        }
    }
}

impl<T> LupDecomposition<T> {
    /// Packed L\U matrix.
    #[inline]
    pub fn lu(&self) -> &Matrix<T> {
        &self.lu
    }

    /// Row permutation, 1-indexed: row `i` of `L U` is row `perm[i]` of `A`.
    #[inline]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// `1` for an even number of row swaps, `-1` for odd.
    #[inline]
    pub fn parity(&self) -> i8 {
        if self.even {
            1
        } else {
            -1
        }
    }

    #[inline]
    pub fn into_parts(self) -> (Matrix<T>, Vec<usize>) {
        (self.lu, self.perm)
    }
}
