use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;

use crate::linalg::{francis, hqr2, LinalgError};
use crate::traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Reduce a square matrix to upper Hessenberg form by stabilised elementary
/// similarity transforms (Gaussian elimination with partial pivoting).
///
/// On return:
/// - `a` holds H on and above the first sub-diagonal, and the elimination
///   multipliers below it
/// - `perm[m]` is the 1-indexed row swapped into position `m + 1` at step `m`,
///   for `m` in `1..n-1`; the first and last entries stay 0
///
/// Each row interchange is paired with the matching column interchange, and
/// each row elimination with the inverse column update, so eigenvalues are
/// preserved. The transform itself is recovered with [`eltran`].
pub fn hessenberg_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>, perm: &mut [usize]) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    perm.fill(0);

    for m in 1..n.saturating_sub(1) {
        let mut x = T::zero();
        let mut pivot = m;
        for j in m..n {
            if a.get(j, m - 1).modulus() > x.modulus() {
                x = *a.get(j, m - 1);
                pivot = j;
            }
        }
        perm[m] = pivot + 1;

        if pivot != m {
            for j in m - 1..n {
                a.swap_elements((pivot, j), (m, j));
            }
            for j in 0..n {
                a.swap_elements((j, pivot), (j, m));
            }
        }

        if x == T::zero() {
            continue;
        }
        for i in m + 1..n {
            let mut y = *a.get(i, m - 1);
            if y == T::zero() {
                continue;
            }
            y = y / x;
            *a.get_mut(i, m - 1) = y;
            for j in m..n {
                let v = *a.get(i, j) - y * *a.get(m, j);
                *a.get_mut(i, j) = v;
            }
            for j in 0..n {
                let v = *a.get(j, m) + y * *a.get(j, i);
                *a.get_mut(j, m) = v;
            }
        }
    }
}

/// Accumulate the transform of [`hessenberg_in_place`].
///
/// `a` must still hold the multipliers below its sub-diagonal. Returns the
/// matrix `Z` with `A Z = Z H` for the original `A`.
pub fn eltran<T: LinalgScalar>(a: &impl MatrixRef<T>, perm: &[usize]) -> Matrix<T> {
    let n = a.nrows();
    let mut z = Matrix::identity(n);
    if z.is_null() {
        return z;
    }
    for mp in (1..n.saturating_sub(1)).rev() {
        for k in mp + 1..n {
            *z.get_mut(k, mp) = *a.get(k, mp - 1);
        }
        let i = perm[mp].wrapping_sub(1);
        if i != mp && i < n {
            for j in mp..n {
                *z.get_mut(mp, j) = *z.get(i, j);
                *z.get_mut(i, j) = T::zero();
            }
            *z.get_mut(i, mp) = T::one();
        }
    }
    z
}

/// Upper Hessenberg form of a square matrix, from
/// [`Matrix::hessenberg_form`].
///
/// ```
/// use corematrix::Matrix;
///
/// let a = Matrix::from_row_major(3, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
/// let h = a.hessenberg_form(true).unwrap();
/// assert_eq!(h.matrix()[(3, 1)], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Hessenberg<T> {
    h: Matrix<T>,
    perm: Vec<usize>,
    /// Multipliers cleared from below the sub-diagonal, column by column.
    /// Empty unless the form was reduced with `zero_lower`.
    multipliers: Vec<T>,
}

impl<T: LinalgScalar> Hessenberg<T> {
    pub(crate) fn reduce(a: &Matrix<T>, zero_lower: bool) -> Result<Self, LinalgError> {
        super::require_square(a)?;
        if !T::IS_REAL {
            return Err(LinalgError::NotReal);
        }
        let n = a.nrows();
        let mut h = a.clone();
        let mut perm = vec![0; n];
        hessenberg_in_place(&mut h, &mut perm);
        let multipliers = if zero_lower {
            let lower = below_subdiagonal(&h).map(|(i, j)| *h.get(i, j)).collect();
            clear_below_subdiagonal(&mut h);
            lower
        } else {
            Vec::new()
        };
        Ok(Self { h, perm, multipliers })
    }

    /// The transform `Z` with `A Z = Z H`.
    pub fn accumulate(&self) -> Matrix<T> {
        if self.multipliers.is_empty() {
            return eltran(&self.h, &self.perm);
        }
        let mut raw = self.h.clone();
        for ((i, j), &y) in below_subdiagonal(&self.h).zip(&self.multipliers) {
            *raw.get_mut(i, j) = y;
        }
        eltran(&raw, &self.perm)
    }
}

impl<T: FloatScalar> Hessenberg<T> {
    /// Eigenvalues of H, hence of the original matrix, in deflation order.
    pub fn eigenvalues(&self) -> Result<Vec<Complex<T>>, LinalgError> {
        let mut h = self.h.clone();
        clear_below_subdiagonal(&mut h);
        francis::hqr(&mut h)
    }

    /// Eigenvalues and eigenvectors of the original matrix, unsorted.
    pub(crate) fn into_eigenpairs(self) -> Result<(Vec<Complex<T>>, Matrix<T>), LinalgError> {
        let mut z = self.accumulate();
        if z.is_null() {
            return Err(LinalgError::AllocationFailed);
        }
        let mut h = self.h;
        clear_below_subdiagonal(&mut h);
        let values = hqr2(&mut h, &mut z)?;
        Ok((values, z))
    }
}

impl<T> Hessenberg<T> {
    /// The reduced matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix<T> {
        &self.h
    }

    /// Row interchanges, 1-indexed; 0 where no step ran.
    #[inline]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    #[inline]
    pub fn into_parts(self) -> (Matrix<T>, Vec<usize>) {
        (self.h, self.perm)
    }
}

/// 0-based positions strictly below the first sub-diagonal, column by column.
fn below_subdiagonal<T>(h: &Matrix<T>) -> impl Iterator<Item = (usize, usize)> {
    let n = h.nrows();
    (0..n.saturating_sub(2)).flat_map(move |j| (j + 2..n).map(move |i| (i, j)))
}

fn clear_below_subdiagonal<T: LinalgScalar>(h: &mut Matrix<T>) {
    let cells: Vec<_> = below_subdiagonal(h).collect();
    for (i, j) in cells {
        *h.get_mut(i, j) = T::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<f64> {
        Matrix::from_row_major(
            4,
            4,
            &[
                1.0, 2.0, 3.0, 4.0, //
                2.0, 1.0, 0.0, 3.0, //
                4.0, 3.0, 2.0, 1.0, //
                1.0, 0.0, 5.0, 2.0,
            ],
        )
    }

    #[test]
    fn reduction_is_a_similarity() {
        let a = sample();
        let h = Hessenberg::reduce(&a, false).unwrap();
        let z = h.accumulate();
        let mut hm = h.matrix().clone();
        clear_below_subdiagonal(&mut hm);
        assert_eq!(&a * &z, &z * &hm);
    }

    #[test]
    fn pivots_largest_entry() {
        let h = Hessenberg::reduce(&sample(), false).unwrap();
        // Column 1 below the diagonal is (2, 4, 1): row 3 is swapped up.
        assert_eq!(h.perm()[0], 0);
        assert_eq!(h.perm()[1], 3);
        assert_eq!(h.perm()[3], 0);
    }

    #[test]
    fn zero_lower_clears_band() {
        let h = Hessenberg::reduce(&sample(), true).unwrap();
        let m = h.matrix();
        for j in 1..=2 {
            for i in j + 2..=4 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
        let raw = Hessenberg::reduce(&sample(), false).unwrap();
        assert_eq!(h.accumulate(), raw.accumulate());
    }

    #[test]
    fn trace_preserved() {
        let a = sample();
        let h = Hessenberg::reduce(&a, true).unwrap();
        assert!((h.matrix().trace() - a.trace()).abs() < 1e-12);
    }

    #[test]
    fn eigenvalues_of_reduced_form() {
        let a = Matrix::from_row_major(3, 3, &[2.0_f64, 0.0, 0.0, 1.0, 3.0, 0.0, 4.0, 5.0, 6.0]);
        let mut ev: Vec<f64> = Hessenberg::reduce(&a, false)
            .unwrap()
            .eigenvalues()
            .unwrap()
            .iter()
            .map(|c| c.re)
            .collect();
        ev.sort_by(f64::total_cmp);
        for (got, want) in ev.iter().zip([2.0, 3.0, 6.0]) {
            assert!((got - want).abs() < 1e-10);
        }
    }

    #[test]
    fn rejects_complex_and_rectangular() {
        let c = Matrix::<Complex<f64>>::identity(2);
        assert_eq!(Hessenberg::reduce(&c, false).unwrap_err(), LinalgError::NotReal);
        assert_eq!(
            Hessenberg::reduce(&Matrix::<f64>::zeros(2, 3), false).unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
        assert_eq!(
            Hessenberg::reduce(&Matrix::<f64>::null(), false).unwrap_err(),
            LinalgError::NullMatrix
        );
    }
}
