use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixMut};
use crate::Matrix;

/// Cholesky–Crout decomposition in place: A = L * L^T.
///
/// Computed column by column from the lower triangle of `a`. On return `a`
/// holds L, with zeros above the diagonal. Returns an error as soon as a
/// diagonal term `a(j, j) - sum_k L(j, k)^2` is not strictly positive; `a`
/// is then left partially overwritten.
///
/// Only meaningful for real scalars: the products are not conjugated.
pub fn cholesky_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>) -> Result<(), LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "Cholesky decomposition requires a square matrix");

    for j in 0..n {
        let mut ljj = *a.get(j, j);
        for k in 0..j {
            let v = *a.get(j, k);
            ljj = ljj - v * v;
        }
        if ljj.re() <= <T::Real as num_traits::Zero>::zero() {
            log::debug!("non-positive Cholesky pivot in column {} of {n}", j + 1);
            return Err(LinalgError::NotPositiveDefinite);
        }

        let ljj = ljj.lsqrt();
        *a.get_mut(j, j) = ljj;
        for i in 0..j {
            *a.get_mut(i, j) = T::zero();
        }
        for i in j + 1..n {
            let mut sum = *a.get(i, j);
            for k in 0..j {
                sum = sum - *a.get(i, k) * *a.get(j, k);
            }
            *a.get_mut(i, j) = sum / ljj;
        }
    }

    Ok(())
}

/// Validate and factor, returning L.
pub(crate) fn cholesky<T: LinalgScalar>(a: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    if a.is_null() {
        return Err(LinalgError::NullMatrix);
    }
    if !T::IS_REAL {
        return Err(LinalgError::NotReal);
    }
    super::require_square(a)?;
    if !a.is_symmetric() {
        return Err(LinalgError::NotSymmetric);
    }
    let mut l = a.clone();
    cholesky_in_place(&mut l)?;
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn factor_3x3() {
        let a = Matrix::from_row_major(3, 3, &[4.0_f64, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0]);
        let l = cholesky(&a).unwrap();
        let expected = Matrix::from_row_major(3, 3, &[2.0, 0.0, 0.0, 6.0, 1.0, 0.0, -8.0, 5.0, 3.0]);
        assert_eq!(l, expected);
        assert_eq!(&l * &l.transpose(), a);
    }

    #[test]
    fn upper_triangle_is_zeroed() {
        let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
        let l = cholesky(&a).unwrap();
        assert_eq!(l[(1, 2)], 0.0);
    }

    #[test]
    fn not_positive_definite() {
        let a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
        assert_eq!(cholesky(&a).unwrap_err(), LinalgError::NotPositiveDefinite);
        let z = Matrix::<f64>::zeros(2, 2);
        assert_eq!(cholesky(&z).unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    #[test]
    fn validation_errors_are_distinct() {
        assert_eq!(cholesky(&Matrix::<f64>::null()).unwrap_err(), LinalgError::NullMatrix);
        assert_eq!(
            cholesky(&Matrix::<Complex<f64>>::identity(2)).unwrap_err(),
            LinalgError::NotReal
        );
        assert_eq!(
            cholesky(&Matrix::<f64>::zeros(2, 3)).unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
        let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 0.0, 2.0]);
        assert_eq!(cholesky(&a).unwrap_err(), LinalgError::NotSymmetric);
    }
}
