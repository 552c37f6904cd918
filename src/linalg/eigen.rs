use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;

use super::balance::{balance_in_place, balbak};
use super::hessenberg::Hessenberg;
use super::symmetric_eigen::{tqli, tred2};
use super::{require_square, Result};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Eigenvalues and eigenvectors of a real square matrix.
///
/// Eigenpairs are ordered by the real part of the eigenvalue, largest first;
/// pairs with equal real parts keep the order the solver produced them in.
/// Column `k` of [`vectors`](Self::vectors) belongs to `values[k]`.
///
/// For a symmetric input the eigenvalues are real and the columns are
/// orthonormal. For a general input a real eigenvalue owns its column, and a
/// complex conjugate pair at `k, k + 1` (positive imaginary part first) shares
/// columns `k` and `k + 1`, holding the real and imaginary parts of the
/// eigenvector of `values[k]`. [`eigenvector`](Self::eigenvector) rebuilds
/// the complex vector either way.
///
/// ```
/// use corematrix::Matrix;
///
/// let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = a.eigen_system().unwrap();
/// assert!((eig.values()[0].re - 3.0).abs() < 1e-12);
/// assert!((eig.values()[1].re - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EigenSystem<T> {
    values: Vec<Complex<T>>,
    vectors: Matrix<T>,
}

impl<T: FloatScalar> EigenSystem<T> {
    pub(crate) fn new(a: &Matrix<T>) -> Result<Self> {
        require_square(a)?;
        let n = a.nrows();

        let (mut values, mut vectors) = if a.is_symmetric() {
            log::trace!("eigen_system: symmetric path (tred2 + tqli) on {n}x{n}");
            let mut z = a.clone();
            let mut d = vec![T::zero(); n];
            let mut e = vec![T::zero(); n];
            tred2(&mut z, &mut d, &mut e);
            tqli(&mut d, &mut e, &mut z)?;
            let values = d.into_iter().map(|x| Complex::new(x, T::zero())).collect();
            (values, z)
        } else {
            log::trace!("eigen_system: general path (balance, hessenberg, hqr2) on {n}x{n}");
            let mut scale = vec![T::one(); n];
            let mut b = a.clone();
            balance_in_place(&mut b, Some(&mut scale));
            let (values, mut z) = Hessenberg::reduce(&b, false)?.into_eigenpairs()?;
            balbak(&mut z, &scale);
            (values, z)
        };

        sort_descending(&mut values, &mut vectors);
        Ok(Self { values, vectors })
    }

    /// Complex eigenvector `k` (0-based), rebuilt from the packed columns.
    ///
    /// Returns `None` if `k` is out of range.
    pub fn eigenvector(&self, k: usize) -> Option<Vec<Complex<T>>> {
        let lambda = *self.values.get(k)?;
        let column = |j: usize| (0..self.vectors.nrows()).map(move |i| *self.vectors.get(i, j));
        let zero = T::zero();
        let v = if lambda.im == zero {
            column(k).map(|re| Complex::new(re, zero)).collect()
        } else if lambda.im > zero && k + 1 < self.values.len() {
            column(k).zip(column(k + 1)).map(|(re, im)| Complex::new(re, im)).collect()
        } else if k > 0 {
            column(k - 1).zip(column(k)).map(|(re, im)| Complex::new(re, -im)).collect()
        } else {
            return None;
        };
        Some(v)
    }
}

impl<T> EigenSystem<T> {
    #[inline]
    pub fn values(&self) -> &[Complex<T>] {
        &self.values
    }

    #[inline]
    pub fn vectors(&self) -> &Matrix<T> {
        &self.vectors
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<Complex<T>>, Matrix<T>) {
        (self.values, self.vectors)
    }
}

/// Stable insertion sort of eigenpairs by real part, descending.
fn sort_descending<T: FloatScalar>(values: &mut [Complex<T>], vectors: &mut Matrix<T>) {
    let rows = vectors.nrows();
    let mut temp = vec![T::zero(); rows];
    for j in 1..values.len() {
        let x = values[j];
        for (k, t) in temp.iter_mut().enumerate() {
            *t = *vectors.get(k, j);
        }
        let mut i = j;
        while i > 0 && values[i - 1].re < x.re {
            values[i] = values[i - 1];
            for k in 0..rows {
                let v = *vectors.get(k, i - 1);
                *vectors.get_mut(k, i) = v;
            }
            i -= 1;
        }
        values[i] = x;
        for (k, &t) in temp.iter().enumerate() {
            *vectors.get_mut(k, i) = t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::LinalgError;

    #[test]
    fn sort_is_descending_and_stable() {
        let mut values = vec![
            Complex::new(1.0_f64, 0.0),
            Complex::new(3.0, 1.0),
            Complex::new(3.0, -1.0),
            Complex::new(-2.0, 0.0),
            Complex::new(5.0, 0.0),
        ];
        let mut vectors = Matrix::from_fn(1, 5, |_, j| j as f64);
        sort_descending(&mut values, &mut vectors);
        let re: Vec<f64> = values.iter().map(|v| v.re).collect();
        assert_eq!(re, vec![5.0, 3.0, 3.0, 1.0, -2.0]);
        assert_eq!(values[1].im, 1.0);
        assert_eq!(values[2].im, -1.0);
        assert_eq!(vectors.as_slice(), &[4.0, 1.0, 2.0, 0.0, 3.0]);
    }

    #[test]
    fn symmetric_path() {
        let a = Matrix::from_row_major(3, 3, &[2.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let eig = EigenSystem::new(&a).unwrap();
        let s = 2.0_f64.sqrt();
        let expected = [2.0 + s, 2.0, 2.0 - s];
        for (k, (v, want)) in eig.values().iter().zip(expected).enumerate() {
            assert!((v.re - want).abs() < 1e-10);
            assert_eq!(v.im, 0.0);
            let x = eig.vectors().column(k + 1);
            assert_eq!(&a * &x, &x * v.re);
        }
    }

    #[test]
    fn general_real_path() {
        let a = Matrix::from_row_major(3, 3, &[1.0_f64, 2.0, 0.0, 0.0, 3.0, 0.0, 2.0, -4.0, 2.0]);
        let eig = EigenSystem::new(&a).unwrap();
        let re: Vec<f64> = eig.values().iter().map(|v| v.re).collect();
        for (got, want) in re.iter().zip([3.0, 2.0, 1.0]) {
            assert!((got - want).abs() < 1e-10, "{re:?}");
        }
        for k in 0..3 {
            let x = eig.vectors().column(k + 1);
            assert_eq!(&a * &x, &x * re[k]);
        }
    }

    #[test]
    fn conjugate_pair_vectors() {
        let a = Matrix::from_row_major(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
        let eig = EigenSystem::new(&a).unwrap();
        for k in 0..2 {
            let lambda = eig.values()[k];
            assert!((lambda.im.abs() - 1.0).abs() < 1e-12);
            let v = eig.eigenvector(k).unwrap();
            for i in 0..2 {
                let av = Complex::new(*a.get(i, 0), 0.0) * v[0] + Complex::new(*a.get(i, 1), 0.0) * v[1];
                assert!((av - lambda * v[i]).norm() < 1e-12);
            }
        }
        assert!(eig.eigenvector(2).is_none());
    }

    #[test]
    fn rejects_non_square() {
        assert_eq!(
            EigenSystem::new(&Matrix::<f64>::zeros(2, 3)).unwrap_err(),
            LinalgError::NotSquare { rows: 2, cols: 3 }
        );
        assert_eq!(EigenSystem::new(&Matrix::<f64>::null()).unwrap_err(), LinalgError::NullMatrix);
    }
}
