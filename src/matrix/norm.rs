use num_traits::{Float, Zero};

use crate::traits::LinalgScalar;

use super::Matrix;

/// Which matrix norm [`Matrix::norm`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormKind {
    /// Square root of the sum of squared moduli.
    #[default]
    Frobenius,
    /// Largest element modulus.
    Max,
    /// Operator 1-norm: largest absolute column sum.
    One,
    /// Operator infinity-norm: largest absolute row sum.
    Infinity,
}

impl<T: LinalgScalar> Matrix<T> {
    /// Matrix norm of the requested kind. The null matrix has norm zero.
    ///
    /// ```
    /// use corematrix::{Matrix, NormKind};
    /// let a = Matrix::from_row_major(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert!((a.norm(NormKind::Frobenius) - 30.0_f64.sqrt()).abs() < 1e-12);
    /// assert_eq!(a.norm(NormKind::Max), 4.0);
    /// assert_eq!(a.norm(NormKind::One), 6.0);
    /// assert_eq!(a.norm(NormKind::Infinity), 7.0);
    /// ```
    pub fn norm(&self, kind: NormKind) -> T::Real {
        match kind {
            NormKind::Frobenius => self.frobenius_norm(),
            NormKind::Max => self
                .data
                .iter()
                .fold(<T::Real as Zero>::zero(), |acc, &x| acc.max(x.modulus())),
            NormKind::One => {
                let n = self.nrows.max(1);
                self.data
                    .chunks(n)
                    .map(column_sum::<T>)
                    .fold(<T::Real as Zero>::zero(), |a, b| a.max(b))
            }
            NormKind::Infinity => {
                let mut best = <T::Real as Zero>::zero();
                for i in 0..self.nrows {
                    let mut sum = <T::Real as Zero>::zero();
                    for j in 0..self.ncols {
                        sum = sum + self.data[j * self.nrows + i].modulus();
                    }
                    best = best.max(sum);
                }
                best
            }
        }
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> T::Real {
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.modulus();
            sum = sum + m * m;
        }
        sum.sqrt()
    }
}

fn column_sum<T: LinalgScalar>(col: &[T]) -> T::Real {
    col.iter()
        .fold(<T::Real as Zero>::zero(), |acc, &x| acc + x.modulus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn null_norms_are_zero() {
        let n = Matrix::<f64>::null();
        for kind in [NormKind::Frobenius, NormKind::Max, NormKind::One, NormKind::Infinity] {
            assert_eq!(n.norm(kind), 0.0);
        }
    }

    #[test]
    fn rectangular() {
        let a = Matrix::from_row_major(2, 3, &[1.0_f64, -2.0, 3.0, -4.0, 5.0, -6.0]);
        assert_eq!(a.norm(NormKind::One), 9.0);
        assert_eq!(a.norm(NormKind::Infinity), 15.0);
        assert_eq!(a.norm(NormKind::Max), 6.0);
        assert!((a.norm(NormKind::default()) - 91.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn complex_moduli() {
        let a = Matrix::from_row_major(1, 2, &[Complex::new(3.0_f64, 4.0), Complex::new(0.0, 1.0)]);
        assert!((a.norm(NormKind::Frobenius) - 26.0_f64.sqrt()).abs() < 1e-12);
        assert!((a.norm(NormKind::Infinity) - 6.0).abs() < 1e-12);
    }
}
