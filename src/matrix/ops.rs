use alloc::vec::Vec;
use core::ops::{Add, AddAssign, BitOr, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::{tol_eq, LinalgScalar, Scalar};

use super::{try_buffer, Matrix};

impl<T: Scalar> Matrix<T> {
    /// Element-wise combination of two same-shape matrices with the null rules
    /// shared by `+` and `-`: a null operand yields a copy of the other,
    /// mismatched shapes yield null.
    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        if self.is_null() {
            return rhs.clone();
        }
        if rhs.is_null() {
            return self.clone();
        }
        if (self.nrows, self.ncols) != (rhs.nrows, rhs.ncols) {
            return Self::null();
        }
        let mut data = Vec::new();
        if data.try_reserve_exact(self.data.len()).is_err() {
            return Self::null();
        }
        data.extend(self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| f(a, b)));
        Self {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Apply `f` to every element. Null maps to null.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        let mut data = Vec::new();
        if data.try_reserve_exact(self.data.len()).is_err() {
            return Matrix::null();
        }
        data.extend(self.data.iter().map(|&a| f(a)));
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// Null if either operand is null or `self.ncols() != rhs.nrows()`.
    pub fn matmul(&self, rhs: &Self) -> Self {
        if self.is_null() || rhs.is_null() || self.ncols != rhs.nrows {
            return Self::null();
        }
        let (n, p, m) = (self.nrows, self.ncols, rhs.ncols);
        let Some(mut data) = try_buffer(n * m, T::zero()) else {
            return Self::null();
        };
        for j in 0..m {
            for i in 0..n {
                let mut sum = T::zero();
                for k in 0..p {
                    sum = sum + self.data[k * n + i] * rhs.data[j * p + k];
                }
                data[j * n + i] = sum;
            }
        }
        Self {
            data,
            nrows: n,
            ncols: m,
        }
    }

    /// Horizontal concatenation `[self | rhs]`.
    ///
    /// Requires equal row counts. A single null operand gives a copy of the
    /// other; two nulls or mismatched rows give null.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::<f64>::identity(2);
    /// let b = Matrix::column_vector(&[5.0, 6.0]);
    /// let ab = a.hcat(&b);
    /// assert_eq!((ab.nrows(), ab.ncols()), (2, 3));
    /// assert_eq!(ab[(2, 3)], 6.0);
    /// ```
    pub fn hcat(&self, rhs: &Self) -> Self {
        match (self.is_null(), rhs.is_null()) {
            (true, true) => return Self::null(),
            (true, false) => return rhs.clone(),
            (false, true) => return self.clone(),
            _ => {}
        }
        if self.nrows != rhs.nrows {
            return Self::null();
        }
        // Column-major: the two buffers simply follow each other.
        let mut data = Vec::new();
        if data.try_reserve_exact(self.data.len() + rhs.data.len()).is_err() {
            return Self::null();
        }
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&rhs.data);
        Self {
            data,
            nrows: self.nrows,
            ncols: self.ncols + rhs.ncols,
        }
    }

    /// Vertical concatenation: `self` stacked on top of `rhs`.
    ///
    /// Requires equal column counts, with the same null rules as [`hcat`](Self::hcat).
    pub fn vcat(&self, rhs: &Self) -> Self {
        match (self.is_null(), rhs.is_null()) {
            (true, true) => return Self::null(),
            (true, false) => return rhs.clone(),
            (false, true) => return self.clone(),
            _ => {}
        }
        if self.ncols != rhs.ncols {
            return Self::null();
        }
        let n = self.nrows + rhs.nrows;
        Self::from_fn(n, self.ncols, |i, j| {
            if i < self.nrows {
                self.data[j * self.nrows + i]
            } else {
                rhs.data[j * rhs.nrows + (i - self.nrows)]
            }
        })
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -self.clone()
    }
}

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_elementwise {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident, $op:tt) => {
        impl<T: Scalar> $Trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl<T: Scalar> $Trait for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $Trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $Trait<Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                self.$method(&rhs)
            }
        }

        impl<T: Scalar> $AssignTrait<&Matrix<T>> for Matrix<T> {
            fn $assign(&mut self, rhs: &Matrix<T>) {
                *self = (&*self).$method(rhs);
            }
        }

        impl<T: Scalar> $AssignTrait for Matrix<T> {
            fn $assign(&mut self, rhs: Matrix<T>) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

impl_elementwise!(Add, add, AddAssign, add_assign, +);
impl_elementwise!(Sub, sub, SubAssign, sub_assign, -);

// ── Matrix product ──────────────────────────────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Scalar> Mul for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self.matmul(&rhs)
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Scalar> Mul<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self.matmul(&rhs)
    }
}

/// `A *= B`; a null lhs stays null.
impl<T: Scalar> MulAssign<&Matrix<T>> for Matrix<T> {
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        *self = self.matmul(rhs);
    }
}

impl<T: Scalar> MulAssign for Matrix<T> {
    fn mul_assign(&mut self, rhs: Matrix<T>) {
        *self = self.matmul(&rhs);
    }
}

// ── Scalar product ──────────────────────────────────────────────────

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, k: T) -> Matrix<T> {
        self *= k;
        self
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, k: T) -> Matrix<T> {
        self.clone() * k
    }
}

impl<T: Scalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, k: T) {
        for x in self.data.iter_mut() {
            *x = *x * k;
        }
    }
}

// ── Concatenation operator ──────────────────────────────────────────

/// `A | B` is [`Matrix::hcat`].
impl<T: Scalar> BitOr<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn bitor(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.hcat(rhs)
    }
}

impl<T: Scalar> BitOr for Matrix<T> {
    type Output = Matrix<T>;

    fn bitor(self, rhs: Matrix<T>) -> Matrix<T> {
        self.hcat(&rhs)
    }
}

// ── Equality ────────────────────────────────────────────────────────

/// Tolerance-based equality.
///
/// Two null matrices are equal; different shapes are not; otherwise every
/// pair of elements must satisfy [`tol_eq`].
impl<T: LinalgScalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.nrows, self.ncols) == (other.nrows, other.ncols)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| tol_eq(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, v: &[f64]) -> Matrix<f64> {
        Matrix::from_row_major(rows, cols, v)
    }

    #[test]
    fn add_sub() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(&a + &b, m(2, 2, &[6.0, 8.0, 10.0, 12.0]));
        assert_eq!(&b - &a, m(2, 2, &[4.0, 4.0, 4.0, 4.0]));
        let mut c = a.clone();
        c += &b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn null_addition_rules() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let null = Matrix::<f64>::null();
        assert_eq!(&null + &a, a);
        assert_eq!(&a + &null, a);
        assert_eq!(&a - &null, a);
        assert_eq!(&null - &a, a);
        assert!((&null + &null).is_null());
    }

    #[test]
    fn shape_mismatch_gives_null() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 3, &[1.0; 6]);
        assert!((&a + &b).is_null());
        assert!((&a - &b).is_null());
        assert!((&b * &b).is_null());
    }

    #[test]
    fn matmul() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = m(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        assert_eq!(&a * &b, m(2, 2, &[58.0, 64.0, 139.0, 154.0]));
    }

    #[test]
    fn null_product() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let null = Matrix::<f64>::null();
        assert!((&null * &a).is_null());
        assert!((&a * &null).is_null());
        let mut n = Matrix::<f64>::null();
        n *= &a;
        assert!(n.is_null());
    }

    #[test]
    fn scalar_product() {
        let a = m(1, 2, &[1.0, -2.0]);
        assert_eq!(&a * 3.0, m(1, 2, &[3.0, -6.0]));
        assert!((Matrix::<f64>::null() * 2.0).is_null());
    }

    #[test]
    fn negation() {
        let a = m(1, 2, &[1.0, -2.0]);
        assert_eq!(-&a, m(1, 2, &[-1.0, 2.0]));
        assert!((-Matrix::<f64>::null()).is_null());
    }

    #[test]
    fn concatenation() {
        let a = m(2, 1, &[1.0, 2.0]);
        let b = m(2, 2, &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(&a | &b, m(2, 3, &[1.0, 3.0, 4.0, 2.0, 5.0, 6.0]));
        let c = m(1, 2, &[7.0, 8.0]);
        assert_eq!(b.vcat(&c), m(3, 2, &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0]));
        assert!(a.hcat(&c).is_null());
        assert!(a.vcat(&b).is_null());
    }

    #[test]
    fn concatenation_with_null() {
        let a = m(2, 1, &[1.0, 2.0]);
        let null = Matrix::<f64>::null();
        assert_eq!(&null | &a, a);
        assert_eq!(a.vcat(&null), a);
        assert!(null.hcat(&null).is_null());
    }

    #[test]
    fn equality_is_tolerant() {
        let a = m(1, 2, &[1.0, 2.0]);
        let b = m(1, 2, &[1.0 + 1e-8, 2.0 - 1e-8]);
        assert_eq!(a, b);
        assert_ne!(a, m(1, 2, &[1.0, 2.1]));
        assert_ne!(a, m(2, 1, &[1.0, 2.0]));
        assert_eq!(Matrix::<f64>::null(), Matrix::<f64>::null());
        assert_ne!(a, Matrix::<f64>::null());
    }

    #[test]
    fn integer_arithmetic() {
        let a = Matrix::from_row_major(2, 2, &[1_i64, 2, 3, 4]);
        let b = &a * &a;
        assert_eq!(b.as_slice(), &[7, 15, 10, 22]);
        assert_eq!(a.map(|x| x as f64 * 0.5)[(2, 2)], 2.0);
    }
}
