use crate::linalg::{Echelon, LupDecomposition};
use crate::traits::{tol_eq, tol_lt, LinalgScalar};
use crate::Matrix;

// ── Structural predicates ───────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Whether the element type is real.
    #[inline]
    pub fn is_real(&self) -> bool {
        T::IS_REAL
    }

    /// Whether the element type is complex.
    #[inline]
    pub fn is_complex(&self) -> bool {
        !T::IS_REAL
    }

    /// `A^T == A` within tolerance. Every `1 x 1` matrix is symmetric.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 2.0, 3.0]);
    /// assert!(a.is_symmetric());
    /// assert!(!Matrix::<f64>::zeros(2, 3).is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && (self.nrows() == 1 || self.transpose() == *self)
    }

    /// `A^T == -A`. Always false for complex elements.
    pub fn is_skew_symmetric(&self) -> bool {
        T::IS_REAL && self.is_square() && self.transpose() == -self
    }

    /// `A^H == A`. Same as [`is_symmetric`](Self::is_symmetric) for reals.
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && self.hconj() == *self
    }

    /// `A^H == -A`.
    pub fn is_skew_hermitian(&self) -> bool {
        self.is_square() && self.hconj() == -self
    }

    /// `A A^T == I`. Always false for complex elements.
    pub fn is_orthogonal(&self) -> bool {
        T::IS_REAL && self.is_square() && self * &self.transpose() == Matrix::identity(self.nrows())
    }

    /// `A A^H == I`.
    pub fn is_unitary(&self) -> bool {
        self.is_square() && self * &self.hconj() == Matrix::identity(self.nrows())
    }

    /// `A^H A == A A^H`.
    pub fn is_normal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let h = self.hconj();
        &h * self == self * &h
    }
}

// ── Determinant, inverse and powers ─────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Determinant. Zero for null and non-square matrices.
    ///
    /// Orders one to three use the closed-form cofactor expansion; larger
    /// matrices go through an LUP decomposition, and a singular one gives
    /// zero.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
    /// assert_eq!(a.det(), -6.0);
    /// ```
    pub fn det(&self) -> T {
        if !self.is_square() {
            return T::zero();
        }
        let m = self.as_slice();
        match self.nrows() {
            1 => m[0],
            // Column-major: m[0] m[2] / m[1] m[3].
            2 => m[0] * m[3] - m[2] * m[1],
            3 => {
                m[0] * (m[4] * m[8] - m[7] * m[5]) - m[3] * (m[1] * m[8] - m[7] * m[2])
                    + m[6] * (m[1] * m[5] - m[4] * m[2])
            }
            _ => LupDecomposition::new(self).map_or(T::zero(), |lu| lu.det()),
        }
    }

    /// Inverse by row reduction of `[A | I]`.
    ///
    /// Null for null, non-square and singular matrices. A matrix is treated as
    /// singular when some row of the augmented echelon form has no pivot in
    /// the `A` block.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
    /// let inv = a.inv();
    /// assert_eq!(&a * &inv, Matrix::identity(2));
    /// assert!(Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]).inv().is_null());
    /// ```
    pub fn inv(&self) -> Self {
        if !self.is_square() {
            return Self::null();
        }
        let n = self.nrows();
        let echelon = Echelon::reduce(self.hcat(&Matrix::identity(n)));
        if echelon.pivots().iter().any(|&p| p == 0 || p > n) {
            return Self::null();
        }
        echelon.into_row_canonical().submatrix(1, n + 1, n, n)
    }

    /// Integer power.
    ///
    /// `-1` is the inverse, `0` the identity and `1` a copy; higher powers
    /// multiply by repeated squaring. Null for non-square matrices and for
    /// exponents below `-1`.
    pub fn pow(&self, k: i32) -> Self {
        if !self.is_square() {
            return Self::null();
        }
        match k {
            -1 => self.inv(),
            0 => Matrix::identity(self.nrows()),
            1 => self.clone(),
            k if k < -1 => Self::null(),
            k => {
                let mut n = k as u32;
                let mut result = Matrix::identity(self.nrows());
                let mut base = self.clone();
                while n > 0 {
                    if n & 1 == 1 {
                        result = &result * &base;
                    }
                    n >>= 1;
                    if n > 0 {
                        base = &base * &base;
                    }
                }
                result
            }
        }
    }
}

// ── Cofactors ───────────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Cofactor `(-1)^(i+j) det(M_ij)` of the 1-indexed element `(i, j)`.
    ///
    /// Zero for a non-square matrix. The cofactor of a `1 x 1` matrix is one,
    /// the determinant of the empty minor.
    ///
    /// # Panics
    ///
    /// If `(i, j)` lies outside a square matrix.
    pub fn cofactor(&self, i: usize, j: usize) -> T {
        if !self.is_square() {
            return T::zero();
        }
        let n = self.nrows();
        assert!(
            (1..=n).contains(&i) && (1..=n).contains(&j),
            "cofactor index ({i}, {j}) out of range for {n}x{n} matrix"
        );
        if n == 1 {
            return T::one();
        }
        let minor = self.remove_row_col(i, j).det();
        if (i + j) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Matrix of all cofactors. Null for non-square matrices.
    pub fn cofactors(&self) -> Self {
        if !self.is_square() {
            return Self::null();
        }
        Matrix::from_fn(self.nrows(), self.ncols(), |i, j| self.cofactor(i + 1, j + 1))
    }

    /// Adjugate: the transposed cofactor matrix.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// let adj = a.adj();
    /// assert_eq!(&a * &adj, Matrix::identity(2) * a.det());
    /// ```
    pub fn adj(&self) -> Self {
        self.cofactors().transpose()
    }
}

// ── Rank and definiteness ───────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Number of pivots in the echelon form. Zero for null.
    pub fn rank(&self) -> usize {
        Echelon::reduce(self.clone()).rank()
    }

    /// `ncols - rank`. Zero for null.
    pub fn nullity(&self) -> usize {
        self.ncols() - self.rank()
    }

    /// `rank < ncols`.
    pub fn is_singular(&self) -> bool {
        self.rank() < self.ncols()
    }

    /// Positive definiteness by Sylvester's criterion.
    ///
    /// Every leading principal minor must be positive by more than the
    /// tolerance. For complex elements the real part of each minor is tested.
    pub fn is_posdef(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let zero = <T::Real as num_traits::Zero>::zero();
        (1..=self.nrows()).all(|k| {
            let d = self.submatrix(1, 1, k, k).det().re();
            !(tol_lt(d, zero) || tol_eq(d, zero))
        })
    }
}
