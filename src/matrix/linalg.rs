use crate::linalg::{
    balance_in_place, cholesky, gaussian_elimination, gaussian_elimination_aux, EigenSystem, Echelon,
    Hessenberg, LinalgError, LinearSolution, LinearSystemAux, LupDecomposition, LupFactors,
};
use crate::traits::{FloatScalar, LinalgScalar};
use crate::Matrix;

// ── Row reduction and linear systems ────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Reduce to echelon form, consuming the matrix.
    pub fn into_echelon(self) -> Echelon<T> {
        Echelon::reduce(self)
    }

    /// Echelon form of a copy.
    pub fn echelon_form(&self) -> Echelon<T> {
        Echelon::reduce(self.clone())
    }

    /// Reduced row-echelon form of a copy.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 7.0]);
    /// let r = a.row_canonical_form();
    /// assert_eq!(r, Matrix::from_row_major(2, 3, &[1.0, 2.0, 0.0, 0.0, 0.0, 1.0]));
    /// ```
    pub fn row_canonical_form(&self) -> Self {
        self.echelon_form().into_row_canonical()
    }

    /// Solve `self * X = b`. See [`gaussian_elimination`].
    pub fn solve(&self, b: &Matrix<T>) -> LinearSolution<T> {
        gaussian_elimination(self, b)
    }

    /// Solve `self * X = b`, also returning the intermediate forms.
    pub fn solve_aux(&self, b: &Matrix<T>) -> (LinearSolution<T>, LinearSystemAux<T>) {
        gaussian_elimination_aux(self, b)
    }
}

// ── Factorizations ──────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// LUP decomposition with implicit partial pivoting.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// let f = a.lup_factors().unwrap();
    /// assert_eq!(&f.l * &f.u, &f.p * &a);
    /// ```
    pub fn lup_decomp(&self) -> Result<LupDecomposition<T>, LinalgError> {
        LupDecomposition::new(self)
    }

    /// Unpacked `L`, `U` and `P` with `L U = P A`.
    pub fn lup_factors(&self) -> Result<LupFactors<T>, LinalgError> {
        self.lup_decomp().map(|lu| lu.unpack())
    }

    /// Cholesky factor `L` with `L L^T = A`, for a real symmetric positive
    /// definite matrix.
    pub fn cholesky_decomp(&self) -> Result<Self, LinalgError> {
        cholesky::cholesky(self)
    }

    /// Upper Hessenberg form by stabilised elementary similarity transforms.
    ///
    /// With `zero_lower` the entries below the first sub-diagonal are
    /// cleared; otherwise the elimination multipliers remain there.
    pub fn hessenberg_form(&self, zero_lower: bool) -> Result<Hessenberg<T>, LinalgError> {
        Hessenberg::reduce(self, zero_lower)
    }
}

// ── Real-only: balancing and eigen-systems ──────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Balanced copy of a square matrix. Null for null and non-square input.
    ///
    /// When `scale` is given, every applied factor is multiplied into the
    /// entry for its row; start from ones to read off the full transform.
    pub fn balance(&self, scale: Option<&mut [T]>) -> Self {
        if !self.is_square() {
            return Self::null();
        }
        let mut b = self.clone();
        balance_in_place(&mut b, scale);
        b
    }

    /// Eigenvalues and eigenvectors, sorted by real part, largest first.
    ///
    /// Symmetric input goes through Householder tridiagonalization and
    /// implicit QL; all other matrices are balanced, reduced to Hessenberg
    /// form and solved with the Francis double-shift QR iteration.
    pub fn eigen_system(&self) -> Result<EigenSystem<T>, LinalgError> {
        EigenSystem::new(self)
    }
}
