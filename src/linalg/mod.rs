//! In-place kernels behind the [`Matrix`](crate::Matrix) decompositions.
//!
//! Every kernel operates on `&mut impl MatrixMut<T>` with 0-based indices, so
//! it can run on a scratch copy without allocating a new matrix. The
//! convenience methods on `Matrix` (`lup_decomp`, `cholesky_decomp`,
//! `hessenberg_form`, `eigen_system`, ...) clone, call these, and wrap the
//! outcome in a result type.

pub(crate) mod balance;
pub(crate) mod cholesky;
pub(crate) mod elementary;
pub(crate) mod eigen;
pub(crate) mod francis;
pub(crate) mod gauss;
pub(crate) mod hessenberg;
pub(crate) mod lu;
pub(crate) mod symmetric_eigen;

pub use balance::{balance_in_place, balbak};
pub use cholesky::cholesky_in_place;
pub use eigen::EigenSystem;
pub use elementary::{
    col_addition, col_interchange, col_scale, col_scale_add, echelon_in_place, row_addition,
    row_canonical_in_place, row_interchange, row_normalisation, row_scale, row_scale_add,
    Echelon,
};
pub use francis::{hqr, hqr2};
pub use gauss::{gaussian_elimination, gaussian_elimination_aux, LinearSolution, LinearSystemAux, SolutionStatus};
pub use hessenberg::{eltran, hessenberg_in_place, Hessenberg};
pub use lu::{lup_in_place, lup_solve, LupDecomposition, LupFactors};
pub use symmetric_eigen::{tqli, tred2};

/// Iteration ceiling for each deflation in the QL (`tqli`) and Francis
/// (`hqr`, `hqr2`) sweeps. Exceeding it is a hard failure.
pub const MAX_SWEEPS: usize = 30;

/// Alias for results of the decompositions.
pub type Result<T> = core::result::Result<T, LinalgError>;

/// Errors from linear algebra operations.
///
/// Returned by the decomposition methods (`lup_decomp`, `cholesky_decomp`,
/// `hessenberg_form`, `eigen_system`). Arithmetic and structural operations
/// do not use this type; they return the null matrix instead.
///
/// ```
/// use corematrix::Matrix;
/// use corematrix::linalg::LinalgError;
///
/// let singular = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.lup_decomp().unwrap_err(), LinalgError::Singular);
///
/// let not_pd = Matrix::from_row_major(2, 2, &[1.0_f64, 5.0, 5.0, 1.0]);
/// assert_eq!(not_pd.cholesky_decomp().unwrap_err(), LinalgError::NotPositiveDefinite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LinalgError {
    /// The input was the null matrix.
    #[error("matrix is null")]
    NullMatrix,
    /// The operation needs a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    /// The operation is defined for real scalars only.
    #[error("matrix is not real-valued")]
    NotReal,
    /// The operation needs a symmetric matrix.
    #[error("matrix is not symmetric")]
    NotSymmetric,
    /// No usable pivot was found in some column.
    #[error("matrix is singular")]
    Singular,
    /// A Cholesky diagonal entry was not strictly positive.
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,
    /// An iterative sweep did not deflate within [`MAX_SWEEPS`] iterations.
    #[error("no convergence after {sweeps} sweeps")]
    ConvergenceFailure { sweeps: usize },
    /// A working buffer could not be allocated.
    #[error("allocation failed")]
    AllocationFailed,
    /// An operand had an incompatible shape.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

/// Shared validation for the square-only decompositions.
pub(crate) fn require_square<T>(a: &crate::Matrix<T>) -> Result<()> {
    if a.is_null() {
        return Err(LinalgError::NullMatrix);
    }
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(())
}
