//! 1-indexed elementary row and column operations.
//!
//! Each method checks its indices and then delegates to the 0-based kernel
//! of the same name in [`crate::linalg`]. The scale factors are assumed to be
//! non-zero; that is not checked.

use crate::linalg;
use crate::traits::Scalar;
use crate::Matrix;

impl<T: Scalar> Matrix<T> {
    #[track_caller]
    fn check_row(&self, i: usize) -> usize {
        assert!(
            (1..=self.nrows()).contains(&i),
            "row {i} out of range for {}x{} matrix",
            self.nrows(),
            self.ncols()
        );
        i - 1
    }

    #[track_caller]
    fn check_col(&self, j: usize) -> usize {
        assert!(
            (1..=self.ncols()).contains(&j),
            "column {j} out of range for {}x{} matrix",
            self.nrows(),
            self.ncols()
        );
        j - 1
    }

    /// Swap rows `i` and `j`.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let mut a = Matrix::from_row_major(2, 2, &[1, 2, 3, 4]);
    /// a.row_interchange(1, 2);
    /// assert_eq!(a[(1, 1)], 3);
    /// ```
    pub fn row_interchange(&mut self, i: usize, j: usize) {
        let (i, j) = (self.check_row(i), self.check_row(j));
        linalg::row_interchange(self, i, j);
    }

    /// `k R_i -> R_i`.
    pub fn row_scale(&mut self, i: usize, k: T) {
        let i = self.check_row(i);
        linalg::row_scale(self, i, k);
    }

    /// `k R_i + R_j -> R_j`.
    pub fn row_addition(&mut self, i: usize, k: T, j: usize) {
        let (i, j) = (self.check_row(i), self.check_row(j));
        linalg::row_addition(self, i, k, j);
    }

    /// `k R_i + k2 R_j -> R_j`.
    pub fn row_scale_add(&mut self, i: usize, k: T, j: usize, k2: T) {
        let (i, j) = (self.check_row(i), self.check_row(j));
        linalg::row_scale_add(self, i, k, j, k2);
    }

    /// Swap columns `i` and `j`.
    pub fn col_interchange(&mut self, i: usize, j: usize) {
        let (i, j) = (self.check_col(i), self.check_col(j));
        linalg::col_interchange(self, i, j);
    }

    /// `k C_i -> C_i`.
    pub fn col_scale(&mut self, i: usize, k: T) {
        let i = self.check_col(i);
        linalg::col_scale(self, i, k);
    }

    /// `k C_i + C_j -> C_j`.
    pub fn col_addition(&mut self, i: usize, k: T, j: usize) {
        let (i, j) = (self.check_col(i), self.check_col(j));
        linalg::col_addition(self, i, k, j);
    }

    /// `k C_i + k2 C_j -> C_j`.
    pub fn col_scale_add(&mut self, i: usize, k: T, j: usize, k2: T) {
        let (i, j) = (self.check_col(i), self.check_col(j));
        linalg::col_scale_add(self, i, k, j, k2);
    }
}
