use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::traits::{tol_eq, LinalgScalar, Scalar};

use super::Matrix;

// ── Transpose and conjugates ────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Transpose. Null in, null out.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::from_row_major(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// let t = m.transpose();
    /// assert_eq!((t.nrows(), t.ncols()), (3, 2));
    /// assert_eq!(t[(3, 1)], 3);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self.data[i * self.nrows + j])
    }

    /// Sum of the leading diagonal; zero for null or non-square matrices.
    pub fn trace(&self) -> T {
        if !self.is_square() {
            return T::zero();
        }
        (0..self.nrows).fold(T::zero(), |acc, i| acc + self.data[i * self.nrows + i])
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Whether every element is tolerance-equal to zero. False for the null matrix.
    pub fn is_zero(&self) -> bool {
        !self.is_null() && self.data.iter().all(|&x| tol_eq(x, T::zero()))
    }

    /// Element-wise complex conjugate (a copy for real scalars).
    pub fn conj(&self) -> Self {
        self.map(LinalgScalar::conj)
    }

    /// Conjugate transpose `Aᴴ` (the transpose for real scalars).
    pub fn hconj(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| {
            self.data[i * self.nrows + j].conj()
        })
    }
}

// ── Rows, columns and blocks ────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Row `i` as a `1 x m` matrix, or null if `i` is out of range.
    pub fn row(&self, i: usize) -> Self {
        if i == 0 || i > self.nrows {
            return Self::null();
        }
        Matrix::from_fn(1, self.ncols, |_, j| self.data[j * self.nrows + i - 1])
    }

    /// Column `j` as an `n x 1` matrix, or null if `j` is out of range.
    pub fn column(&self, j: usize) -> Self {
        if j == 0 || j > self.ncols {
            return Self::null();
        }
        let start = (j - 1) * self.nrows;
        Matrix::from_column_major(self.nrows, 1, &self.data[start..start + self.nrows])
    }

    /// Overwrite row `i` with `values`. No-op unless `values.len() == ncols`
    /// and `i` is in range.
    pub fn set_row(&mut self, i: usize, values: &[T]) {
        if i == 0 || i > self.nrows || values.len() != self.ncols {
            return;
        }
        for (j, &v) in values.iter().enumerate() {
            self.data[j * self.nrows + i - 1] = v;
        }
    }

    /// Overwrite row `i` from a `1 x m` matrix. No-op on incompatible shapes.
    pub fn set_row_from(&mut self, i: usize, row: &Matrix<T>) {
        if row.nrows == 1 {
            self.set_row(i, &row.data);
        }
    }

    /// Overwrite column `j` with `values`. No-op unless `values.len() == nrows`
    /// and `j` is in range.
    pub fn set_column(&mut self, j: usize, values: &[T]) {
        if j == 0 || j > self.ncols || values.len() != self.nrows {
            return;
        }
        let start = (j - 1) * self.nrows;
        self.data[start..start + self.nrows].copy_from_slice(values);
    }

    /// Overwrite column `j` from an `n x 1` matrix. No-op on incompatible shapes.
    pub fn set_column_from(&mut self, j: usize, column: &Matrix<T>) {
        if column.ncols == 1 {
            self.set_column(j, &column.data);
        }
    }

    /// The `rows x cols` block whose top-left element is `(i, j)`.
    ///
    /// Null if the block does not lie inside the matrix.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::from_row_major(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let s = m.submatrix(2, 2, 2, 2);
    /// assert_eq!(s.as_slice(), &[5, 8, 6, 9]);
    /// ```
    pub fn submatrix(&self, i: usize, j: usize, rows: usize, cols: usize) -> Self {
        if i == 0 || j == 0 || rows == 0 || cols == 0 {
            return Self::null();
        }
        if i - 1 + rows > self.nrows || j - 1 + cols > self.ncols {
            return Self::null();
        }
        Matrix::from_fn(rows, cols, |r, c| {
            self.data[(j - 1 + c) * self.nrows + (i - 1 + r)]
        })
    }

    /// Write `block` into `self` with its top-left element at `(i, j)`.
    /// No-op if the block is null or does not fit.
    pub fn set_submatrix(&mut self, i: usize, j: usize, block: &Matrix<T>) {
        if block.is_null() || i == 0 || j == 0 {
            return;
        }
        if i - 1 + block.nrows > self.nrows || j - 1 + block.ncols > self.ncols {
            return;
        }
        for c in 0..block.ncols {
            let dst = (j - 1 + c) * self.nrows + (i - 1);
            let src = c * block.nrows;
            self.data[dst..dst + block.nrows].copy_from_slice(&block.data[src..src + block.nrows]);
        }
    }

    /// Copy of `self` with row `i` and column `j` deleted.
    ///
    /// An index of 0, or one outside the matrix, leaves that axis intact. The
    /// result is null if no rows or no columns would remain. This is the minor
    /// extraction used by [`cofactor`](Matrix::cofactor).
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::from_row_major(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// let minor = m.remove_row_col(2, 3);
    /// assert_eq!(minor.as_slice(), &[1, 7, 2, 8]);
    /// let no_row = m.remove_row_col(0, 1);
    /// assert_eq!((no_row.nrows(), no_row.ncols()), (3, 2));
    /// ```
    pub fn remove_row_col(&self, i: usize, j: usize) -> Self {
        let drop_row = i >= 1 && i <= self.nrows;
        let drop_col = j >= 1 && j <= self.ncols;
        let rows = self.nrows - usize::from(drop_row);
        let cols = self.ncols - usize::from(drop_col);
        Matrix::from_fn(rows, cols, |r, c| {
            let src_r = if drop_row && r + 1 >= i { r + 1 } else { r };
            let src_c = if drop_col && c + 1 >= j { c + 1 } else { c };
            self.data[src_c * self.nrows + src_r]
        })
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Diagnostic rendering: a `(n, m)...` header, then one line per row with
/// each element right-aligned to the widest element and followed by two
/// spaces. A formatter precision (`{:.3}`) is applied to every element.
///
/// ```
/// use corematrix::Matrix;
/// let m = Matrix::from_row_major(2, 2, &[1, 20, 300, 4]);
/// assert_eq!(format!("{m}"), "(2, 2)...\n  1   20  \n300    4  \n\n");
/// assert_eq!(format!("{}", Matrix::<i32>::null()), "(NULL matrix)\n");
/// ```
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return writeln!(f, "(NULL matrix)");
        }

        let mut cells: Vec<String> = Vec::with_capacity(self.data.len());
        for x in &self.data {
            let mut s = String::new();
            match f.precision() {
                Some(p) => write!(s, "{:.*}", p, x)?,
                None => write!(s, "{}", x)?,
            }
            cells.push(s);
        }
        let width = cells.iter().map(|s| s.chars().count()).max().unwrap_or(0);

        writeln!(f, "({}, {})...", self.nrows, self.ncols)?;
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                write!(f, "{:>width$}  ", cells[j * self.nrows + i], width = width)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
