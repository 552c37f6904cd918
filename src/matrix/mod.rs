mod elementary;
mod linalg;
mod norm;
mod ops;
mod square;
mod transform;
mod util;

pub use norm::NormKind;
pub use transform::Transform4;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Heap-allocated dense matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage: the 1-indexed element `(i, j)` lives at
/// offset `(i - 1) + (j - 1) * nrows`. A matrix is either **null**
/// (`0 x 0`, empty buffer) or **valid** (both dimensions at least one, buffer
/// of exactly `nrows * ncols` elements). Operations that cannot produce a
/// valid matrix (shape mismatch, singular inverse, failed allocation) return
/// the null matrix instead of panicking, and null operands follow the
/// propagation rules documented on each operator.
///
/// The public accessors are **1-indexed**. The [`MatrixRef`] / [`MatrixMut`]
/// impls are 0-based and exist for the kernels in [`crate::linalg`].
///
/// # Examples
///
/// ```
/// use corematrix::Matrix;
///
/// let a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(1, 2)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let bad = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0]);
/// assert!(bad.is_null());
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

/// Number of elements for an `nrows x ncols` buffer.
///
/// `None` if either dimension is zero or the product overflows.
#[inline]
fn shape_len(nrows: usize, ncols: usize) -> Option<usize> {
    if nrows == 0 || ncols == 0 {
        return None;
    }
    nrows.checked_mul(ncols)
}

/// Allocate `len` copies of `value`, reporting allocation failure as `None`.
pub(crate) fn try_buffer<T: Clone>(len: usize, value: T) -> Option<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).ok()?;
    data.resize(len, value);
    Some(data)
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::null()
    }
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// The null matrix: `0 x 0`, no buffer.
    #[inline]
    pub const fn null() -> Self {
        Self {
            data: Vec::new(),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in column-major order.
    ///
    /// Takes ownership of the buffer without copying. Returns null if
    /// `data.len() != nrows * ncols` or either dimension is zero.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// // Column-major: col1=[1,3], col2=[2,4]
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 3.0, 2.0, 4.0]);
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(2, 1)], 3.0);
    /// assert_eq!(m[(1, 2)], 2.0);
    /// ```
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        match shape_len(nrows, ncols) {
            Some(len) if len == data.len() => Self { data, nrows, ncols },
            _ => Self::null(),
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// Indices passed to `f` are 0-based. Columns are visited outer, rows
    /// inner (top to bottom within each column).
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let Some(len) = shape_len(nrows, ncols) else {
            return Self::null();
        };
        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            return Self::null();
        }
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Alias of [`nrows`](Self::nrows).
    #[inline]
    pub fn rows(&self) -> usize {
        self.nrows
    }

    /// Alias of [`ncols`](Self::ncols).
    #[inline]
    pub fn columns(&self) -> usize {
        self.ncols
    }

    /// Whether this is the null matrix: `0 x 0` with no storage.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the matrix is square. The null matrix is not.
    #[inline]
    pub fn is_square(&self) -> bool {
        !self.is_null() && self.nrows == self.ncols
    }

    /// Column-major view of the buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable column-major view of the buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its column-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Move the buffer out, leaving `self` null.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let mut a = Matrix::<f64>::identity(2);
    /// let b = a.take();
    /// assert!(a.is_null());
    /// assert_eq!(b.nrows(), 2);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    #[inline]
    pub(crate) fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i >= 1 && i <= self.nrows && j >= 1 && j <= self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.nrows,
            self.ncols,
        );
        (i - 1) + (j - 1) * self.nrows
    }
}

impl<T: Scalar> Matrix<T> {
    /// Create an `n x n` identity matrix. `n = 0` gives null.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let id = Matrix::<f64>::identity(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(1, 2)], 0.0);
    /// assert!(Matrix::<f64>::identity(0).is_null());
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..m.nrows {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Create an `nrows x ncols` zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create a matrix filled with a given value.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::fill(2, 3, 7.0_f64);
    /// assert_eq!(m[(2, 3)], 7.0);
    /// ```
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        shape_len(nrows, ncols)
            .and_then(|len| try_buffer(len, value))
            .map_or_else(Self::null, |data| Self { data, nrows, ncols })
    }

    /// Create a matrix from values given in row-major (literal) order.
    ///
    /// Returns null if `values.len() != nrows * ncols`.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let m = Matrix::from_row_major(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(1, 3)], 3.0);
    /// assert_eq!(m[(2, 1)], 4.0);
    /// ```
    pub fn from_row_major(nrows: usize, ncols: usize, values: &[T]) -> Self {
        match shape_len(nrows, ncols) {
            Some(len) if len == values.len() => {
                Self::from_fn(nrows, ncols, |i, j| values[i * ncols + j])
            }
            _ => Self::null(),
        }
    }

    /// Create a matrix by copying a column-major buffer.
    ///
    /// Returns null if `values.len() != nrows * ncols`.
    pub fn from_column_major(nrows: usize, ncols: usize, values: &[T]) -> Self {
        match shape_len(nrows, ncols) {
            Some(len) if len == values.len() => {
                Self::from_fn(nrows, ncols, |i, j| values[j * nrows + i])
            }
            _ => Self::null(),
        }
    }

    /// `n x 1` matrix holding `values`.
    pub fn column_vector(values: &[T]) -> Self {
        Self::from_column_major(values.len(), 1, values)
    }

    /// `1 x m` matrix holding `values`.
    pub fn row_vector(values: &[T]) -> Self {
        Self::from_column_major(1, values.len(), values)
    }

    /// Square diagonal matrix with `values` on the leading diagonal.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let d = Matrix::diag(&[1.0_f64, 2.0, 3.0]);
    /// assert_eq!(d[(2, 2)], 2.0);
    /// assert_eq!(d[(2, 3)], 0.0);
    /// ```
    pub fn diag(values: &[T]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate().take(m.nrows) {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Permutation matrix from a 1-indexed permutation vector.
    ///
    /// Row `i` carries its one in column `perm[i]`, so `(P * A)` has row
    /// `perm[i]` of `A` in position `i`: the row order an LUP decomposition
    /// reports. An empty vector or an entry
    /// outside `1..=n` gives null.
    ///
    /// ```
    /// use corematrix::Matrix;
    /// let p = Matrix::<f64>::permutation_matrix(&[2, 1]);
    /// assert_eq!(p[(2, 1)], 1.0);
    /// assert_eq!(p[(1, 2)], 1.0);
    /// ```
    pub fn permutation_matrix(perm: &[usize]) -> Self {
        let n = perm.len();
        if perm.iter().any(|&p| p == 0 || p > n) {
            return Self::null();
        }
        let mut m = Self::zeros(n, n);
        if m.is_null() {
            return m;
        }
        for (i, &p) in perm.iter().enumerate() {
            m.data[(p - 1) * n + i] = T::one();
        }
        m
    }

    /// Checked 1-indexed element read.
    #[inline]
    pub fn element(&self, i: usize, j: usize) -> Option<T> {
        if i >= 1 && i <= self.nrows && j >= 1 && j <= self.ncols {
            Some(self.data[(i - 1) + (j - 1) * self.nrows])
        } else {
            None
        }
    }
}

/// Identity permutation `[1, 2, ..., n]`.
pub fn identity_permutation(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for Matrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for Matrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

/// 1-indexed element access. Panics on an out-of-range index.
impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.offset(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.offset(i, j);
        &mut self.data[k]
    }
}
