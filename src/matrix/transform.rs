use crate::traits::Scalar;
use crate::Matrix;

/// A 4x4 affine transform that can hand out its 16 scalars.
///
/// The elements are in the transform's native layout, which is column-major:
/// the first four scalars are the first column. This matches the buffer
/// order of [`Matrix`], so [`Matrix::from_transform`] is a straight copy.
///
/// Implemented for a flat `[T; 16]` and for `[[T; 4]; 4]` read as four
/// columns, the layouts graphics and geometry crates commonly use.
pub trait Transform4<T> {
    /// The 16 scalars, column by column.
    fn elements(&self) -> [T; 16];
}

impl<T: Copy> Transform4<T> for [T; 16] {
    #[inline]
    fn elements(&self) -> [T; 16] {
        *self
    }
}

impl<T: Copy> Transform4<T> for [[T; 4]; 4] {
    fn elements(&self) -> [T; 16] {
        let mut out = [self[0][0]; 16];
        for (c, column) in self.iter().enumerate() {
            out[c * 4..c * 4 + 4].copy_from_slice(column);
        }
        out
    }
}

impl<T: Scalar> Matrix<T> {
    /// `4 x 4` matrix holding a copy of the transform's elements.
    ///
    /// ```
    /// use corematrix::Matrix;
    ///
    /// // Translation by (1, 2, 3), columns as arrays.
    /// let t = [
    ///     [1.0_f64, 0.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0, 0.0],
    ///     [0.0, 0.0, 1.0, 0.0],
    ///     [1.0, 2.0, 3.0, 1.0],
    /// ];
    /// let m = Matrix::from_transform(&t);
    /// assert_eq!(m[(1, 4)], 1.0);
    /// assert_eq!(m[(3, 4)], 3.0);
    /// assert_eq!(m[(4, 4)], 1.0);
    /// ```
    pub fn from_transform(t: &impl Transform4<T>) -> Self {
        Matrix::from_column_major(4, 4, &t.elements())
    }
}

impl<T: Scalar> From<[T; 16]> for Matrix<T> {
    fn from(elements: [T; 16]) -> Self {
        Matrix::from_transform(&elements)
    }
}
