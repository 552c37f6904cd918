use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, complex numbers and all integer types. Storage,
/// construction, concatenation and the arithmetic operators only need this.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Required where an ordering is needed: pivot comparisons, the eigen-system
/// solvers and balancing thresholds.
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support linear algebra operations.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). Real types get the identity conjugate and `IS_REAL = true`;
/// the complex impl overrides both, which is how the Hermitian and unitary
/// predicates diverge from their symmetric and orthogonal counterparts.
pub trait LinalgScalar: Scalar + core::ops::Neg<Output = Self> {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// `true` for real scalars, `false` for complex ones.
    const IS_REAL: bool;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn im(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Tolerance used for "effectively equal" decisions (rank, singularity,
    /// pivot selection, matrix equality). `1e-5` for both float widths.
    fn precision() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;
}

/// Concrete impls for real floats: trivial delegation.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;
                const IS_REAL: bool = true;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn im(self) -> $t { 0.0 }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn precision() -> $t { 1e-5 }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;
    const IS_REAL: bool = false;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn im(self) -> T {
        self.im
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn precision() -> T {
        T::precision()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}

// ── Tolerance comparisons ──────────────────────────────────────────

/// `|a - b| < precision`.
#[inline]
pub fn tol_eq<T: LinalgScalar>(a: T, b: T) -> bool {
    (a - b).modulus() < T::precision()
}

/// `a` is less than `b` by at least `precision`.
#[inline]
pub fn tol_lt<R: FloatScalar>(a: R, b: R) -> bool {
    b - a >= R::precision()
}

/// `a` exceeds `b` by at least `precision`.
#[inline]
pub fn tol_gt<R: FloatScalar>(a: R, b: R) -> bool {
    a - b >= R::precision()
}

/// Convert an `f64` literal into the working float type.
#[inline]
pub(crate) fn lit<R: Float>(x: f64) -> R {
    R::from(x).unwrap_or_else(R::nan)
}

/// Read-only access to a matrix-like type, 0-based.
///
/// The in-place kernels in [`crate::linalg`] are written against this trait
/// and [`MatrixMut`] rather than against [`crate::Matrix`] directly.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (echelon reduction, LUP, QR sweeps) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap two elements.
    #[inline]
    fn swap_elements(&mut self, a: (usize, usize), b: (usize, usize))
    where
        T: Copy,
    {
        let tmp = *self.get(a.0, a.1);
        *self.get_mut(a.0, a.1) = *self.get(b.0, b.1);
        *self.get_mut(b.0, b.1) = tmp;
    }
}
