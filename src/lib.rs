//! # corematrix
//!
//! Generic dense matrices with runtime dimensions: arithmetic, row reduction,
//! linear systems, LUP, Cholesky and Hessenberg decompositions, and
//! eigen-systems of real matrices. `no_std` compatible (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use corematrix::Matrix;
//! use corematrix::linalg::SolutionStatus;
//!
//! // Values are given row by row; storage is column-major.
//! let a = Matrix::from_row_major(2, 2, &[1.0_f64, 1.0, 1.0, -1.0]);
//! let b = Matrix::column_vector(&[3.0, 1.0]);
//!
//! let x = a.solve(&b);
//! assert_eq!(x.status(), SolutionStatus::Unique);
//! assert_eq!(x.into_matrix(), Matrix::column_vector(&[2.0, 1.0]));
//!
//! assert_eq!(a.det(), -2.0);
//! assert_eq!(&a * &a.inv(), Matrix::identity(2));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: [`Matrix<T>`], column-major `Vec<T>` storage, 1-indexed
//!   `m[(i, j)]` access. Operations that cannot produce a valid result return
//!   the **null** matrix (`0 x 0`) rather than panicking or erroring.
//!
//! - [`linalg`]: 0-based in-place kernels on `&mut impl MatrixMut<T>`:
//!   elementary operations, echelon and row-canonical reduction, Gaussian
//!   elimination, LUP, Cholesky–Crout, balancing, Hessenberg reduction,
//!   Householder + QL for symmetric matrices and Francis QR (`hqr`, `hqr2`)
//!   for general ones. Decompositions report failure through
//!   [`linalg::LinalgError`].
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: storage and arithmetic (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`LinalgScalar`]: real floats and complex numbers, with the
//!     comparison tolerance used throughout
//!   - [`FloatScalar`]: real floats, needed wherever an ordering is
//!   - [`MatrixRef`] / [`MatrixMut`]: read/write access for the kernels
//!
//! ## Tolerance
//!
//! Equality, rank, singularity and pivot decisions compare against
//! [`LinalgScalar::precision`] (`1e-5`) through [`tol_eq`], [`tol_lt`] and
//! [`tol_gt`]. The eigen iterations use machine epsilon instead.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | `std` support in num-traits, num-complex and thiserror |
//! | `libm`  | no      | Pure-Rust float fallback for `no_std` targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use matrix::{identity_permutation, Matrix, NormKind, Transform4};
pub use traits::{tol_eq, tol_gt, tol_lt, FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
