#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Steerers Linalg
//!
//! Small dense-matrix substrate for descriptor steering: a row-major `f32`
//! matrix type plus the handful of operations the steerer module needs.
//!
//! ## Key Features
//!
//! - **GEMM-backed products**: matrix multiply and linear-layer application
//!   via `matrixmultiply::sgemm`
//! - **Block-diagonal assembly**: build generators from repeated blocks
//! - **Matrix exponential**: scaling-and-squaring for Lie-algebra generators
//! - **Row normalization**: L2 normalization along the descriptor axis
//!
//! ## Example
//!
//! ```
//! use steerers_linalg::{ops, Matrix};
//!
//! let a = Matrix::from_shape_vec(1, 2, vec![1.0, 2.0])?;
//! let b = Matrix::identity(2);
//! let c = ops::matmul(&a, &b)?;
//!
//! assert_eq!(c.as_slice(), &[1.0, 2.0]);
//! # Ok::<(), steerers_linalg::LinalgError>(())
//! ```

/// Error types for matrix operations.
pub mod error;

/// Dense row-major `f32` matrix type.
pub mod matrix;

/// Matrix operations: products, block assembly, exponential, normalization.
pub mod ops;

pub use error::LinalgError;
pub use matrix::Matrix;
