#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Discrete Rotation Steerers
//!
//! A steerer rotates keypoint descriptions in latent space as if they were
//! obtained from rotated images, by applying a square generator matrix as a
//! linear map over descriptor vectors.
//!
//! ## Key Features
//!
//! - **Linear steering**: repeatable application of a generator matrix with
//!   optional L2 normalization
//! - **Pretrained generators**: canned `C4` (cyclic) and `SO2` (rotation)
//!   configurations for 256-dimensional descriptors
//!
//! ## Example
//!
//! ```
//! use steerers::{DiscreteSteerer, GeneratorType};
//! use steerers_linalg::Matrix;
//!
//! let steerer = DiscreteSteerer::from_pretrained(GeneratorType::C4, 8)?;
//!
//! // a batch of two 256-dimensional descriptors
//! let descriptions = Matrix::zeros(2, 256);
//! let steered = steerer.steer_descriptions(&descriptions, 3, true)?;
//!
//! assert_eq!(steered.shape(), [2, 256]);
//! # Ok::<(), steerers::SteererError>(())
//! ```

/// Error types for steerer operations.
pub mod error;

/// Pretrained generator configurations.
pub mod pretrained;

/// The discrete steerer module.
pub mod steerer;

pub use error::SteererError;
pub use pretrained::{GeneratorType, DESCRIPTOR_DIM};
pub use steerer::DiscreteSteerer;
