use steerers_linalg::LinalgError;
use thiserror::Error;

/// An error type for steerer construction and application.
#[derive(Error, Debug, PartialEq)]
pub enum SteererError {
    /// Error from the underlying matrix operations, e.g. a descriptor batch
    /// whose width does not match the generator dimension.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// The generator matrix is not square.
    #[error("Generator must be square, got {0}x{1}")]
    NonSquareGenerator(usize, usize),

    /// The requested pretrained generator type does not exist.
    #[error("Unknown generator type '{0}', expected one of 'C4', 'SO2'")]
    InvalidGeneratorType(String),

    /// The discretisation order must be a positive integer.
    #[error("Steerer order must be positive, got {0}")]
    InvalidSteererOrder(usize),
}
