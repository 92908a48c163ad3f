use thiserror::Error;

/// An error type for dense matrix operations.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The flat data length does not match the requested shape.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape.
        expected: usize,
        /// Actual number of elements in the data.
        actual: usize,
    },

    /// The operand shapes are incompatible for the operation.
    #[error("Shape mismatch: {0:?} is incompatible with {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// The operation requires a square matrix.
    #[error("Expected a square matrix, got {0}x{1}")]
    NotSquare(usize, usize),
}
