use steerers_linalg::{ops, Matrix};

use crate::error::SteererError;

/// A discrete rotation steerer.
///
/// Holds a single `[N, N]` generator matrix, where `N` is the descriptor
/// dimension, and applies it to batches of descriptor vectors with standard
/// linear layer semantics `x · Gᵀ` (no bias).
///
/// The steerer is immutable after construction, so shared references may be
/// used concurrently from multiple threads.
///
/// # Example
///
/// ```
/// use steerers::DiscreteSteerer;
/// use steerers_linalg::Matrix;
///
/// let generator = Matrix::from_shape_vec(2, 2, vec![0.0, 1.0, -1.0, 0.0])?;
/// let steerer = DiscreteSteerer::new(generator)?;
///
/// let descriptions = Matrix::from_shape_vec(1, 2, vec![3.0, 4.0])?;
/// let steered = steerer.steer_descriptions(&descriptions, 3, true)?;
///
/// assert_eq!(steered.shape(), [1, 2]);
/// # Ok::<(), steerers::SteererError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteSteerer {
    generator: Matrix,
}

impl DiscreteSteerer {
    /// Creates a steerer from a square generator matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SteererError::NonSquareGenerator`] if the matrix is not
    /// square.
    pub fn new(generator: Matrix) -> Result<Self, SteererError> {
        if !generator.is_square() {
            return Err(SteererError::NonSquareGenerator(
                generator.rows(),
                generator.cols(),
            ));
        }
        Ok(Self { generator })
    }

    /// The generator matrix.
    pub fn generator(&self) -> &Matrix {
        &self.generator
    }

    /// Consumes the steerer and returns its generator, e.g. for external
    /// parameter persistence.
    pub fn into_generator(self) -> Matrix {
        self.generator
    }

    /// Applies the generator once: `descriptions · generatorᵀ`.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch error if the descriptor width does not
    /// match the generator dimension.
    pub fn forward(&self, descriptions: &Matrix) -> Result<Matrix, SteererError> {
        Ok(ops::linear(descriptions, &self.generator)?)
    }

    /// Steers a batch of descriptions.
    ///
    /// Applies [`forward`](Self::forward) exactly `steerer_power` times; a
    /// power of zero returns the input unchanged. When `normalize` is true,
    /// each output row is L2-normalized along the descriptor axis. The
    /// input batch is never mutated.
    pub fn steer_descriptions(
        &self,
        descriptions: &Matrix,
        steerer_power: usize,
        normalize: bool,
    ) -> Result<Matrix, SteererError> {
        let mut descriptions = descriptions.clone();
        for _ in 0..steerer_power {
            descriptions = self.forward(&descriptions)?;
        }
        if normalize {
            descriptions = ops::l2_normalize_rows(&descriptions);
        }
        Ok(descriptions)
    }
}
