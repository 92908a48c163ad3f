use std::f32::consts::TAU;
use std::str::FromStr;

use steerers_linalg::{ops, LinalgError, Matrix};

use crate::error::SteererError;
use crate::steerer::DiscreteSteerer;

/// Descriptor dimension of the pretrained DeDoDe descriptors the canned
/// generators pair with.
pub const DESCRIPTOR_DIM: usize = 256;

/// The closed set of pretrained generator configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorType {
    /// Cyclic group of order 4: a block-diagonal permutation generator.
    C4,
    /// Rotation group discretized into `steerer_order` steps, built as the
    /// matrix exponential of a block-diagonal Lie-algebra generator.
    SO2,
}

impl FromStr for GeneratorType {
    type Err = SteererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C4" => Ok(Self::C4),
            "SO2" => Ok(Self::SO2),
            other => Err(SteererError::InvalidGeneratorType(other.to_string())),
        }
    }
}

impl std::fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::C4 => write!(f, "C4"),
            Self::SO2 => write!(f, "SO2"),
        }
    }
}

/// Block-diagonal repetition of the 4x4 cyclic permutation block.
fn c4_generator() -> Result<Matrix, LinalgError> {
    #[rustfmt::skip]
    let block = Matrix::from_shape_vec(4, 4, vec![
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
        1.0, 0.0, 0.0, 0.0,
    ])?;
    Ok(ops::block_diag(&vec![block; DESCRIPTOR_DIM / 4]))
}

/// Lie-algebra generator for the SO2 steerer: a leading zero block followed
/// by six frequency bands of repeated 2x2 antisymmetric blocks.
///
/// The truncating integer arithmetic matches the pretrained DeDoDe-SO2
/// checkpoints; the block sizes do not round back up to
/// [`DESCRIPTOR_DIM`].
fn so2_lie_generator() -> Result<Matrix, LinalgError> {
    let zero_dim = DESCRIPTOR_DIM - 12 * DESCRIPTOR_DIM / 14;
    let reps = DESCRIPTOR_DIM / 14;

    let mut blocks = vec![Matrix::zeros(zero_dim, zero_dim)];
    for j in 1..=6 {
        let freq = j as f32;
        let block = Matrix::from_shape_vec(2, 2, vec![0.0, freq, -freq, 0.0])?;
        blocks.extend(vec![block; reps]);
    }
    Ok(ops::block_diag(&blocks))
}

impl DiscreteSteerer {
    /// Builds a steerer for pretrained DeDoDe descriptors from the paper
    /// <https://arxiv.org/abs/2312.02152>.
    ///
    /// # Arguments
    ///
    /// * `generator_type` - The pretrained generator configuration. These
    ///   can be used with the DeDoDe descriptors with C4 or SO2 in the name
    ///   respectively.
    /// * `steerer_order` - The discretisation order for SO2 steerers (NOT
    ///   used for C4 steerers); the reference setting is 8.
    ///
    /// # Errors
    ///
    /// Returns [`SteererError::InvalidSteererOrder`] for a zero order.
    ///
    /// # Example
    ///
    /// ```
    /// use steerers::{DiscreteSteerer, GeneratorType};
    ///
    /// let steerer = DiscreteSteerer::from_pretrained("SO2".parse()?, 8)?;
    /// # Ok::<(), steerers::SteererError>(())
    /// ```
    pub fn from_pretrained(
        generator_type: GeneratorType,
        steerer_order: usize,
    ) -> Result<Self, SteererError> {
        if steerer_order == 0 {
            return Err(SteererError::InvalidSteererOrder(steerer_order));
        }

        let generator = match generator_type {
            GeneratorType::C4 => c4_generator()?,
            GeneratorType::SO2 => {
                let lie_generator = so2_lie_generator()?;
                ops::expm(&lie_generator.scale(TAU / steerer_order as f32))?
            }
        };

        Self::new(generator)
    }
}
