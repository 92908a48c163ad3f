use crate::error::LinalgError;
use crate::matrix::Matrix;

/// Epsilon floor for row normalization, so zero rows divide by the floor
/// instead of by zero.
const NORMALIZE_EPS: f32 = 1e-12;

/// Maximum number of Taylor terms summed by [`expm`].
const EXPM_MAX_TERMS: usize = 32;

/// Computes the matrix product `a · b` using `matrixmultiply::sgemm`.
///
/// # Errors
///
/// Returns [`LinalgError::ShapeMismatch`] if `a.cols() != b.rows()`.
///
/// # Example
///
/// ```
/// use steerers_linalg::{ops, Matrix};
///
/// let a = Matrix::from_shape_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
/// let b = Matrix::from_shape_vec(2, 1, vec![1.0, 1.0])?;
/// let c = ops::matmul(&a, &b)?;
///
/// assert_eq!(c.as_slice(), &[3.0, 7.0]);
/// # Ok::<(), steerers_linalg::LinalgError>(())
/// ```
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.cols() != b.rows() {
        return Err(LinalgError::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut dst = Matrix::zeros(m, n);

    unsafe {
        matrixmultiply::sgemm(
            /* m */ m,
            /* k */ k,
            /* n */ n,
            /* alpha */ 1.0,
            /* a */ a.as_slice().as_ptr(),
            /* rsa */ k as isize,
            /* csa */ 1,
            /* b */ b.as_slice().as_ptr(),
            /* rsb */ n as isize,
            /* csb */ 1,
            /* beta */ 0.0,
            /* c */ dst.as_mut_slice().as_mut_ptr(),
            /* rsc */ n as isize,
            /* csc */ 1,
        );
    }

    Ok(dst)
}

/// Applies a linear layer without bias: `src · weightᵀ`.
///
/// `src` has shape `[M, D]` and `weight` has shape `[N, D]` (row-major,
/// standard linear layer layout); the output has shape `[M, N]`.
///
/// # Errors
///
/// Returns [`LinalgError::ShapeMismatch`] if `src.cols() != weight.cols()`.
pub fn linear(src: &Matrix, weight: &Matrix) -> Result<Matrix, LinalgError> {
    if src.cols() != weight.cols() {
        return Err(LinalgError::ShapeMismatch(
            src.shape().to_vec(),
            weight.shape().to_vec(),
        ));
    }

    let (m, k, n) = (src.rows(), src.cols(), weight.rows());
    let mut dst = Matrix::zeros(m, n);

    // weight is [N, D] row-major; swapping its strides reads it as the
    // [D, N] transpose without materializing it.
    unsafe {
        matrixmultiply::sgemm(
            /* m */ m,
            /* k */ k,
            /* n */ n,
            /* alpha */ 1.0,
            /* a */ src.as_slice().as_ptr(),
            /* rsa */ k as isize,
            /* csa */ 1,
            /* b */ weight.as_slice().as_ptr(),
            /* rsb */ 1,
            /* csb */ k as isize,
            /* beta */ 0.0,
            /* c */ dst.as_mut_slice().as_mut_ptr(),
            /* rsc */ n as isize,
            /* csc */ 1,
        );
    }

    Ok(dst)
}

/// Element-wise sum of two equally shaped matrices.
///
/// # Errors
///
/// Returns [`LinalgError::ShapeMismatch`] if the shapes differ.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.shape() != b.shape() {
        return Err(LinalgError::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }

    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x + y)
        .collect();

    Matrix::from_shape_vec(a.rows(), a.cols(), data)
}

/// Assembles a block-diagonal matrix from the given blocks.
///
/// The output has the sum of the block row counts by the sum of the block
/// column counts, with each block placed along the diagonal in order and
/// zeros elsewhere. An empty slice yields a `0 x 0` matrix.
///
/// # Example
///
/// ```
/// use steerers_linalg::{ops, Matrix};
///
/// let block = Matrix::identity(2);
/// let m = ops::block_diag(&[block.clone(), block]);
///
/// assert_eq!(m.shape(), [4, 4]);
/// assert_eq!(m.get(2, 2), 1.0);
/// assert_eq!(m.get(0, 2), 0.0);
/// ```
pub fn block_diag(blocks: &[Matrix]) -> Matrix {
    let rows: usize = blocks.iter().map(Matrix::rows).sum();
    let cols: usize = blocks.iter().map(Matrix::cols).sum();
    let mut out = Matrix::zeros(rows, cols);

    let mut row_offset = 0;
    let mut col_offset = 0;
    for block in blocks {
        for r in 0..block.rows() {
            for c in 0..block.cols() {
                let idx = (row_offset + r) * cols + (col_offset + c);
                out.as_mut_slice()[idx] = block.get(r, c);
            }
        }
        row_offset += block.rows();
        col_offset += block.cols();
    }

    out
}

/// Infinity norm: the maximum absolute row sum.
fn inf_norm(a: &Matrix) -> f32 {
    (0..a.rows())
        .map(|r| a.row(r).iter().map(|x| x.abs()).sum::<f32>())
        .fold(0.0, f32::max)
}

/// Computes the matrix exponential by scaling and squaring.
///
/// The input is halved until its infinity norm is at most 0.5, the
/// exponential of the scaled matrix is summed as a truncated Taylor series,
/// and the result is squared back up.
///
/// # Errors
///
/// Returns [`LinalgError::NotSquare`] if the input is not square.
pub fn expm(a: &Matrix) -> Result<Matrix, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare(a.rows(), a.cols()));
    }
    let n = a.rows();

    let norm = inf_norm(a);
    let squarings = if norm > 0.5 {
        (norm / 0.5).log2().ceil() as u32
    } else {
        0
    };
    let scaled = a.scale(0.5f32.powi(squarings as i32));

    let mut result = Matrix::identity(n);
    let mut term = Matrix::identity(n);
    for k in 1..=EXPM_MAX_TERMS {
        term = matmul(&term, &scaled)?.scale(1.0 / k as f32);
        result = add(&result, &term)?;
        if inf_norm(&term) < f32::EPSILON {
            break;
        }
    }

    for _ in 0..squarings {
        result = matmul(&result, &result)?;
    }

    Ok(result)
}

/// L2-normalizes each row along the column axis.
///
/// Each row is divided by `max(norm, 1e-12)`, matching the epsilon floor of
/// standard normalization semantics; zero rows pass through unchanged.
pub fn l2_normalize_rows(m: &Matrix) -> Matrix {
    let cols = m.cols();
    if cols == 0 {
        return m.clone();
    }

    let mut out = m.clone();
    for row in out.as_mut_slice().chunks_exact_mut(cols) {
        let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
        let denom = norm.max(NORMALIZE_EPS);
        for x in row.iter_mut() {
            *x /= denom;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_matmul() {
        let a = Matrix::from_shape_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_shape_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), [2, 2]);
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert_eq!(
            matmul(&a, &b),
            Err(LinalgError::ShapeMismatch(vec![2, 3], vec![2, 3]))
        );
    }

    #[test]
    fn test_linear_matches_reference() {
        let src = Matrix::from_shape_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let weight = Matrix::from_shape_vec(2, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let dst = linear(&src, &weight).unwrap();

        // from pytorch: F.linear without bias
        let expected = [1.4, 3.2];
        for (a, e) in dst.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_linear_equals_matmul_with_transpose() {
        let src = Matrix::from_shape_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let weight = Matrix::from_shape_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let transposed = Matrix::from_shape_vec(2, 2, vec![5.0, 7.0, 6.0, 8.0]).unwrap();

        let via_linear = linear(&src, &weight).unwrap();
        let via_matmul = matmul(&src, &transposed).unwrap();
        assert_eq!(via_linear, via_matmul);
    }

    #[test]
    fn test_linear_shape_mismatch() {
        let src = Matrix::zeros(1, 3);
        let weight = Matrix::zeros(4, 4);
        assert!(linear(&src, &weight).is_err());
    }

    #[test]
    fn test_add() {
        let a = Matrix::from_shape_vec(1, 2, vec![1.0, 2.0]).unwrap();
        let b = Matrix::from_shape_vec(1, 2, vec![-1.0, 0.5]).unwrap();
        assert_eq!(add(&a, &b).unwrap().as_slice(), &[0.0, 2.5]);
        assert!(add(&a, &Matrix::zeros(2, 1)).is_err());
    }

    #[test]
    fn test_block_diag_placement() {
        let a = Matrix::from_shape_vec(1, 1, vec![2.0]).unwrap();
        let b = Matrix::from_shape_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let m = block_diag(&[a, b]);

        assert_eq!(m.shape(), [3, 3]);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(2, 1), 3.0);
        // off-diagonal stays zero
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(2, 0), 0.0);
    }

    #[test]
    fn test_block_diag_empty() {
        let m = block_diag(&[]);
        assert_eq!(m.shape(), [0, 0]);
    }

    #[test]
    fn test_expm_zero_is_identity() {
        let exp = expm(&Matrix::zeros(3, 3)).unwrap();
        assert_eq!(exp, Matrix::identity(3));
    }

    #[test]
    fn test_expm_diagonal() {
        let a = Matrix::from_shape_vec(2, 2, vec![1.0, 0.0, 0.0, 2.0]).unwrap();
        let exp = expm(&a).unwrap();
        assert_relative_eq!(exp.get(0, 0), 1.0f32.exp(), epsilon = 1e-4);
        assert_relative_eq!(exp.get(1, 1), 2.0f32.exp(), epsilon = 1e-4);
        assert_relative_eq!(exp.get(0, 1), 0.0, epsilon = EPSILON);
        assert_relative_eq!(exp.get(1, 0), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_expm_antisymmetric_is_rotation() {
        let theta = 0.3f32;
        let a = Matrix::from_shape_vec(2, 2, vec![0.0, theta, -theta, 0.0]).unwrap();
        let exp = expm(&a).unwrap();

        assert_relative_eq!(exp.get(0, 0), theta.cos(), epsilon = 1e-5);
        assert_relative_eq!(exp.get(0, 1), theta.sin(), epsilon = 1e-5);
        assert_relative_eq!(exp.get(1, 0), -theta.sin(), epsilon = 1e-5);
        assert_relative_eq!(exp.get(1, 1), theta.cos(), epsilon = 1e-5);
    }

    #[test]
    fn test_expm_not_square() {
        assert_eq!(
            expm(&Matrix::zeros(2, 3)),
            Err(LinalgError::NotSquare(2, 3))
        );
    }

    #[test]
    fn test_l2_normalize_rows() {
        let m = Matrix::from_shape_vec(2, 2, vec![3.0, 4.0, 0.0, -2.0]).unwrap();
        let normalized = l2_normalize_rows(&m);

        assert_relative_eq!(normalized.get(0, 0), 0.6, epsilon = EPSILON);
        assert_relative_eq!(normalized.get(0, 1), 0.8, epsilon = EPSILON);
        assert_relative_eq!(normalized.get(1, 1), -1.0, epsilon = EPSILON);

        for r in 0..2 {
            let norm = normalized.row(r).iter().map(|x| x * x).sum::<f32>().sqrt();
            assert_relative_eq!(norm, 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_l2_normalize_random_rows() {
        let mut rng = rand::rng();
        let data = (0..8 * 16).map(|_| rng.random_range(-1.0..1.0)).collect();
        let m = Matrix::from_shape_vec(8, 16, data).unwrap();

        let normalized = l2_normalize_rows(&m);
        for r in 0..normalized.rows() {
            let norm = normalized.row(r).iter().map(|x| x * x).sum::<f32>().sqrt();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_l2_normalize_zero_row() {
        let m = Matrix::zeros(1, 4);
        let normalized = l2_normalize_rows(&m);
        assert_eq!(normalized.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }
}
