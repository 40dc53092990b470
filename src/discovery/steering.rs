//! Moving an encoding along a discovered direction.

use crate::error::{FaceForgeError, Result};
use crate::kernel::linalg::axpy;

/// `encoding + alpha * direction`.
pub fn apply_direction(encoding: &[f64], direction: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if encoding.len() != direction.len() {
        return Err(FaceForgeError::DimensionMismatch {
            expected: encoding.len(),
            got: direction.len(),
        });
    }
    let mut out = encoding.to_vec();
    axpy(alpha, direction, &mut out);
    Ok(out)
}

/// Evenly spaced steps `alpha ∈ [-max_alpha, max_alpha]` along `direction`,
/// e.g. to render an attribute slider strip.
pub fn direction_sweep(encoding: &[f64], direction: &[f64], max_alpha: f64, steps: usize) -> Result<Vec<Vec<f64>>> {
    if steps < 2 {
        return Err(FaceForgeError::InvalidArgument(format!(
            "a sweep needs at least 2 steps, got {}",
            steps
        )));
    }
    let stride = 2.0 * max_alpha / (steps - 1) as f64;
    (0..steps)
        .map(|i| apply_direction(encoding, direction, -max_alpha + stride * i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_direction() {
        let out = apply_direction(&[1.0, 1.0], &[0.0, 1.0], 2.5).unwrap();
        assert_eq!(out, vec![1.0, 3.5]);
        assert!(apply_direction(&[1.0], &[0.0, 1.0], 1.0).is_err());
    }

    #[test]
    fn test_direction_sweep_is_symmetric() {
        let sweep = direction_sweep(&[0.0, 0.0], &[1.0, 0.0], 3.0, 3).unwrap();
        assert_eq!(sweep, vec![vec![-3.0, 0.0], vec![0.0, 0.0], vec![3.0, 0.0]]);
        assert!(direction_sweep(&[0.0], &[1.0], 1.0, 1).is_err());
    }
}
