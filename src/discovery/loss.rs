//! Attribute-preserving loss for judging a steered generation.
//!
//! ```text
//! L = λ_pred · MSE(f_attr(G(z + αd)), y_target) + λ_recon · MSE(G(z + αd), G(z))
//! ```
//!
//! The first term rewards hitting the target attribute, the second
//! penalises drifting away from the original identity. Buffers are flat
//! `f64` slices; any shape bookkeeping stays with the caller.

use crate::error::{FaceForgeError, Result};
use serde::{Deserialize, Serialize};

/// Term weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LossWeights {
    pub lambda_pred: f64,
    pub lambda_recon: f64,
}

impl Default for LossWeights {
    fn default() -> Self {
        Self {
            lambda_pred: 1.0,
            lambda_recon: 1.0,
        }
    }
}

/// Mean squared difference of two equal-length buffers.
pub fn mse(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.is_empty() {
        return Err(FaceForgeError::EmptyInput("mse over empty buffer".into()));
    }
    if a.len() != b.len() {
        return Err(FaceForgeError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>() / a.len() as f64)
}

/// Evaluate the loss for one generated/original pair.
///
/// `predictor` maps a generated buffer to attribute predictions comparable
/// with `y_target`.
pub fn attribute_preserving_loss<F>(
    generated: &[f64],
    original: &[f64],
    predictor: F,
    y_target: &[f64],
    weights: LossWeights,
) -> Result<f64>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let predicted = predictor(generated);
    let pred_loss = mse(&predicted, y_target)?;
    let recon_loss = mse(generated, original)?;
    Ok(weights.lambda_pred * pred_loss + weights.lambda_recon * recon_loss)
}
