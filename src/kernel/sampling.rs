//! Weighted Sampling Engine: interpolate registry vectors around a query
//! position on the canvas.
//!
//! Each point receives an unnormalized weight from its position and the
//! query, weights are normalized to sum to 1, and the output is the
//! weighted sum of the vectors that exist.
//!
//! | Mode | Weight | Sign |
//! |------|--------|------|
//! | `distance` | `1 / (1 + ‖p − q‖²)` | always > 0 |
//! | `circle` | `p · q` | any |
//!
//! `circle` is a raw dot product, not an angular or distance measure. It is
//! kept literal; a query orthogonal (on aggregate) to the positions makes
//! the total weight vanish relative to the weight mass `Σ|w|`, which is
//! reported as [`FaceForgeError::DegenerateWeights`]. Non-finite positions
//! surface the same way.

use super::linalg::{axpy, dot, squared_distance};
use super::point::Position;
use super::registry::PointRegistry;
use crate::error::{FaceForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Spatial weighting rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Inverse-quadratic proximity: `1 / (1 + ‖p − q‖²)`.
    #[default]
    Distance,
    /// Raw dot product `p · q`. Can be negative.
    Circle,
}

impl SamplingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMode::Distance => "distance",
            SamplingMode::Circle => "circle",
        }
    }

    /// Unnormalized weight of a point at `position` for `query`.
    #[inline]
    pub fn raw_weight(&self, position: &Position, query: &Position) -> f64 {
        match self {
            SamplingMode::Distance => 1.0 / (1.0 + squared_distance(position, query)),
            SamplingMode::Circle => dot(position, query),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMode {
    type Err = FaceForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "distance" => Ok(SamplingMode::Distance),
            "circle" => Ok(SamplingMode::Circle),
            other => Err(FaceForgeError::InvalidArgument(format!(
                "Unknown sampling mode: {}",
                other
            ))),
        }
    }
}

/// How weight mass of points without a vector is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Normalize over every point. Vector-less points absorb their share of
    /// the mass, so the output is shrunk toward zero when they are near.
    #[default]
    AllPoints,
    /// Normalize over vector-bearing points only.
    VectorBearing,
}

/// Sampler parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Totals with `|Σw| <= zero_weight_epsilon · Σ|w|` are degenerate.
    pub zero_weight_epsilon: f64,
    pub policy: WeightPolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            zero_weight_epsilon: 1e-12,
            policy: WeightPolicy::AllPoints,
        }
    }
}

/// Produces interpolated vectors from a [`PointRegistry`].
#[derive(Clone, Debug, Default)]
pub struct WeightedSampler {
    config: SamplerConfig,
}

impl WeightedSampler {
    /// Sampler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Normalized per-point weights, in registry order.
    ///
    /// Under [`WeightPolicy::VectorBearing`] points without a vector get
    /// weight 0 and the rest sum to 1. Returns an empty vector for an empty
    /// registry.
    pub fn weights(&self, registry: &PointRegistry, query: Position, mode: SamplingMode) -> Result<Vec<f64>> {
        let mut weights: Vec<f64> = registry
            .iter()
            .map(|p| match self.config.policy {
                WeightPolicy::VectorBearing if !p.has_vector() => 0.0,
                _ => mode.raw_weight(&p.position, &query),
            })
            .collect();
        if weights.is_empty() {
            return Ok(weights);
        }

        // Cancellation is judged against the weight mass, so the check is
        // independent of the coordinate scale.
        let total: f64 = weights.iter().sum();
        let mass: f64 = weights.iter().map(|w| w.abs()).sum();
        if !total.is_finite() || mass == 0.0 || total.abs() <= self.config.zero_weight_epsilon * mass {
            return Err(FaceForgeError::DegenerateWeights { total });
        }
        for w in weights.iter_mut() {
            *w /= total;
        }
        Ok(weights)
    }

    /// Interpolate a new vector at `query`.
    ///
    /// Returns `Ok(None)` when the registry is empty or no point carries a
    /// vector. Vectors of differing length are a
    /// [`FaceForgeError::DimensionMismatch`]; non-finite vector entries, or an
    /// output that overflows, are a [`FaceForgeError::DegenerateComputation`].
    pub fn sample(&self, registry: &PointRegistry, query: Position, mode: SamplingMode) -> Result<Option<Vec<f64>>> {
        let Some(dim) = registry.dimensions() else {
            debug!(points = registry.len(), %mode, "sample: no vectors, empty result");
            return Ok(None);
        };
        for (index, point) in registry.iter().enumerate() {
            let Some(vector) = &point.vector else {
                continue;
            };
            if vector.len() != dim {
                return Err(FaceForgeError::DimensionMismatch {
                    expected: dim,
                    got: vector.len(),
                });
            }
            if vector.iter().any(|x| !x.is_finite()) {
                return Err(FaceForgeError::DegenerateComputation(format!(
                    "point {} ({}) has a non-finite vector",
                    index, point.label
                )));
            }
        }

        let weights = self.weights(registry, query, mode)?;

        let mut result = vec![0.0; dim];
        for (w, point) in weights.iter().zip(registry.iter()) {
            if let Some(vector) = &point.vector {
                axpy(*w, vector, &mut result);
            }
        }

        if result.iter().any(|x| !x.is_finite()) {
            return Err(FaceForgeError::DegenerateComputation(
                "interpolated vector is not finite".into(),
            ));
        }

        debug!(
            points = registry.len(),
            dim,
            %mode,
            policy = ?self.config.policy,
            "sample: interpolated vector"
        );
        Ok(Some(result))
    }
}
