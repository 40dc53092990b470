//! [`LatentDirectionFinder`]: semantic directions for one batch of latents.

use super::classifier::{fit_logistic, ClassifierConfig, ClassifierFit};
use super::pca::{fit_pca, PcaConfig, PcaDirections};
use crate::error::{FaceForgeError, Result};

/// Discovers directions in an `N × D` batch of latent vectors.
///
/// The batch is validated and copied into a flat row-major buffer at
/// construction; afterwards the finder is read-only, so one instance can be
/// shared freely across threads.
///
/// # Example
///
/// ```rust
/// use faceforge::discovery::LatentDirectionFinder;
///
/// let latents = vec![
///     vec![0.0, 0.1], vec![0.2, 0.0], vec![0.1, 0.2],
///     vec![3.0, 3.1], vec![3.2, 2.9], vec![2.9, 3.0],
/// ];
/// let finder = LatentDirectionFinder::new(latents).unwrap();
///
/// let pca = finder.pca_direction(1).unwrap();
/// assert_eq!(pca.components[0].len(), 2);
///
/// let direction = finder.classifier_direction(&[0, 0, 0, 1, 1, 1]).unwrap();
/// assert!(direction[0] > 0.0 && direction[1] > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct LatentDirectionFinder {
    rows: usize,
    dim: usize,
    /// Row-major: data[r * dim .. (r + 1) * dim] = sample r.
    data: Vec<f64>,
    pca_config: PcaConfig,
    classifier_config: ClassifierConfig,
}

impl LatentDirectionFinder {
    /// Build from one vector per sample.
    pub fn new(latents: Vec<Vec<f64>>) -> Result<Self> {
        let rows = latents.len();
        let dim = latents.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows * dim);
        for row in &latents {
            if row.len() != dim {
                return Err(FaceForgeError::DimensionMismatch {
                    expected: dim,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_flat(data, rows, dim)
    }

    /// Build from a row-major `rows × dim` buffer.
    pub fn from_flat(data: Vec<f64>, rows: usize, dim: usize) -> Result<Self> {
        if rows == 0 || dim == 0 {
            return Err(FaceForgeError::EmptyInput(format!(
                "latent matrix is {} x {}",
                rows, dim
            )));
        }
        let expected = rows.checked_mul(dim).ok_or_else(|| {
            FaceForgeError::InvalidArgument(format!("latent matrix {} x {} overflows usize", rows, dim))
        })?;
        if data.len() != expected {
            return Err(FaceForgeError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(FaceForgeError::InvalidArgument(format!(
                "non-finite value at row {}, column {}",
                pos / dim,
                pos % dim
            )));
        }
        Ok(Self {
            rows,
            dim,
            data,
            pca_config: PcaConfig::default(),
            classifier_config: ClassifierConfig::default(),
        })
    }

    pub fn with_pca_config(mut self, config: PcaConfig) -> Self {
        self.pca_config = config;
        self
    }

    pub fn with_classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier_config = config;
        self
    }

    /// Number of samples `N`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Latent dimensionality `D`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        (index < self.rows).then(|| &self.data[index * self.dim..(index + 1) * self.dim])
    }

    /// Top `n_components` principal directions, `1 <= n_components <= min(N, D)`.
    pub fn pca_direction(&self, n_components: usize) -> Result<PcaDirections> {
        fit_pca(&self.data, self.rows, self.dim, n_components, &self.pca_config)
    }

    /// Fit the logistic separator for `labels` (one `0`/`1` per row).
    pub fn fit_classifier(&self, labels: &[u8]) -> Result<ClassifierFit> {
        fit_logistic(&self.data, self.rows, self.dim, labels, &self.classifier_config)
    }

    /// Unit normal of the decision boundary between the two label classes,
    /// oriented toward class `1`.
    pub fn classifier_direction(&self, labels: &[u8]) -> Result<Vec<f64>> {
        self.fit_classifier(labels)?.direction()
    }
}
