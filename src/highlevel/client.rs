//! Convenience wrapper that owns a [`PointRegistry`] plus configuration and
//! delegates to the kernel and discovery layers.
//!
//! For full control, import from [`kernel`](crate::kernel) and
//! [`discovery`](crate::discovery) directly.

use crate::config::ExplorerConfig;
use crate::discovery::{LatentDirectionFinder, PcaDirections};
use crate::error::Result;
use crate::kernel::{LatentPoint, PointRegistry, Position, SamplingMode, WeightedSampler};

/// One exploration session: a registry plus the sampler and solver settings
/// applied to it.
///
/// Each session owns its registry; nothing is shared between `Explorer`
/// instances, so a host can give every request or user its own.
///
/// # Example
///
/// ```rust
/// use faceforge::highlevel::Explorer;
///
/// let mut explorer = Explorer::new();
/// explorer.add_point("smile", Some(vec![1.0, 0.0]), Some([0.0, 0.0]));
/// explorer.add_point("frown", Some(vec![0.0, 1.0]), Some([1.0, 0.0]));
///
/// let blend = explorer.sample_str([0.5, 0.0], "distance").unwrap().unwrap();
/// assert!((blend[0] - blend[1]).abs() < 1e-9);
///
/// assert!(explorer.sample_str([0.5, 0.0], "spiral").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Explorer {
    registry: PointRegistry,
    sampler: WeightedSampler,
    config: ExplorerConfig,
}

impl Explorer {
    /// Create an explorer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExplorerConfig) -> Self {
        Self {
            registry: PointRegistry::new(),
            sampler: WeightedSampler::with_config(config.sampler.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn registry(&self) -> &PointRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PointRegistry {
        &mut self.registry
    }

    // =========================================================================
    // Registry
    // =========================================================================

    pub fn add_point(&mut self, label: impl Into<String>, vector: Option<Vec<f64>>, position: Option<Position>) {
        self.registry.add_point(label, vector, position);
    }

    /// No-op when `index` is out of range.
    pub fn delete_point(&mut self, index: usize) {
        self.registry.delete_point(index);
    }

    /// No-op when `index` is out of range.
    pub fn modify_point(&mut self, index: usize, label: impl Into<String>, vector: Option<Vec<f64>>) {
        self.registry.modify_point(index, label, vector);
    }

    /// No-op when `index` is out of range.
    pub fn move_point(&mut self, index: usize, position: Position) {
        self.registry.move_point(index, position);
    }

    pub fn select(&mut self, index: usize) {
        self.registry.select(index);
    }

    pub fn selected_point(&self) -> Option<&LatentPoint> {
        self.registry.selected_point()
    }

    /// Drop every point, e.g. before handling a new request.
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    pub fn vectors(&self) -> Vec<Option<&[f64]>> {
        self.registry.vectors()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.registry.labels()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.registry.positions()
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    pub fn sample(&self, query: Position, mode: SamplingMode) -> Result<Option<Vec<f64>>> {
        self.sampler.sample(&self.registry, query, mode)
    }

    /// Sample with a mode name as received over the wire.
    pub fn sample_str(&self, query: Position, mode: &str) -> Result<Option<Vec<f64>>> {
        self.sample(query, mode.parse()?)
    }

    /// Sample with the configured default mode.
    pub fn sample_default(&self, query: Position) -> Result<Option<Vec<f64>>> {
        self.sample(query, self.config.default_mode)
    }

    /// Normalized weight per point for `query`.
    pub fn weights(&self, query: Position, mode: SamplingMode) -> Result<Vec<f64>> {
        self.sampler.weights(&self.registry, query, mode)
    }

    // =========================================================================
    // Direction discovery
    // =========================================================================

    /// Direction finder over `latents` using this explorer's solver settings.
    pub fn direction_finder(&self, latents: Vec<Vec<f64>>) -> Result<LatentDirectionFinder> {
        Ok(LatentDirectionFinder::new(latents)?
            .with_pca_config(self.config.pca.clone())
            .with_classifier_config(self.config.classifier.clone()))
    }

    /// Direction finder over the vectors currently in the registry, in
    /// registry order, skipping points without a vector.
    pub fn registry_direction_finder(&self) -> Result<LatentDirectionFinder> {
        let latents = self
            .registry
            .iter()
            .filter_map(|p| p.vector.clone())
            .collect();
        self.direction_finder(latents)
    }

    pub fn pca_direction(&self, latents: Vec<Vec<f64>>, n_components: usize) -> Result<PcaDirections> {
        self.direction_finder(latents)?.pca_direction(n_components)
    }

    pub fn classifier_direction(&self, latents: Vec<Vec<f64>>, labels: &[u8]) -> Result<Vec<f64>> {
        self.direction_finder(latents)?.classifier_direction(labels)
    }
}
