//! Point Registry: an insertion-ordered, index-addressed set of latent points.
//!
//! # Index policy
//!
//! [`delete_point`](PointRegistry::delete_point),
//! [`modify_point`](PointRegistry::modify_point),
//! [`move_point`](PointRegistry::move_point) and
//! [`select`](PointRegistry::select) silently ignore out-of-range indices.
//! This leniency is deliberate: UI callers routinely race their own list
//! state, and a stale index must not abort the request. Callers that need
//! to know whether anything happened should compare [`len`](PointRegistry::len)
//! before and after.

use super::point::{LatentPoint, Position};
use super::sampling::{SamplingMode, WeightedSampler};
use crate::error::Result;
use tracing::debug;

/// Ordered collection of [`LatentPoint`]s.
///
/// The registry owns every point exclusively; vectors are moved in. One
/// registry serves one unit of work at a time; see
/// [`SharedRegistry`](crate::highlevel::SharedRegistry) for hosts that
/// share one across threads.
#[derive(Clone, Debug, Default)]
pub struct PointRegistry {
    points: Vec<LatentPoint>,
    selected: Option<usize>,
}

impl PointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LatentPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LatentPoint> {
        self.points.iter()
    }

    /// Dimensionality of the first point that carries a vector.
    pub fn dimensions(&self) -> Option<usize> {
        self.points.iter().find_map(LatentPoint::dimensions)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a point. Duplicate labels are allowed.
    pub fn add_point(&mut self, label: impl Into<String>, vector: Option<Vec<f64>>, position: Option<Position>) {
        self.points.push(LatentPoint::new(label, vector, position));
    }

    /// Remove the point at `index`; no-op when out of range.
    ///
    /// A selection on the removed point is cleared; a selection after it
    /// shifts down to keep tracking the same point.
    pub fn delete_point(&mut self, index: usize) {
        if index >= self.points.len() {
            debug!(index, len = self.points.len(), "delete_point: index out of range, ignored");
            return;
        }
        self.points.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
    }

    /// Replace label and vector of the point at `index`, keeping its
    /// position; no-op when out of range.
    pub fn modify_point(&mut self, index: usize, label: impl Into<String>, vector: Option<Vec<f64>>) {
        let Some(point) = self.points.get_mut(index) else {
            debug!(index, "modify_point: index out of range, ignored");
            return;
        };
        point.label = label.into();
        point.vector = vector;
    }

    /// Relocate the point at `index`; no-op when out of range.
    pub fn move_point(&mut self, index: usize, position: Position) {
        let Some(point) = self.points.get_mut(index) else {
            debug!(index, "move_point: index out of range, ignored");
            return;
        };
        point.move_to(position);
    }

    /// Remove every point and the selection.
    pub fn clear(&mut self) {
        self.points.clear();
        self.selected = None;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Mark the point at `index` as selected; no-op when out of range.
    pub fn select(&mut self, index: usize) {
        if index >= self.points.len() {
            debug!(index, len = self.points.len(), "select: index out of range, ignored");
            return;
        }
        self.selected = Some(index);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_point(&self) -> Option<&LatentPoint> {
        self.selected.and_then(|i| self.points.get(i))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Vectors in registry order (`None` for points without an encoding).
    pub fn vectors(&self) -> Vec<Option<&[f64]>> {
        self.points.iter().map(|p| p.vector.as_deref()).collect()
    }

    /// Labels in registry order.
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// `N × 2` matrix of positions in registry order.
    pub fn positions(&self) -> Vec<Position> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Sample with the default [`WeightedSampler`].
    pub fn sample(&self, query: Position, mode: SamplingMode) -> Result<Option<Vec<f64>>> {
        WeightedSampler::new().sample(self, query, mode)
    }
}
