//! Kernel layer — latent points, the point registry, and weighted sampling.
//!
//! - [`LatentPoint`] — a (label, vector, position) triple
//! - [`PointRegistry`] — ordered, index-addressed point collection
//! - [`WeightedSampler`] — interpolates registry vectors around a query
//! - [`LatentSeeder`] — deterministic label → Gaussian latent vectors
//! - [`linalg`] — slice-level vector helpers shared with
//!   [`discovery`](crate::discovery)
//!
//! This layer has no dependencies on [`discovery`](crate::discovery) or
//! [`highlevel`](crate::highlevel).
//!
//! # Example
//!
//! ```rust
//! use faceforge::kernel::{PointRegistry, SamplingMode};
//!
//! let mut registry = PointRegistry::new();
//! registry.add_point("A", Some(vec![1.0, 0.0]), Some([0.0, 0.0]));
//! registry.add_point("B", Some(vec![0.0, 1.0]), Some([1.0, 0.0]));
//!
//! let mid = registry.sample([0.5, 0.0], SamplingMode::Distance).unwrap().unwrap();
//! assert!((mid[0] - 0.5).abs() < 1e-9);
//! ```

pub mod linalg;
pub mod point;
pub mod registry;
pub mod sampling;
pub mod seeder;

pub use point::{LatentPoint, Position};
pub use registry::PointRegistry;
pub use sampling::{SamplerConfig, SamplingMode, WeightPolicy, WeightedSampler};
pub use seeder::LatentSeeder;
