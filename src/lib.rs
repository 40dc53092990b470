//! # FaceForge: latent-space exploration
//!
//! FaceForge lets a caller pin labeled latent vectors to 2-D canvas
//! positions, blend them into new latents by spatial weighting, and
//! discover semantic directions (PCA or a logistic separator) in the same
//! space. It only produces and manipulates vectors; turning a latent into
//! an image is the caller's generator's job.
//!
//! ## Quick Start
//!
//! ```rust
//! use faceforge::{Explorer, LatentDirectionFinder, SamplingMode};
//!
//! let mut explorer = Explorer::new();
//! explorer.add_point("A", Some(vec![1.0, 0.0]), Some([0.0, 0.0]));
//! explorer.add_point("B", Some(vec![0.0, 1.0]), Some([1.0, 0.0]));
//!
//! // Equidistant query -> equal blend
//! let blend = explorer.sample([0.5, 0.0], SamplingMode::Distance)?.unwrap();
//! assert!((blend[0] - 0.5).abs() < 1e-9);
//!
//! // Directions from a batch of latents
//! let finder = LatentDirectionFinder::new(vec![
//!     vec![0.0, 0.0], vec![0.1, 0.2], vec![2.0, 2.1], vec![2.2, 1.9],
//! ])?;
//! let direction = finder.classifier_direction(&[0, 0, 1, 1])?;
//! assert_eq!(direction.len(), 2);
//! # Ok::<(), faceforge::FaceForgeError>(())
//! ```
//!
//! ## Layers
//!
//! - [`kernel`]: points, the registry, weighted sampling, seeded latents
//! - [`discovery`]: PCA and classifier directions, steering, loss
//! - [`highlevel`]: the [`Explorer`] session wrapper and [`SharedRegistry`]
//!
//! ## Index policy
//!
//! Registry operations addressed by index (`delete_point`, `modify_point`,
//! `move_point`, `select`) silently ignore out-of-range indices. This is
//! intentional; see [`kernel::registry`].

pub mod config;
pub mod discovery;
pub mod error;
pub mod highlevel;
pub mod kernel;

// Re-exports for convenience
pub use config::ExplorerConfig;
pub use discovery::{
    apply_direction, attribute_preserving_loss, ClassifierConfig, ClassifierFit, LatentDirectionFinder,
    LossWeights, PcaConfig, PcaDirections,
};
pub use error::{FaceForgeError, Result};
pub use highlevel::{Explorer, SharedRegistry};
pub use kernel::{
    LatentPoint, LatentSeeder, PointRegistry, Position, SamplerConfig, SamplingMode, WeightPolicy,
    WeightedSampler,
};
