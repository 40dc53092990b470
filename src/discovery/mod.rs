//! Discovery layer: semantic directions in latent space.
//!
//! This module provides:
//!
//! - [`LatentDirectionFinder`] — built once per `N × D` batch; offers
//!   unsupervised directions ([`pca_direction`](LatentDirectionFinder::pca_direction))
//!   and supervised ones ([`classifier_direction`](LatentDirectionFinder::classifier_direction)).
//! - [`apply_direction`] — move an encoding by `alpha` along a direction.
//! - [`attribute_preserving_loss`] — score a steered generation against an
//!   attribute target while penalising identity drift.
//!
//! # Usage
//!
//! ```rust
//! use faceforge::discovery::{apply_direction, LatentDirectionFinder};
//! use faceforge::kernel::LatentSeeder;
//!
//! let seeder = LatentSeeder::with_seed(16, 7);
//! let latents: Vec<Vec<f64>> = (0..40).map(|i| seeder.latent_for(&format!("face-{}", i))).collect();
//!
//! let finder = LatentDirectionFinder::new(latents.clone()).unwrap();
//! let pca = finder.pca_direction(3).unwrap();
//!
//! let older = apply_direction(&latents[0], &pca.components[0], 2.0).unwrap();
//! assert_eq!(older.len(), 16);
//! ```

pub mod classifier;
pub mod finder;
pub mod loss;
pub mod pca;
pub mod steering;

pub use classifier::{ClassifierConfig, ClassifierFit};
pub use finder::LatentDirectionFinder;
pub use loss::{attribute_preserving_loss, mse, LossWeights};
pub use pca::{PcaConfig, PcaDirections};
pub use steering::{apply_direction, direction_sweep};
