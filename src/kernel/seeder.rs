//! Latent Seeder: deterministic label → Gaussian latent mapping.
//!
//! Stands in for a real encoder when a registry needs reproducible starting
//! vectors: the same `(global_seed, label)` always yields the same
//! standard-normal latent, on every run and machine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Maps labels to seeded `N(0, 1)` latent vectors.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone, Debug)]
pub struct LatentSeeder {
    dimensions: usize,
    global_seed: u64,
    cache: Arc<RwLock<HashMap<String, Vec<f64>>>>,
}

impl LatentSeeder {
    /// Create a seeder with global seed 0.
    pub fn new(dimensions: usize) -> Self {
        Self::with_seed(dimensions, 0)
    }

    pub fn with_seed(dimensions: usize, global_seed: u64) -> Self {
        Self {
            dimensions,
            global_seed,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Latent vector for `label`, computed once then served from cache.
    pub fn latent_for(&self, label: &str) -> Vec<f64> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(vec) = cache.get(label) {
                return vec.clone();
            }
        }

        let vec = self.compute_latent(label);

        {
            let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
            cache.insert(label.to_string(), vec.clone());
        }

        vec
    }

    /// SHA-256 of `(global_seed || label)` seeds a ChaCha8 stream that
    /// feeds `StandardNormal`.
    fn compute_latent(&self, label: &str) -> Vec<f64> {
        let mut hasher = Sha256::new();
        hasher.update(self.global_seed.to_le_bytes());
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();

        let mut seed_bytes = [0u8; 8];
        seed_bytes.copy_from_slice(&hash[0..8]);
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed_bytes));

        let mut data = vec![0.0f64; self.dimensions];
        for x in data.iter_mut() {
            *x = StandardNormal.sample(&mut rng);
        }
        data
    }

    pub fn clear_cache(&self) {
        self.cache.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
