//! Explorer configuration.
//!
//! Every field has a default, so a partial JSON document only overrides
//! what it names:
//!
//! ```rust
//! use faceforge::config::ExplorerConfig;
//! use faceforge::kernel::{SamplingMode, WeightPolicy};
//!
//! let config = ExplorerConfig::from_json(
//!     r#"{"default_mode": "circle", "sampler": {"policy": "vector_bearing"}}"#,
//! ).unwrap();
//! assert_eq!(config.default_mode, SamplingMode::Circle);
//! assert_eq!(config.sampler.policy, WeightPolicy::VectorBearing);
//! assert_eq!(config.classifier.max_iterations, 100);
//! ```

use crate::discovery::{ClassifierConfig, PcaConfig};
use crate::error::Result;
use crate::kernel::{SamplerConfig, SamplingMode};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Mode used by [`Explorer::sample_default`](crate::highlevel::Explorer::sample_default).
    pub default_mode: SamplingMode,
    pub sampler: SamplerConfig,
    pub pca: PcaConfig,
    pub classifier: ClassifierConfig,
}

impl ExplorerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
