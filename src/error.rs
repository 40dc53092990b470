//! Error types for FaceForge.

use thiserror::Error;

/// FaceForge error types.
///
/// Out-of-range indices passed to the registry's delete/modify/move/select
/// operations are *not* represented here: those calls are silent no-ops.
/// Empty sampling results are `Ok(None)`, not errors.
#[derive(Error, Debug)]
pub enum FaceForgeError {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Malformed argument (unknown mode, bad component count, bad labels, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid vector dimensions
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Empty input where non-empty was required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Sampling weights summed to (numerically) zero or a non-finite value
    #[error("Degenerate sampling weights: total weight {total}")]
    DegenerateWeights { total: f64 },

    /// A numerical routine hit a condition it cannot produce a result for
    #[error("Degenerate computation: {0}")]
    DegenerateComputation(String),

    /// A shared registry lock was poisoned by a panicking writer
    #[error("Registry lock poisoned")]
    LockPoisoned,
}

/// Result type alias for FaceForge operations.
pub type Result<T> = std::result::Result<T, FaceForgeError>;
