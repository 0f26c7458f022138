use lathe_kernel::{DraftConfig, GeneratorError};
use serde::{Deserialize, Serialize};

/// Engine constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuroConfig {
    /// Radius used when the caller's radius factor is zero, negative or not finite.
    pub fallback_radius: f64,
    /// Decimals kept per coordinate when hashing geometry.
    pub hash_precision: usize,
    /// Recovery score carried by a ghost until it is approved and rescored.
    pub provisional_recovery_score: f64,
    /// Upper bound on points accepted from a single token.
    pub max_points: usize,
    /// Layer = radius / radius_scale when the payload gives no base layer.
    pub radius_scale: f64,
}

impl Default for NeuroConfig {
    fn default() -> Self {
        Self {
            fallback_radius: 10.0,
            hash_precision: 6,
            provisional_recovery_score: 0.95,
            max_points: 100_000,
            radius_scale: DraftConfig::default().radius_scale,
        }
    }
}

/// Why a token produced no geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransmuteError {
    #[error("unrecognized action: {action}")]
    UnrecognizedAction { action: String },

    #[error("token has no payload")]
    MissingPayload,

    #[error("malformed token: {reason}")]
    Malformed { reason: String },

    #[error("unknown generator: {name}")]
    UnknownGenerator { name: String },

    #[error("generator failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("token produced no points")]
    NoPoints,

    #[error("token produced {count} points (max {max})")]
    TooManyPoints { count: usize, max: usize },

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}
