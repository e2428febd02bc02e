//! Error types for the classifier crate

use crate::serde_canon::CanonicalError;
use thiserror::Error;

/// Errors raised while loading artifacts or scoring a feature vector
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Input vector length differs from what the model was trained on
    #[error("Feature count mismatch: expected {expected}, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// An artifact is structurally invalid
    #[error("Artifact validation failed: {0}")]
    Validation(String),

    /// The model was trained on a different feature layout than the extractor produces
    #[error("Feature layout drift: {0}")]
    ContractDrift(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Canonical serialization error: {0}")]
    Canonical(#[from] CanonicalError),
}

/// Result type for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
