//! Error types for the feature layer

use thiserror::Error;

/// Errors raised by feature-vector construction and URL splitting.
///
/// Extraction itself never fails: `MalformedUrl` is produced by the URL
/// splitter and absorbed by the extractor, which degrades to empty parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// A raw vector did not have the fixed feature layout length
    #[error("Feature count mismatch: expected {expected}, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// The URL could not be split into its components
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),
}

/// Result type for feature operations
pub type Result<T> = std::result::Result<T, FeatureError>;
