//! Error types for the detection service

use phishguard_classifier::ClassifierError;
use thiserror::Error;

/// Request-level failures of the detection pipeline
#[derive(Error, Debug)]
pub enum DetectorError {
    /// Artifacts were missing or invalid at startup
    #[error("Model or scaler not loaded: {0}")]
    NotReady(String),

    #[error("No URL provided")]
    EmptyUrl,

    /// Extractor output does not match what the classifier was trained on
    #[error("Feature extraction mismatch. Expected {expected}, got {got}.")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("Failed to process URL: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
