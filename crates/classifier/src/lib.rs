//! Phishing Classifier for PhishGuard
//!
//! Loads the training-time artifacts (scaler and gradient-boosted tree
//! ensemble) and turns a 33-value feature vector into a phishing
//! probability.
//!
//! Modules:
//! - `gbdt`: Tree ensemble evaluation
//! - `scaler`: Standardisation with fixed parameters
//! - `artifacts`: JSON artifact loading, layout checks and fingerprints
//! - `classifier`: The `Classifier` trait and `PhishingModel`
//! - `serde_canon`: Canonical JSON for hashing
//! - `errors`: Error types

pub mod artifacts;
pub mod classifier;
pub mod errors;
pub mod gbdt;
pub mod scaler;
pub mod serde_canon;

pub use artifacts::{ModelArtifact, DEFAULT_MODEL_TYPE, MODEL_FILE, SCALER_FILE};
pub use classifier::{Classifier, ModelDescription, PhishingModel};
pub use errors::{ClassifierError, Result};
pub use gbdt::{Model, Node, Tree};
pub use scaler::StandardScaler;
