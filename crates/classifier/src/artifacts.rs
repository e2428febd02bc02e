//! Persisted model and scaler artifacts
//!
//! Both are JSON. The model artifact carries the feature names it was
//! trained on; loading fails unless they equal the extractor's layout.
//! Each artifact is fingerprinted with BLAKE3 over its canonical JSON.

use crate::errors::{ClassifierError, Result};
use crate::gbdt::Model;
use crate::scaler::StandardScaler;
use crate::serde_canon::{hash_canonical_hex, to_canonical_json};
use phishguard_features::{FEATURE_COUNT, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default file name of the model artifact
pub const MODEL_FILE: &str = "phishing_model.json";

/// Default file name of the scaler artifact
pub const SCALER_FILE: &str = "phishing_scaler.json";

pub const DEFAULT_MODEL_TYPE: &str = "GradientBoostingClassifier";

fn default_model_type() -> String {
    DEFAULT_MODEL_TYPE.to_string()
}

/// Model file contents: metadata plus the tree ensemble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,

    /// Held-out accuracy in percent, as measured at training time
    #[serde(default)]
    pub accuracy: Option<f64>,

    pub feature_names: Vec<String>,

    pub ensemble: Model,
}

impl ModelArtifact {
    /// Artifact for the current feature layout
    pub fn new(ensemble: Model, accuracy: Option<f64>) -> Self {
        Self {
            model_type: default_model_type(),
            accuracy,
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            ensemble,
        }
    }

    /// Structural checks plus the feature-layout contract
    pub fn validate(&self) -> Result<()> {
        check_feature_names(&self.feature_names)?;
        if self.ensemble.n_features != FEATURE_COUNT {
            return Err(ClassifierError::ContractDrift(format!(
                "ensemble expects {} features, extractor produces {}",
                self.ensemble.n_features, FEATURE_COUNT
            )));
        }
        self.ensemble.validate()
    }

    pub fn hash_hex(&self) -> Result<String> {
        Ok(hash_canonical_hex(self)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_canonical(path.as_ref(), self)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let artifact: ModelArtifact = serde_json::from_str(&read(path)?)?;
        artifact.validate()?;
        info!(
            "Model artifact loaded from {}: {} trees, type {}",
            path.display(),
            artifact.ensemble.num_trees(),
            artifact.model_type
        );
        Ok(artifact)
    }
}

impl StandardScaler {
    pub fn hash_hex(&self) -> Result<String> {
        Ok(hash_canonical_hex(self)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_canonical(path.as_ref(), self)
    }

    /// Load and validate against the extractor's feature count
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let scaler: StandardScaler = serde_json::from_str(&read(path)?)?;
        scaler.validate(FEATURE_COUNT)?;
        info!("Scaler artifact loaded from {}", path.display());
        Ok(scaler)
    }
}

fn check_feature_names(names: &[String]) -> Result<()> {
    if names.len() != FEATURE_COUNT {
        return Err(ClassifierError::ContractDrift(format!(
            "model was trained on {} features, extractor produces {}",
            names.len(),
            FEATURE_COUNT
        )));
    }

    for (i, (found, expected)) in names.iter().zip(FEATURE_NAMES.iter()).enumerate() {
        if found != expected {
            return Err(ClassifierError::ContractDrift(format!(
                "feature {i} is '{found}' in the model but '{expected}' in the extractor"
            )));
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ClassifierError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_canonical<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_canonical_json(value)?;
    fs::write(path, json).map_err(|source| ClassifierError::Io {
        path: path.display().to_string(),
        source,
    })
}
