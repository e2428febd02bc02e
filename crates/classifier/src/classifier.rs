//! The classifier seam used by the request pipeline

use crate::artifacts::ModelArtifact;
use crate::errors::{ClassifierError, Result};
use crate::scaler::StandardScaler;
use phishguard_features::FEATURE_COUNT;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Metadata reported alongside a ready model
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelDescription {
    pub model_type: String,
    pub accuracy: Option<f64>,
    pub feature_count: usize,
    pub model_hash: String,
    pub scaler_hash: String,
}

/// Maps a raw feature vector to the probability that the URL is phishing.
pub trait Classifier: Send + Sync {
    /// Vector length the classifier accepts
    fn feature_count(&self) -> usize;

    /// Probability in `[0, 1]`. Rejects vectors of the wrong length with
    /// [`ClassifierError::FeatureCountMismatch`].
    fn predict_proba(&self, features: &[f64]) -> Result<f64>;

    fn describe(&self) -> ModelDescription;
}

/// Scaler followed by the boosted ensemble
#[derive(Debug, Clone)]
pub struct PhishingModel {
    scaler: StandardScaler,
    artifact: ModelArtifact,
    model_hash: String,
    scaler_hash: String,
}

impl PhishingModel {
    /// Validate both artifacts and fingerprint them
    pub fn new(artifact: ModelArtifact, scaler: StandardScaler) -> Result<Self> {
        artifact.validate()?;
        scaler.validate(FEATURE_COUNT)?;
        let model_hash = artifact.hash_hex()?;
        let scaler_hash = scaler.hash_hex()?;
        Ok(Self {
            scaler,
            artifact,
            model_hash,
            scaler_hash,
        })
    }

    /// Load both artifacts from disk
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(model_path: P, scaler_path: Q) -> Result<Self> {
        let artifact = ModelArtifact::load_json(model_path)?;
        let scaler = StandardScaler::load_json(scaler_path)?;
        Self::new(artifact, scaler)
    }

    pub fn model_hash(&self) -> &str {
        &self.model_hash
    }

    pub fn scaler_hash(&self) -> &str {
        &self.scaler_hash
    }
}

impl Classifier for PhishingModel {
    fn feature_count(&self) -> usize {
        self.artifact.ensemble.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.feature_count() {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.feature_count(),
                got: features.len(),
            });
        }
        let scaled = self.scaler.transform(features)?;
        let probability = self.artifact.ensemble.predict_proba(&scaled)?;
        debug!("Model probability {:.6}", probability);
        Ok(probability)
    }

    fn describe(&self) -> ModelDescription {
        ModelDescription {
            model_type: self.artifact.model_type.clone(),
            accuracy: self.artifact.accuracy,
            feature_count: self.feature_count(),
            model_hash: self.model_hash.clone(),
            scaler_hash: self.scaler_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbdt::{sigmoid, Model, Node, Tree};
    use phishguard_features::{extract_features, Feature};

    /// One stump on `uses_https`: scaled value <= 0 means plain HTTP.
    fn https_stump() -> PhishingModel {
        let tree = Tree::new(vec![
            Node::internal(Feature::UsesHttps.index() as i32, 0.0, 1, 2),
            Node::leaf(20.0),
            Node::leaf(-20.0),
        ]);
        let artifact = ModelArtifact::new(Model::new(FEATURE_COUNT, 0.1, 0.0, vec![tree]), None);
        let mut mean = vec![0.0; FEATURE_COUNT];
        mean[Feature::UsesHttps.index()] = 0.5;
        let scaler = StandardScaler::new(mean, vec![0.5; FEATURE_COUNT]);
        PhishingModel::new(artifact, scaler).unwrap()
    }

    #[test]
    fn scaled_features_drive_the_ensemble() {
        let model = https_stump();
        let http = extract_features("http://example.com");
        let https = extract_features("https://example.com");

        let p_http = model.predict_proba(http.as_slice()).unwrap();
        let p_https = model.predict_proba(https.as_slice()).unwrap();
        assert!((p_http - sigmoid(2.0)).abs() < 1e-12);
        assert!((p_https - sigmoid(-2.0)).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_length() {
        let model = https_stump();
        assert!(matches!(
            model.predict_proba(&[0.0; 32]),
            Err(ClassifierError::FeatureCountMismatch { expected: 33, got: 32 })
        ));
    }

    #[test]
    fn description_carries_hashes() {
        let model = https_stump();
        let description = model.describe();
        assert_eq!(description.model_type, "GradientBoostingClassifier");
        assert_eq!(description.feature_count, FEATURE_COUNT);
        assert_eq!(description.model_hash, model.model_hash());
        assert_eq!(description.scaler_hash.len(), 64);
        assert_ne!(description.model_hash, description.scaler_hash);
    }
}
