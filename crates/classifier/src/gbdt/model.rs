//! Binary log-loss gradient-boosted ensemble
//!
//! `raw = init_score + learning_rate * sum(tree(x))`, mapped to a
//! probability with the logistic function.

use super::tree::Tree;
use crate::errors::{ClassifierError, Result};
use serde::{Deserialize, Serialize};

/// Supported ensemble format version
pub const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Number of input features every tree indexes into
    pub n_features: usize,

    /// Shrinkage applied to every tree's output
    pub learning_rate: f64,

    /// Prior log-odds of the positive class
    pub init_score: f64,

    pub trees: Vec<Tree>,
}

impl Model {
    pub fn new(n_features: usize, learning_rate: f64, init_score: f64, trees: Vec<Tree>) -> Self {
        Self {
            version: FORMAT_VERSION,
            n_features,
            learning_rate,
            init_score,
            trees,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(ClassifierError::Validation(format!(
                "Unsupported model version: {}",
                self.version
            )));
        }

        if self.n_features == 0 {
            return Err(ClassifierError::Validation(
                "Model declares zero input features".to_string(),
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::Validation(format!(
                "Invalid learning rate: {}",
                self.learning_rate
            )));
        }

        if !self.init_score.is_finite() {
            return Err(ClassifierError::Validation(format!(
                "Invalid init score: {}",
                self.init_score
            )));
        }

        if self.trees.is_empty() {
            return Err(ClassifierError::Validation(
                "Model has no trees".to_string(),
            ));
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features).map_err(|e| {
                ClassifierError::Validation(format!("Tree {} validation failed: {}", i, e))
            })?;
        }

        Ok(())
    }

    fn check_len(&self, features: &[f64]) -> Result<()> {
        if features.len() != self.n_features {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }
        Ok(())
    }

    /// Raw log-odds for an already scaled feature vector
    pub fn decision_function(&self, features: &[f64]) -> Result<f64> {
        self.check_len(features)?;
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        Ok(self.init_score + self.learning_rate * sum)
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        self.decision_function(features).map(sigmoid)
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Logistic function, stable for large magnitudes
pub fn sigmoid(raw: f64) -> f64 {
    if raw >= 0.0 {
        1.0 / (1.0 + (-raw).exp())
    } else {
        let e = raw.exp();
        e / (1.0 + e)
    }
}
