//! Standardisation with training-time parameters
//!
//! Never refit at serving time: `mean` and `scale` come from the artifact
//! written next to the model.

use crate::errors::{ClassifierError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    pub fn feature_count(&self) -> usize {
        self.mean.len()
    }

    /// Both vectors must have `expected` finite entries and no zero scale.
    pub fn validate(&self, expected: usize) -> Result<()> {
        for (name, values) in [("mean", &self.mean), ("scale", &self.scale)] {
            if values.len() != expected {
                return Err(ClassifierError::Validation(format!(
                    "Scaler {} has {} entries, expected {}",
                    name,
                    values.len(),
                    expected
                )));
            }
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(ClassifierError::Validation(format!(
                    "Scaler {name}[{i}] is not finite"
                )));
            }
        }

        if let Some(i) = self.scale.iter().position(|s| *s == 0.0) {
            return Err(ClassifierError::Validation(format!(
                "Scaler scale[{i}] is zero"
            )));
        }

        Ok(())
    }

    /// `(x - mean) / scale`, element-wise
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_standardises() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 0.5]);
        assert_eq!(scaler.transform(&[3.0, 9.0]).unwrap(), vec![1.0, -2.0]);
    }

    #[test]
    fn transform_rejects_wrong_length() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]);
        assert!(matches!(
            scaler.transform(&[1.0]),
            Err(ClassifierError::FeatureCountMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn validation() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).validate(3).is_ok());
        assert!(StandardScaler::new(vec![0.0; 2], vec![1.0; 3]).validate(3).is_err());
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0, 0.0, 1.0]).validate(3).is_err());
        assert!(StandardScaler::new(vec![0.0, f64::NAN, 0.0], vec![1.0; 3]).validate(3).is_err());
    }
}
