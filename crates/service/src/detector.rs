//! Request pipeline: allow-list, extraction, classification, explanation
//!
//! A `Detector` is built once at startup and shared read-only between
//! requests. Missing or invalid artifacts leave it in the not-ready state,
//! which every assessment reports instead of crashing the process.

use crate::config::ServiceConfig;
use crate::errors::{DetectorError, Result};
use crate::trusted::TrustedDomains;
use phishguard_classifier::{Classifier, ModelDescription, PhishingModel};
use phishguard_features::{FeatureExtractor, ReasonExplainer, DECISION_THRESHOLD};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Probability reported for allow-listed URLs
pub const TRUSTED_PROBABILITY: f64 = 0.01;

pub enum ModelState {
    NotReady { reason: String },
    Ready(Arc<dyn Classifier>),
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::NotReady { reason } => {
                f.debug_struct("NotReady").field("reason", reason).finish()
            }
            ModelState::Ready(classifier) => f
                .debug_tuple("Ready")
                .field(&classifier.describe().model_hash)
                .finish(),
        }
    }
}

/// Verdict label shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    TrustedDomain,
    PhishingRisk,
    LooksSafe,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::TrustedDomain => "Trusted Domain",
            Status::PhishingRisk => "Phishing Risk",
            Status::LooksSafe => "Looks Safe",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome for one URL, serialised as the `/predict` response body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Assessment {
    pub url: String,
    /// 1 when the probability reaches the decision threshold
    pub phishing: u8,
    /// Rounded to four decimals
    pub proba: f64,
    pub message: Status,
    pub reasons: Vec<String>,
}

#[derive(Debug)]
pub struct Detector {
    trusted: TrustedDomains,
    state: ModelState,
    extractor: FeatureExtractor,
    explainer: ReasonExplainer,
}

impl Detector {
    pub fn new(trusted: TrustedDomains, state: ModelState) -> Self {
        Self {
            trusted,
            state,
            extractor: FeatureExtractor::new(),
            explainer: ReasonExplainer::new(),
        }
    }

    pub fn ready(trusted: TrustedDomains, classifier: Arc<dyn Classifier>) -> Self {
        Self::new(trusted, ModelState::Ready(classifier))
    }

    pub fn not_ready(trusted: TrustedDomains, reason: impl Into<String>) -> Self {
        Self::new(
            trusted,
            ModelState::NotReady {
                reason: reason.into(),
            },
        )
    }

    /// Load the artifacts named by `config`. Load failures are logged and
    /// produce a not-ready detector.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let trusted = TrustedDomains::new(config.all_trusted_domains());
        info!("Trusted domain list has {} entries", trusted.len());

        match PhishingModel::load(&config.model_path, &config.scaler_path) {
            Ok(model) => {
                info!(
                    "Model ready (model {}, scaler {})",
                    model.model_hash(),
                    model.scaler_hash()
                );
                Self::ready(trusted, Arc::new(model))
            }
            Err(err) => {
                warn!("Model or scaler failed to load, serving not-ready: {}", err);
                Self::not_ready(trusted, err.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn trusted(&self) -> &TrustedDomains {
        &self.trusted
    }

    /// Metadata of the loaded model, `None` when not ready
    pub fn describe(&self) -> Option<ModelDescription> {
        match &self.state {
            ModelState::Ready(classifier) => Some(classifier.describe()),
            ModelState::NotReady { .. } => None,
        }
    }

    pub fn assess(&self, url: &str) -> Result<Assessment> {
        let classifier = match &self.state {
            ModelState::Ready(classifier) => classifier,
            ModelState::NotReady { reason } => {
                return Err(DetectorError::NotReady(reason.clone()));
            }
        };

        if url.is_empty() {
            return Err(DetectorError::EmptyUrl);
        }

        if let Some(domain) = self.trusted.match_url(url) {
            debug!("Trusted domain {} bypasses the model", domain);
            return Ok(Assessment {
                url: url.to_string(),
                phishing: 0,
                proba: TRUSTED_PROBABILITY,
                message: Status::TrustedDomain,
                reasons: vec![format!("Domain '{domain}' is in the trusted list.")],
            });
        }

        let features = self.extractor.extract(url);
        if features.len() != classifier.feature_count() {
            warn!(
                "Extractor produced {} features, classifier expects {}",
                features.len(),
                classifier.feature_count()
            );
            return Err(DetectorError::FeatureCountMismatch {
                expected: classifier.feature_count(),
                got: features.len(),
            });
        }

        let probability = classifier.predict_proba(features.as_slice())?;
        let phishing = probability >= DECISION_THRESHOLD;
        let reasons = self.explainer.explain(&features, probability);

        Ok(Assessment {
            url: url.to_string(),
            phishing: u8::from(phishing),
            proba: round4(probability),
            message: if phishing {
                Status::PhishingRisk
            } else {
                Status::LooksSafe
            },
            reasons,
        })
    }
}

/// Round to four decimals from the exact binary value, ties to even.
/// Scaling by 1e4 first would round 0.50005 up, although the stored double
/// is just below the tie.
fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}
