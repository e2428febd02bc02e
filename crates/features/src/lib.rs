//! Deterministic URL Feature Extraction for PhishGuard
//!
//! Turns a raw URL string into the fixed 33-value feature vector consumed
//! by the phishing classifier, and turns a (features, probability) pair
//! back into human-readable reasons.
//!
//! Modules:
//! - `constants`: Versioned keyword, TLD, shortener and allow-list tables
//! - `layout`: Feature indices, names and the `FeatureVector` type
//! - `url_parts`: Generic URL splitting
//! - `domain`: Public-suffix-aware host splitting
//! - `entropy`: Shannon entropy helper
//! - `char_class`: Digit and alphanumeric predicates for the count features
//! - `extractor`: URL to feature vector
//! - `explainer`: Feature vector and probability to reasons
//! - `errors`: Error types
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod char_class;
pub mod constants;
pub mod domain;
pub mod entropy;
pub mod errors;
pub mod explainer;
pub mod extractor;
pub mod layout;
pub mod url_parts;

pub use constants::{
    CONSTANTS_VERSION, PHISHING_KEYWORDS, SUSPICIOUS_TLDS, TRUSTED_DOMAINS, URL_SHORTENERS,
};
pub use domain::{split_host, HostParts};
pub use entropy::shannon_entropy;
pub use errors::{FeatureError, Result};
pub use explainer::{
    explain, Reason, ReasonExplainer, DECISION_THRESHOLD, RISK_REASON_THRESHOLD,
    SAFE_REASON_THRESHOLD,
};
pub use extractor::{extract_features, FeatureExtractor};
pub use layout::{Feature, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use url_parts::{split_url, UrlParts};

/// Crate version string for service metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
