//! Feature vector layout
//!
//! The index-to-name mapping below is the contract between the extractor,
//! the classifier artifacts and the explainer. Reordering it silently
//! corrupts classification.

use crate::constants::PHISHING_KEYWORDS;
use crate::errors::{FeatureError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

/// Number of features produced for every URL
pub const FEATURE_COUNT: usize = 33;

/// Index of the first keyword flag
pub const KEYWORD_OFFSET: usize = 14;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "num_hyphens",
    "has_at_symbol",
    "num_double_slashes",
    "uses_https",
    "num_dots_in_hostname",
    "is_ip_address_in_hostname",
    "is_suspicious_tld",
    "num_subdomains",
    "is_shortened_url",
    "domain_entropy",
    "main_domain_length",
    "path_length",
    "query_length",
    "keyword_login",
    "keyword_secure",
    "keyword_bank",
    "keyword_update",
    "keyword_verify",
    "keyword_account",
    "keyword_webscr",
    "keyword_confirm",
    "keyword_signin",
    "keyword_password",
    "keyword_free",
    "keyword_gift",
    "keyword_award",
    "keyword_alert",
    "keyword_error",
    "keyword_invoice",
    "num_digits_in_url",
    "num_unusual_special_chars_in_url",
    "url_path_depth",
];

/// A named position in the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum Feature {
    UrlLength = 0,
    NumHyphens,
    HasAtSymbol,
    NumDoubleSlashes,
    UsesHttps,
    NumDotsInHostname,
    IsIpAddressInHostname,
    IsSuspiciousTld,
    NumSubdomains,
    IsShortenedUrl,
    DomainEntropy,
    MainDomainLength,
    PathLength,
    QueryLength,
    KeywordLogin,
    KeywordSecure,
    KeywordBank,
    KeywordUpdate,
    KeywordVerify,
    KeywordAccount,
    KeywordWebscr,
    KeywordConfirm,
    KeywordSignin,
    KeywordPassword,
    KeywordFree,
    KeywordGift,
    KeywordAward,
    KeywordAlert,
    KeywordError,
    KeywordInvoice,
    NumDigitsInUrl,
    NumUnusualSpecialCharsInUrl,
    UrlPathDepth,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::UrlLength,
        Feature::NumHyphens,
        Feature::HasAtSymbol,
        Feature::NumDoubleSlashes,
        Feature::UsesHttps,
        Feature::NumDotsInHostname,
        Feature::IsIpAddressInHostname,
        Feature::IsSuspiciousTld,
        Feature::NumSubdomains,
        Feature::IsShortenedUrl,
        Feature::DomainEntropy,
        Feature::MainDomainLength,
        Feature::PathLength,
        Feature::QueryLength,
        Feature::KeywordLogin,
        Feature::KeywordSecure,
        Feature::KeywordBank,
        Feature::KeywordUpdate,
        Feature::KeywordVerify,
        Feature::KeywordAccount,
        Feature::KeywordWebscr,
        Feature::KeywordConfirm,
        Feature::KeywordSignin,
        Feature::KeywordPassword,
        Feature::KeywordFree,
        Feature::KeywordGift,
        Feature::KeywordAward,
        Feature::KeywordAlert,
        Feature::KeywordError,
        Feature::KeywordInvoice,
        Feature::NumDigitsInUrl,
        Feature::NumUnusualSpecialCharsInUrl,
        Feature::UrlPathDepth,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Keyword flag feature for the `n`th entry of the keyword table
    pub fn keyword_flag(n: usize) -> Option<Self> {
        if n < PHISHING_KEYWORDS.len() {
            Self::from_index(KEYWORD_OFFSET + n)
        } else {
            None
        }
    }

    /// The bare keyword for keyword flags, `None` for every other feature
    pub fn keyword(self) -> Option<&'static str> {
        self.index()
            .checked_sub(KEYWORD_OFFSET)
            .and_then(|n| PHISHING_KEYWORDS.get(n).copied())
    }
}

/// Ordered vector of exactly [`FEATURE_COUNT`] values.
///
/// Created fresh per URL and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Rebuild a vector from a raw slice, rejecting any other length
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        let array: [f64; FEATURE_COUNT] =
            values
                .try_into()
                .map_err(|_| FeatureError::FeatureCountMismatch {
                    expected: FEATURE_COUNT,
                    got: values.len(),
                })?;
        Ok(Self(array))
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// True when a 0/1 (or count) feature equals exactly one
    pub fn is_set(&self, feature: Feature) -> bool {
        self.get(feature) == 1.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn names() -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    /// `(name, value)` pairs in layout order
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Bare keywords whose flags are set, in keyword-table order
    pub fn matched_keywords(&self) -> Vec<&'static str> {
        (0..PHISHING_KEYWORDS.len())
            .filter_map(Feature::keyword_flag)
            .filter(|flag| self.is_set(*flag))
            .filter_map(Feature::keyword)
            .collect()
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter_named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
