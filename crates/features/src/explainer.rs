//! Human-readable justifications for a prediction
//!
//! Reasons are a pure function of the feature vector and the model
//! probability, gated by fixed thresholds:
//!
//! - `p >= 0.55`: every risk indicator that holds, then the matched keywords
//! - `p < 0.45`: every reassurance that holds
//! - nothing collected: one generic sentence chosen by `p >= 0.5`
//!
//! Probabilities in `[0.45, 0.55)` therefore only ever get the generic
//! sentence, even though `p >= 0.5` is reported as phishing.

use crate::layout::{Feature, FeatureVector};
use std::fmt;

/// Lower gate for risk-indicator reasons
pub const RISK_REASON_THRESHOLD: f64 = 0.55;

/// Upper gate (exclusive) for reassurance reasons
pub const SAFE_REASON_THRESHOLD: f64 = 0.45;

/// Decision boundary between phishing and safe
pub const DECISION_THRESHOLD: f64 = 0.5;

const LONG_URL_LENGTH: f64 = 75.0;
const SHORT_URL_LENGTH: f64 = 10.0;
const MAX_HYPHENS: f64 = 3.0;
const MAX_DOUBLE_SLASHES: f64 = 1.0;
const MAX_SUBDOMAINS: f64 = 3.0;
const MAX_DOMAIN_ENTROPY: f64 = 3.5;
const MAX_DIGITS: f64 = 10.0;
const MAX_SPECIAL_CHARS: f64 = 2.0;
const MAX_PATH_DEPTH: f64 = 5.0;

/// One justification. `Display` yields the user-facing sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    NoHttps,
    IpAddressHost,
    SuspiciousTld,
    ShortenedUrl,
    LongUrl,
    ExcessiveHyphens,
    AtSymbol,
    ExtraDoubleSlashes,
    ManySubdomains,
    RandomDomain,
    ManyDigits,
    UnusualSpecialChars,
    DeepPath,
    SuspiciousKeywords(Vec<&'static str>),
    UsesHttps,
    StandardDomain,
    CommonTld,
    NotShortened,
    NormalLength,
    NormalHyphens,
    GeneralSuspicious,
    LooksLegitimate,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::NoHttps => f.write_str("The site does NOT use HTTPS (not secure)."),
            Reason::IpAddressHost => {
                f.write_str("IP address used in URL instead of a legitimate domain name.")
            }
            Reason::SuspiciousTld => {
                f.write_str("Uses a Top-Level Domain (TLD) frequently associated with phishing.")
            }
            Reason::ShortenedUrl => {
                f.write_str("The URL is shortened, which can conceal the true destination.")
            }
            Reason::LongUrl => f.write_str("Very long URL, often used to hide malicious parts."),
            Reason::ExcessiveHyphens => {
                f.write_str("Excessive hyphens in the domain/URL, a common phishing tactic.")
            }
            Reason::AtSymbol => {
                f.write_str("URL contains an '@' symbol, which can be used to mislead.")
            }
            Reason::ExtraDoubleSlashes => {
                f.write_str("Unusual number of double slashes, often a sign of obfuscation.")
            }
            Reason::ManySubdomains => {
                f.write_str("Many subdomains used, potentially to hide the true domain.")
            }
            Reason::RandomDomain => {
                f.write_str("The domain name appears unusually random or machine-generated.")
            }
            Reason::ManyDigits => f.write_str(
                "Contains an unusual number of digits in the URL (e.g., in the domain).",
            ),
            Reason::UnusualSpecialChars => {
                f.write_str("Presence of unusual special characters in the URL.")
            }
            Reason::DeepPath => f.write_str("The URL path is very deep, which can be suspicious."),
            Reason::SuspiciousKeywords(keywords) => write!(
                f,
                "Contains suspicious keywords like: {}.",
                keywords.join(", ")
            ),
            Reason::UsesHttps => {
                f.write_str("The site uses HTTPS, indicating a secure connection.")
            }
            Reason::StandardDomain => {
                f.write_str("Uses a standard domain name (not an IP address).")
            }
            Reason::CommonTld => f.write_str("Uses a common and trusted Top-Level Domain (TLD)."),
            Reason::NotShortened => {
                f.write_str("The URL is not shortened, showing the full destination.")
            }
            Reason::NormalLength => f.write_str("URL length appears normal."),
            Reason::NormalHyphens => f.write_str("Normal number of hyphens in the URL."),
            Reason::GeneralSuspicious => f.write_str("Model detected general suspicious patterns."),
            Reason::LooksLegitimate => f.write_str("URL structure appears legitimate."),
        }
    }
}

/// Stateless rule engine mapping (features, probability) to reasons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonExplainer;

impl ReasonExplainer {
    pub fn new() -> Self {
        Self
    }

    /// Typed reasons in rule order
    pub fn reasons(&self, features: &FeatureVector, probability: f64) -> Vec<Reason> {
        let mut reasons = Vec::new();

        if probability >= RISK_REASON_THRESHOLD {
            risk_indicators(features, &mut reasons);
        }
        if probability < SAFE_REASON_THRESHOLD {
            reassurances(features, &mut reasons);
        }

        if reasons.is_empty() {
            reasons.push(if probability >= DECISION_THRESHOLD {
                Reason::GeneralSuspicious
            } else {
                Reason::LooksLegitimate
            });
        }

        reasons
    }

    /// Reasons rendered as sentences
    pub fn explain(&self, features: &FeatureVector, probability: f64) -> Vec<String> {
        self.reasons(features, probability)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Convenience wrapper around [`ReasonExplainer::explain`]
pub fn explain(features: &FeatureVector, probability: f64) -> Vec<String> {
    ReasonExplainer.explain(features, probability)
}

fn risk_indicators(fv: &FeatureVector, reasons: &mut Vec<Reason>) {
    let rules = [
        (fv[Feature::UsesHttps] == 0.0, Reason::NoHttps),
        (fv.is_set(Feature::IsIpAddressInHostname), Reason::IpAddressHost),
        (fv.is_set(Feature::IsSuspiciousTld), Reason::SuspiciousTld),
        (fv.is_set(Feature::IsShortenedUrl), Reason::ShortenedUrl),
        (fv[Feature::UrlLength] > LONG_URL_LENGTH, Reason::LongUrl),
        (fv[Feature::NumHyphens] > MAX_HYPHENS, Reason::ExcessiveHyphens),
        // Exactly one '@'; two or more does not trigger this sentence.
        (fv.is_set(Feature::HasAtSymbol), Reason::AtSymbol),
        (
            fv[Feature::NumDoubleSlashes] > MAX_DOUBLE_SLASHES,
            Reason::ExtraDoubleSlashes,
        ),
        (fv[Feature::NumSubdomains] > MAX_SUBDOMAINS, Reason::ManySubdomains),
        (fv[Feature::DomainEntropy] > MAX_DOMAIN_ENTROPY, Reason::RandomDomain),
        (fv[Feature::NumDigitsInUrl] > MAX_DIGITS, Reason::ManyDigits),
        (
            fv[Feature::NumUnusualSpecialCharsInUrl] > MAX_SPECIAL_CHARS,
            Reason::UnusualSpecialChars,
        ),
        (fv[Feature::UrlPathDepth] > MAX_PATH_DEPTH, Reason::DeepPath),
    ];
    reasons.extend(rules.into_iter().filter(|(hit, _)| *hit).map(|(_, r)| r));

    let keywords = fv.matched_keywords();
    if !keywords.is_empty() {
        reasons.push(Reason::SuspiciousKeywords(keywords));
    }
}

fn reassurances(fv: &FeatureVector, reasons: &mut Vec<Reason>) {
    let length = fv[Feature::UrlLength];
    let rules = [
        (fv.is_set(Feature::UsesHttps), Reason::UsesHttps),
        (fv[Feature::IsIpAddressInHostname] == 0.0, Reason::StandardDomain),
        (fv[Feature::IsSuspiciousTld] == 0.0, Reason::CommonTld),
        (fv[Feature::IsShortenedUrl] == 0.0, Reason::NotShortened),
        (
            length <= LONG_URL_LENGTH && length > SHORT_URL_LENGTH,
            Reason::NormalLength,
        ),
        (fv[Feature::NumHyphens] <= MAX_HYPHENS, Reason::NormalHyphens),
    ];
    reasons.extend(rules.into_iter().filter(|(hit, _)| *hit).map(|(_, r)| r));
}
