//! URL to feature-vector transformation
//!
//! Stateless and infallible: unparsable URLs degrade to empty components
//! rather than erroring, because training data is full of noisy URLs and
//! the prediction path has no fallback.

use crate::char_class::{is_alnum, is_digit};
use crate::constants::{is_shortener_host, is_suspicious_tld, ALLOWED_PUNCTUATION, PHISHING_KEYWORDS};
use crate::domain::split_host;
use crate::entropy::shannon_entropy;
use crate::layout::{Feature, FeatureVector, FEATURE_COUNT};
use crate::url_parts::{split_url, UrlParts};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Four dot-separated groups of one to three digits. Octet ranges are not
/// checked, so `999.999.999.999` matches; trained models depend on this.
static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("dotted-quad pattern is valid")
});

/// Extracts the fixed 33-value feature vector from raw URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, url: &str) -> FeatureVector {
        extract_features(url)
    }
}

/// Extract features from `url`. Always returns exactly [`FEATURE_COUNT`] values.
pub fn extract_features(url: &str) -> FeatureVector {
    let parts = split_url(url).unwrap_or_else(|err| {
        debug!("degrading unparsable URL to empty components: {}", err);
        UrlParts::default()
    });

    let hostname = parts.netloc.to_lowercase();
    let path = parts.path.to_lowercase();
    let query = parts.query.to_lowercase();
    let host = split_host(url);
    let lowercase_url = url.to_lowercase();

    let mut values = [0.0; FEATURE_COUNT];
    let mut set = |feature: Feature, value: f64| values[feature.index()] = value;

    set(Feature::UrlLength, url.chars().count() as f64);
    set(Feature::NumHyphens, url.matches('-').count() as f64);
    set(Feature::HasAtSymbol, url.matches('@').count() as f64);
    set(Feature::NumDoubleSlashes, url.matches("//").count() as f64);
    set(Feature::UsesHttps, flag(parts.scheme == "https"));

    set(Feature::NumDotsInHostname, hostname.matches('.').count() as f64);
    set(Feature::IsIpAddressInHostname, flag(DOTTED_QUAD.is_match(&hostname)));
    set(
        Feature::IsSuspiciousTld,
        flag(is_suspicious_tld(&format!(".{}", host.suffix))),
    );
    set(Feature::NumSubdomains, host.subdomain_count() as f64);
    set(Feature::IsShortenedUrl, flag(is_shortener_host(&hostname)));
    set(Feature::DomainEntropy, shannon_entropy(&host.domain));
    set(Feature::MainDomainLength, host.domain.chars().count() as f64);

    set(Feature::PathLength, path.chars().count() as f64);
    set(Feature::QueryLength, query.chars().count() as f64);

    for (n, keyword) in PHISHING_KEYWORDS.iter().enumerate() {
        if let Some(feature) = Feature::keyword_flag(n) {
            set(feature, flag(lowercase_url.contains(keyword)));
        }
    }

    set(
        Feature::NumDigitsInUrl,
        lowercase_url.chars().filter(|&c| is_digit(c)).count() as f64,
    );
    set(
        Feature::NumUnusualSpecialCharsInUrl,
        lowercase_url
            .chars()
            .filter(|c| !is_alnum(*c) && !ALLOWED_PUNCTUATION.contains(c))
            .count() as f64,
    );

    let leading_slash = usize::from(path.starts_with('/'));
    set(
        Feature::UrlPathDepth,
        path.matches('/').count().saturating_sub(leading_slash) as f64,
    );

    FeatureVector::new(values)
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phishing_example_url() {
        let fv = extract_features("http://login-bank-verify.tk/account?id=123456789012");
        assert_eq!(fv[Feature::UrlLength], 51.0);
        assert_eq!(fv[Feature::NumHyphens], 2.0);
        assert_eq!(fv[Feature::NumDoubleSlashes], 1.0);
        assert_eq!(fv[Feature::UsesHttps], 0.0);
        assert_eq!(fv[Feature::NumDotsInHostname], 1.0);
        assert_eq!(fv[Feature::IsSuspiciousTld], 1.0);
        assert_eq!(fv[Feature::NumSubdomains], 0.0);
        assert_eq!(fv[Feature::MainDomainLength], 17.0);
        assert_eq!(fv[Feature::PathLength], 8.0);
        assert_eq!(fv[Feature::QueryLength], 15.0);
        assert_eq!(fv[Feature::KeywordLogin], 1.0);
        assert_eq!(fv[Feature::KeywordBank], 1.0);
        assert_eq!(fv[Feature::KeywordVerify], 1.0);
        assert_eq!(fv[Feature::KeywordAccount], 1.0);
        assert_eq!(fv[Feature::KeywordSecure], 0.0);
        assert_eq!(fv[Feature::NumDigitsInUrl], 12.0);
        assert_eq!(fv[Feature::NumUnusualSpecialCharsInUrl], 0.0);
        assert_eq!(fv[Feature::UrlPathDepth], 0.0);
    }

    #[test]
    fn ip_host_detection_is_permissive() {
        assert!(extract_features("http://1.2.3.4/x").is_set(Feature::IsIpAddressInHostname));
        assert!(extract_features("http://999.999.999.999/").is_set(Feature::IsIpAddressInHostname));
        assert!(!extract_features("http://example.com/").is_set(Feature::IsIpAddressInHostname));
        // The port is part of the network location.
        assert!(!extract_features("http://1.2.3.4:80/").is_set(Feature::IsIpAddressInHostname));
    }

    #[test]
    fn shortener_detection() {
        assert!(extract_features("http://bit.ly/xyz").is_set(Feature::IsShortenedUrl));
        assert!(!extract_features("http://bitly.com/xyz").is_set(Feature::IsShortenedUrl));
    }

    #[test]
    fn path_depth_ignores_root_slash() {
        let fv = extract_features("https://example.com/a/b/c/");
        assert_eq!(fv[Feature::UrlPathDepth], 3.0);
        assert_eq!(fv[Feature::UsesHttps], 1.0);
        assert_eq!(extract_features("https://example.com")[Feature::UrlPathDepth], 0.0);
    }

    #[test]
    fn keywords_are_case_insensitive_substrings() {
        let fv = extract_features("https://example.com/Login123?SignIn=PASSWORD");
        assert!(fv.is_set(Feature::KeywordLogin));
        assert!(fv.is_set(Feature::KeywordSignin));
        assert!(fv.is_set(Feature::KeywordPassword));
        assert!(!fv.is_set(Feature::KeywordGift));
    }

    #[test]
    fn special_characters_exclude_allowed_punctuation() {
        let fv = extract_features("http://a.com/~x_y!z?q=1&r=2#f-g");
        // '~', '_', '!'
        assert_eq!(fv[Feature::NumUnusualSpecialCharsInUrl], 3.0);
    }

    #[test]
    fn non_ascii_digits_and_marks() {
        let fv = extract_features("http://ex.com/a½b");
        assert_eq!(fv[Feature::NumDigitsInUrl], 0.0);
        assert_eq!(fv[Feature::NumUnusualSpecialCharsInUrl], 0.0);

        assert_eq!(extract_features("http://ex.com/x²\u{0663}")[Feature::NumDigitsInUrl], 2.0);

        // Virama and vowel sign are marks, not alphanumerics.
        let fv = extract_features("http://ex.com/नमस्ते");
        assert_eq!(fv[Feature::NumUnusualSpecialCharsInUrl], 2.0);
        assert_eq!(fv[Feature::NumDigitsInUrl], 0.0);
    }

    #[test]
    fn malformed_netloc_degrades_to_empty_parts() {
        let fv = extract_features("http://[broken/login");
        assert_eq!(fv.len(), FEATURE_COUNT);
        assert_eq!(fv[Feature::NumDotsInHostname], 0.0);
        assert_eq!(fv[Feature::PathLength], 0.0);
        assert_eq!(fv[Feature::UsesHttps], 0.0);
        // Whole-URL scans still run.
        assert!(fv.is_set(Feature::KeywordLogin));
        assert_eq!(fv[Feature::UrlLength], 20.0);
    }

    #[test]
    fn scheme_less_url_still_has_registrable_domain() {
        let fv = extract_features("paypal-secure.xyz/update");
        assert_eq!(fv[Feature::NumDotsInHostname], 0.0);
        assert_eq!(fv[Feature::IsSuspiciousTld], 1.0);
        assert_eq!(fv[Feature::MainDomainLength], 13.0);
        assert_eq!(fv[Feature::PathLength], 24.0);
    }

    #[test]
    fn extractor_struct_matches_free_function() {
        let url = "https://secure.bank.example.co.uk/verify";
        assert_eq!(FeatureExtractor::new().extract(url), extract_features(url));
        assert_eq!(extract_features(url)[Feature::NumSubdomains], 2.0);
    }
}
