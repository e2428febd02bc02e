//! Allow-list consulted before any model work
//!
//! A URL is trusted when its boundary domain (network location lowercased,
//! userinfo and port removed, leading `www.` stripped) equals an entry or is
//! a subdomain of one.

use phishguard_features::{split_url, TRUSTED_DOMAINS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomains {
    entries: Vec<String>,
}

impl Default for TrustedDomains {
    fn default() -> Self {
        Self::new(TRUSTED_DOMAINS)
    }
}

impl TrustedDomains {
    /// Entries are trimmed, lowercased and deduplicated; a leading `www.` is
    /// dropped so it cannot shadow the boundary-domain normalisation.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim().trim_end_matches('.').to_lowercase();
            let entry = entry.strip_prefix("www.").unwrap_or(&entry).to_string();
            if !entry.is_empty() && !normalized.contains(&entry) {
                normalized.push(entry);
            }
        }
        Self {
            entries: normalized,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_trusted(&self, domain: &str) -> bool {
        self.entries.iter().any(|entry| {
            domain == entry
                || domain
                    .strip_suffix(entry.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// The boundary domain of `url` if it is on the list
    pub fn match_url(&self, url: &str) -> Option<String> {
        let domain = boundary_domain(url);
        self.is_trusted(&domain).then_some(domain)
    }
}

/// Lowercased host of `url` without userinfo, port or a leading `www.`.
/// Empty when the URL has no network location or cannot be split.
pub fn boundary_domain(url: &str) -> String {
    let netloc = match split_url(url) {
        Ok(parts) => parts.netloc.to_lowercase(),
        Err(_) => return String::new(),
    };

    let host = netloc.rsplit_once('@').map_or(netloc.as_str(), |(_, host)| host);
    let host = if host.starts_with('[') {
        host.split_once(']')
            .map_or(host, |(inner, _)| &host[..inner.len() + 1])
    } else {
        host.split_once(':').map_or(host, |(name, _)| name)
    };

    host.strip_prefix("www.").unwrap_or(host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_all_entries() {
        assert_eq!(TrustedDomains::default().len(), 22);
    }

    #[test]
    fn boundary_domain_normalisation() {
        assert_eq!(boundary_domain("https://www.Google.com/search"), "google.com");
        assert_eq!(boundary_domain("http://user:pw@WWW.github.com:443/x"), "github.com");
        assert_eq!(boundary_domain("http://[::1]:8080/"), "[::1]");
        assert_eq!(boundary_domain("google.com/search"), "");
        assert_eq!(boundary_domain("http://[broken"), "");
    }

    #[test]
    fn exact_and_subdomain_matches() {
        let trusted = TrustedDomains::default();
        assert_eq!(
            trusted.match_url("https://www.google.com/search"),
            Some("google.com".to_string())
        );
        assert_eq!(
            trusted.match_url("https://mail.google.com"),
            Some("mail.google.com".to_string())
        );
        assert_eq!(
            trusted.match_url("https://developer.mozilla.org/en-US/"),
            Some("developer.mozilla.org".to_string())
        );
    }

    #[test]
    fn lookalikes_are_not_trusted() {
        let trusted = TrustedDomains::default();
        assert_eq!(trusted.match_url("https://evilgoogle.com"), None);
        assert_eq!(trusted.match_url("https://google.com.evil.tk"), None);
        assert_eq!(trusted.match_url("https://mozilla.org"), None);
        assert_eq!(trusted.match_url("https://google.com@evil.tk/"), None);
        assert_eq!(trusted.match_url(""), None);
    }

    #[test]
    fn custom_entries_are_normalised() {
        let trusted = TrustedDomains::new([" WWW.Example.ORG. ", "example.org", ""]);
        assert_eq!(trusted.entries(), ["example.org".to_string()]);
        assert!(trusted.is_trusted("docs.example.org"));
    }
}
