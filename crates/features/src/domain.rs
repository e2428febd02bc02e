//! Public-suffix-aware host splitting
//!
//! Separates a host into subdomain, registrable domain label and public
//! suffix (`a.b.example.co.uk` -> `a.b` / `example` / `co.uk`). Suffix
//! rules come from the `psl` crate, whose compiled-in list is pinned through
//! the workspace lockfile. Only ICANN rules are honoured; private-registry
//! entries such as `github.io` are resolved down to their ICANN suffix.

use crate::url_parts::is_scheme_char;
use std::net::Ipv6Addr;

/// Characters treated as label separators in hosts
const DOT_VARIANTS: [char; 4] = ['.', '\u{3002}', '\u{ff0e}', '\u{ff61}'];

/// Host split around its public suffix. Labels keep the input's case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl HostParts {
    /// Number of dot-separated subdomain labels, 0 when there is none
    pub fn subdomain_count(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.split('.').count()
        }
    }
}

/// Split the host of `url`, accepting inputs without a scheme.
pub fn split_host(url: &str) -> HostParts {
    let host = lenient_host(url);
    split_hostname(&host)
}

/// Split a bare hostname around its public suffix.
pub fn split_hostname(host: &str) -> HostParts {
    let host: String = host
        .chars()
        .map(|c| if DOT_VARIANTS.contains(&c) { '.' } else { c })
        .collect();

    if host.len() >= 4 && host.starts_with('[') && host.ends_with(']') {
        if host[1..host.len() - 1].parse::<Ipv6Addr>().is_ok() {
            return HostParts {
                domain: host,
                ..HostParts::default()
            };
        }
    }

    let labels: Vec<&str> = host.split('.').collect();
    let suffix_labels = icann_suffix_labels(&host.to_lowercase()).min(labels.len());
    let suffix_index = labels.len() - suffix_labels;

    if suffix_labels == 0 && looks_like_ipv4(&host) {
        return HostParts {
            domain: host,
            ..HostParts::default()
        };
    }

    HostParts {
        subdomain: if suffix_index >= 2 {
            labels[..suffix_index - 1].join(".")
        } else {
            String::new()
        },
        domain: if suffix_index >= 1 {
            labels[suffix_index - 1].to_string()
        } else {
            String::new()
        },
        suffix: labels[suffix_index..].join("."),
    }
}

/// Number of trailing labels forming the ICANN public suffix, 0 if the
/// last label is not a known suffix.
fn icann_suffix_labels(lowercase_host: &str) -> usize {
    let mut candidate = lowercase_host;
    loop {
        let suffix = match psl::suffix(candidate.as_bytes()) {
            Some(suffix) if suffix.is_known() => suffix,
            _ => return 0,
        };
        let bytes = suffix.as_bytes();
        if suffix.typ() != Some(psl::Type::Private) {
            return bytes.iter().filter(|b| **b == b'.').count() + 1;
        }
        // Drop the leftmost label of the private suffix and retry.
        let start = candidate.len() - bytes.len();
        match candidate[start..].split_once('.') {
            Some((_, shorter)) => candidate = shorter,
            None => return 0,
        }
    }
}

/// Dotted-quad with octets in 0..=255 (leading zeros allowed)
fn looks_like_ipv4(host: &str) -> bool {
    let octets: Vec<&str> = host.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            (1..=3).contains(&octet.len())
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u16>().map_or(false, |v| v <= 255)
        })
}

/// Host portion of `url` found without a full parse: tolerates a missing
/// scheme, drops userinfo and port, trims trailing root dots.
pub fn lenient_host(url: &str) -> String {
    let after_scheme = schemeless(url);
    let end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..end];
    let after_userinfo = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if after_userinfo.starts_with('[') {
        if let Some((inner, _)) = after_userinfo.split_once(']') {
            return format!("{inner}]");
        }
    }

    let hostname = after_userinfo
        .split_once(':')
        .map_or(after_userinfo, |(host, _)| host)
        .trim();
    hostname.trim_end_matches(DOT_VARIANTS).to_string()
}

fn schemeless(url: &str) -> &str {
    match url.find("//") {
        Some(0) => &url[2..],
        Some(i) if i >= 2 && url[..i].ends_with(':') && url[..i - 1].chars().all(is_scheme_char) => {
            &url[i + 2..]
        }
        _ => url,
    }
}
