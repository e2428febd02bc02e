//! Generic URL splitting
//!
//! Splits a URL into scheme, network location, path, params, query and
//! fragment without normalising or percent-decoding anything, so that the
//! lengths computed from the parts match the training data exactly.

use crate::errors::{FeatureError, Result};
use std::net::Ipv6Addr;

/// Schemes whose last path segment may carry `;params`
const SCHEMES_WITH_PARAMS: [&str; 15] = [
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtspu", "sip",
    "sips", "mms", "sftp", "tel",
];

/// Components of a split URL. All fields are empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub netloc: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

pub(crate) fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Split `url` into its components.
///
/// Fails only for a network location with unbalanced IPv6 brackets or an
/// invalid bracketed host.
pub fn split_url(url: &str) -> Result<UrlParts> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let mut rest = cleaned.as_str();
    let mut scheme = String::new();

    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        if colon > 0
            && candidate.starts_with(|c: char| c.is_ascii_alphabetic())
            && candidate.chars().all(is_scheme_char)
        {
            scheme = candidate.to_ascii_lowercase();
            rest = &rest[colon + 1..];
        }
    }

    let mut netloc = String::new();
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        netloc = after[..end].to_string();
        rest = &after[end..];
        check_netloc(&netloc)?;
    }

    let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

    let (path, params) = if SCHEMES_WITH_PARAMS.contains(&scheme.as_str()) && rest.contains(';') {
        split_params(rest)
    } else {
        (rest, "")
    };

    Ok(UrlParts {
        scheme,
        netloc,
        path: path.to_string(),
        params: params.to_string(),
        query: query.to_string(),
        fragment: fragment.to_string(),
    })
}

/// Split `;params` off the last path segment
fn split_params(path: &str) -> (&str, &str) {
    let search_from = path.rfind('/').unwrap_or(0);
    match path[search_from..].find(';') {
        Some(offset) => {
            let i = search_from + offset;
            (&path[..i], &path[i + 1..])
        }
        None => (path, ""),
    }
}

fn check_netloc(netloc: &str) -> Result<()> {
    let has_open = netloc.contains('[');
    let has_close = netloc.contains(']');
    if has_open != has_close {
        return Err(FeatureError::MalformedUrl(format!(
            "unbalanced IPv6 brackets in '{netloc}'"
        )));
    }

    if has_open {
        let bracketed = netloc
            .split_once('[')
            .map(|(_, tail)| tail.split_once(']').map_or(tail, |(host, _)| host))
            .unwrap_or_default();
        if !is_valid_bracketed_host(bracketed) {
            return Err(FeatureError::MalformedUrl(format!(
                "invalid bracketed host '{bracketed}'"
            )));
        }
    }

    Ok(())
}

/// IPv6 literal (optionally with a zone id) or an IPvFuture `v<hex>.<rest>`
fn is_valid_bracketed_host(host: &str) -> bool {
    if let Some(future) = host.strip_prefix('v') {
        return match future.split_once('.') {
            Some((version, tail)) => {
                !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_hexdigit())
                    && !tail.is_empty()
            }
            None => false,
        };
    }
    let address = host.split_once('%').map_or(host, |(addr, _)| addr);
    address.parse::<Ipv6Addr>().is_ok()
}
