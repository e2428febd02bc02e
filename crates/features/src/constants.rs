//! Fixed, versioned lookup data shared by training and inference.
//!
//! Changing any of these tables changes feature values and therefore
//! requires retraining; bump [`CONSTANTS_VERSION`] when doing so.

/// Version of the constant tables below.
pub const CONSTANTS_VERSION: u32 = 1;

/// Phishing keywords. Order fixes feature indices 14..=29.
pub const PHISHING_KEYWORDS: [&str; 16] = [
    "login", "secure", "bank", "update", "verify", "account", "webscr", "confirm", "signin",
    "password", "free", "gift", "award", "alert", "error", "invoice",
];

/// Top-level domains frequently abused for phishing, with leading dot.
pub const SUSPICIOUS_TLDS: [&str; 22] = [
    ".zip", ".review", ".country", ".kim", ".cricket", ".science", ".work", ".party", ".gq",
    ".top", ".xyz", ".site", ".online", ".club", ".biz", ".info", ".ws", ".cc", ".ga", ".tk",
    ".ml", ".cf",
];

/// Host substrings of common URL shortening services.
pub const URL_SHORTENERS: [&str; 8] = [
    "bit.ly",
    "goo.gl",
    "tinyurl.com",
    "ow.ly",
    "t.co",
    "buff.ly",
    "is.gd",
    "s.id",
];

/// Default allow-list consulted at the service boundary before any
/// feature extraction happens.
pub const TRUSTED_DOMAINS: [&str; 22] = [
    "google.com",
    "gmail.com",
    "openai.com",
    "facebook.com",
    "youtube.com",
    "linkedin.com",
    "amazon.com",
    "microsoft.com",
    "apple.com",
    "github.com",
    "stackoverflow.com",
    "wikipedia.org",
    "reddit.com",
    "twitter.com",
    "instagram.com",
    "netflix.com",
    "discord.com",
    "medium.com",
    "dev.to",
    "developer.mozilla.org",
    "docs.python.org",
    "w3schools.com",
];

/// Punctuation that does not count towards `num_unusual_special_chars_in_url`.
pub const ALLOWED_PUNCTUATION: [char; 8] = ['.', '/', ':', '?', '=', '&', '#', '-'];

pub fn is_suspicious_tld(dotted_suffix: &str) -> bool {
    SUSPICIOUS_TLDS.contains(&dotted_suffix)
}

pub fn is_shortener_host(host: &str) -> bool {
    URL_SHORTENERS.iter().any(|shortener| host.contains(shortener))
}
