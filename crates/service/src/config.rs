//! Service configuration
//!
//! Precedence, lowest first: built-in defaults, TOML file, `PHISHGUARD_*`
//! environment variables, command-line flags.

use crate::errors::ConfigError;
use phishguard_classifier::{MODEL_FILE, SCALER_FILE};
use phishguard_features::TRUSTED_DOMAINS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "PHISHGUARD_CONFIG";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address the HTTP server listens on
    pub bind: String,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Permissive CORS for browser extensions
    pub cors_enabled: bool,
    /// Allow-list that bypasses the model. Replaces the built-in list.
    pub trusted_domains: Vec<String>,
    /// Appended to `trusted_domains`
    pub extra_trusted_domains: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            model_path: PathBuf::from(MODEL_FILE),
            scaler_path: PathBuf::from(SCALER_FILE),
            log_level: "info".to_string(),
            cors_enabled: true,
            trusted_domains: TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            extra_trusted_domains: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, overlaid with the TOML file at `path` when given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Apply `PHISHGUARD_*` overrides read through `lookup`
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = non_empty("PHISHGUARD_BIND") {
            self.bind = value;
        }

        if let Some(value) = non_empty("PHISHGUARD_MODEL_PATH") {
            self.model_path = PathBuf::from(value);
        }

        if let Some(value) = non_empty("PHISHGUARD_SCALER_PATH") {
            self.scaler_path = PathBuf::from(value);
        }

        if let Some(value) = non_empty("PHISHGUARD_LOG_LEVEL") {
            self.log_level = value;
        }

        if let Some(value) = non_empty("PHISHGUARD_CORS") {
            if let Some(parsed) = parse_bool(&value) {
                self.cors_enabled = parsed;
            }
        }

        if let Some(value) = non_empty("PHISHGUARD_TRUSTED_DOMAINS") {
            self.extra_trusted_domains.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            );
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Invalid(format!("bind address '{}' is invalid: {}", self.bind, e))
        })?;

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bind address '{}' is invalid: {}", self.bind, e)))
    }

    /// Configured allow-list followed by the extra entries
    pub fn all_trusted_domains(&self) -> Vec<String> {
        self.trusted_domains
            .iter()
            .chain(&self.extra_trusted_domains)
            .cloned()
            .collect()
    }
}

/// Accepts true/false, yes/no, y/n, 1/0 (case-insensitive)
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("y")
        || value == "1"
    {
        Some(true)
    } else if value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("n")
        || value == "0"
    {
        Some(false)
    } else {
        None
    }
}
