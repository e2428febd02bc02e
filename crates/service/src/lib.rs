//! PhishGuard Detection Service
//!
//! Wraps feature extraction, the classifier and the explainer behind an
//! HTTP API. Artifacts are loaded once into an immutable [`Detector`]
//! shared by every request.
//!
//! Modules:
//! - `config`: TOML and environment configuration
//! - `trusted`: Allow-list short circuit
//! - `detector`: The per-URL pipeline
//! - `server`: axum router and handlers
//! - `logging`: Subscriber setup
//! - `errors`: Error types

pub mod config;
pub mod detector;
pub mod errors;
pub mod logging;
pub mod server;
pub mod trusted;

pub use config::{parse_bool, ServiceConfig};
pub use detector::{Assessment, Detector, ModelState, Status, TRUSTED_PROBABILITY};
pub use errors::{ConfigError, DetectorError};
pub use server::{build_router, start_server, AppState};
pub use trusted::{boundary_domain, TrustedDomains};

/// Crate version reported by `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
