//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding [`SourceConfig::api_base`].
pub const API_BASE_ENV: &str = "QCD_API_BASE";

/// Root configuration for the dashboard client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where datasets are fetched from.
    pub sources: SourceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl DashboardConfig {
    /// Apply the API base override, if one was given. Returns whether the
    /// configured base was replaced.
    ///
    /// An explicit value wins over the environment variable.
    pub fn apply_api_base_override(&mut self, explicit: Option<String>) -> bool {
        match explicit.or_else(|| std::env::var(API_BASE_ENV).ok()) {
            Some(base) => {
                self.sources.api_base = base;
                true
            }
            None => false,
        }
    }
}

/// Primary and fallback source locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Origin that relative bases resolve against (the page origin in a browser).
    pub origin: String,

    /// API gateway base. Empty means the root of the origin.
    pub api_base: String,

    /// Base of the static JSON tree used as fallback.
    pub static_base: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000/".to_string(),
            api_base: String::new(),
            static_base: "./sample-data".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    /// Absolute URL of the API gateway base.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        resolve_base(&self.origin, &self.api_base)
    }

    /// Absolute URL of the static fallback tree.
    pub fn static_base_url(&self) -> Result<Url, url::ParseError> {
        resolve_base(&self.origin, &self.static_base)
    }
}

/// Resolve `base` against `origin`, normalising to a trailing slash so that
/// later joins append instead of replacing the last segment.
fn resolve_base(origin: &str, base: &str) -> Result<Url, url::ParseError> {
    let origin = Url::parse(origin)?;
    let mut url = if base.is_empty() {
        origin.join("/")?
    } else {
        origin.join(base)?
    };
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
