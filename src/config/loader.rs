//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DashboardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file. Not validated.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from TOML text. Not validated.
pub fn parse_config(content: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build the effective configuration: file (or defaults), then the API base
/// override, then validation of the result.
///
/// Returns the config and whether the API base was overridden.
pub fn resolve_config(
    path: Option<&Path>,
    api_base: Option<String>,
) -> Result<(DashboardConfig, bool), ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };
    let overridden = config.apply_api_base_override(api_base);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok((config, overridden))
}
