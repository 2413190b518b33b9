//! Configuration loading for the markt workspace
//!
//! Two-tier resolution with ENV → TOML priority. The TOML file is bootstrap
//! configuration only; a missing file is not an error as long as the required
//! values arrive through the environment.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional in the file; required values are checked after ENV
/// overrides are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the records backend REST API
    #[serde(default)]
    pub records_base_url: Option<String>,

    /// App identifier within the records backend
    #[serde(default)]
    pub records_app_id: Option<String>,

    /// Optional API key for the records backend
    #[serde(default)]
    pub records_api_key: Option<String>,

    /// Endpoint of the photo extraction service (optional)
    #[serde(default)]
    pub extraction_url: Option<String>,

    /// Whether the photo-scan feature is enabled
    #[serde(default)]
    pub photo_scan_enabled: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the records backend REST API
    pub records_base_url: String,

    /// App identifier within the records backend
    pub records_app_id: String,

    /// Optional API key for the records backend
    pub records_api_key: Option<String>,

    /// Endpoint of the photo extraction service
    pub extraction_url: Option<String>,

    /// Whether the photo-scan feature is enabled
    pub photo_scan_enabled: bool,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from TOML file and environment
    ///
    /// Config file path resolution priority:
    /// 1. Explicit `path` argument
    /// 2. `MARKT_CONFIG` environment variable
    /// 3. Platform config directory (`<config_dir>/markt/config.toml`)
    ///
    /// Individual values from `MARKT_RECORDS_URL`, `MARKT_RECORDS_APP_ID`,
    /// `MARKT_RECORDS_API_KEY` and `MARKT_EXTRACTION_URL` take priority over
    /// their TOML counterparts.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file exists but cannot be parsed, or
    /// if a required value is missing from every source.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let toml_config = match resolve_config_path(path) {
            Some(config_path) if config_path.exists() => {
                let content = std::fs::read_to_string(&config_path)?;
                let parsed: TomlConfig = toml::from_str(&content).map_err(|e| {
                    Error::Config(format!(
                        "Failed to parse {}: {}",
                        config_path.display(),
                        e
                    ))
                })?;
                info!("Loaded TOML configuration from {}", config_path.display());
                parsed
            }
            Some(config_path) => {
                warn!(
                    "Config file not found: {}, continuing with environment only",
                    config_path.display()
                );
                TomlConfig::default()
            }
            None => TomlConfig::default(),
        };

        let records_base_url = resolve_value(
            "records_base_url",
            "MARKT_RECORDS_URL",
            toml_config.records_base_url,
        )
        .ok_or_else(|| {
            Error::Config(
                "Records backend URL not configured. Please configure using one of:\n\
                 1. Environment: MARKT_RECORDS_URL=https://backend.example/rest\n\
                 2. TOML config: ~/.config/markt/config.toml (records_base_url = \"...\")"
                    .to_string(),
            )
        })?;

        let records_app_id = resolve_value(
            "records_app_id",
            "MARKT_RECORDS_APP_ID",
            toml_config.records_app_id,
        )
        .ok_or_else(|| {
            Error::Config(
                "Records app id not configured. Please configure using one of:\n\
                 1. Environment: MARKT_RECORDS_APP_ID=your-app-id\n\
                 2. TOML config: ~/.config/markt/config.toml (records_app_id = \"...\")"
                    .to_string(),
            )
        })?;

        let records_api_key = resolve_value(
            "records_api_key",
            "MARKT_RECORDS_API_KEY",
            toml_config.records_api_key,
        );

        let extraction_url = resolve_value(
            "extraction_url",
            "MARKT_EXTRACTION_URL",
            toml_config.extraction_url,
        );

        Ok(Config {
            records_base_url,
            records_app_id,
            records_api_key,
            extraction_url,
            photo_scan_enabled: toml_config.photo_scan_enabled,
            request_timeout: Duration::from_secs(toml_config.request_timeout_secs),
            logging: toml_config.logging,
        })
    }
}

/// Resolve one value with ENV → TOML priority
///
/// Blank values (empty or whitespace-only) are treated as unset in both
/// sources. Warns when both sources carry a value.
fn resolve_value(key: &str, env_var: &str, toml_value: Option<String>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_value(v));
    let toml_value = toml_value.filter(|v| is_valid_value(v));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} found in both {} and TOML config. Using environment (highest priority).",
            key, env_var
        );
    }

    env_value.or(toml_value)
}

/// Validate a configuration value (non-empty, non-whitespace)
fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Resolve config file path, if any source names one
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var("MARKT_CONFIG") {
        if is_valid_value(&path) {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|d| d.join("markt").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_default_request_timeout() {
        assert_eq!(default_request_timeout_secs(), 15);
    }

    #[test]
    fn test_is_valid_value() {
        assert!(is_valid_value("https://backend.example"));
        assert!(!is_valid_value(""));
        assert!(!is_valid_value("   "));
    }

    #[test]
    fn test_toml_config_all_keys_optional() {
        let parsed: TomlConfig = toml::from_str("").unwrap();
        assert!(parsed.records_base_url.is_none());
        assert!(!parsed.photo_scan_enabled);
        assert_eq!(parsed.request_timeout_secs, 15);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_toml_config_parses_full_file() {
        let parsed: TomlConfig = toml::from_str(
            r#"
            records_base_url = "https://backend.example/rest"
            records_app_id = "abc123"
            photo_scan_enabled = true
            request_timeout_secs = 30

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            parsed.records_base_url.as_deref(),
            Some("https://backend.example/rest")
        );
        assert!(parsed.photo_scan_enabled);
        assert_eq!(parsed.request_timeout_secs, 30);
        assert_eq!(parsed.logging.level, "debug");
    }
}
