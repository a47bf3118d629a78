use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const CONFIG_DIR: &str = "config";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOAST_TTL_SECS: u64 = 3;

/// Console configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Base URL of the remote inventory API, e.g. `http://host:5000/api`
    #[serde(default = "default_api_base_url")]
    #[validate(url)]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long a notification stays visible before auto-dismissing
    #[serde(default = "default_toast_ttl_secs")]
    pub toast_ttl_secs: u64,

    /// Log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_toast_ttl_secs() -> u64 {
    DEFAULT_TOAST_TTL_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            toast_ttl_secs: default_toast_ttl_secs(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Loads configuration from `config/default.toml` (optional) layered with
/// `APP__`-prefixed environment variables, then validates it.
pub fn load_config() -> Result<ConsoleConfig, ConfigLoadError> {
    let cfg: ConsoleConfig = Config::builder()
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

/// Initialises the tracing subscriber. RUST_LOG overrides the configured
/// level. Safe to call more than once; later calls are no-ops.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("stockroom_console={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter = EnvFilter::new(filter_directive);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConsoleConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.toast_ttl_secs, 3);
    }

    #[test]
    fn rejects_non_url_base() {
        let cfg = ConsoleConfig {
            api_base_url: "not a url".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
