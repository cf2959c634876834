//! Configuration types and loading

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Postal-code lookup service
    pub postal: PostalConfig,

    /// Session-scoped attachment mirror
    pub session: SessionConfig,

    /// Where the assembled document is written
    pub output: OutputConfig,

    /// Log filter defaults
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostalConfig {
    /// Base URL of the ViaCEP-compatible service
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory backing the session storage (one file per key)
    pub dir: PathBuf,
    /// Key the attachment metadata list is stored under
    pub attachments_key: String,
    /// Total bytes the session storage accepts before refusing writes
    pub quota_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub default_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            postal: PostalConfig {
                base_url: "https://viacep.com.br".to_string(),
                timeout_seconds: 10,
            },
            session: SessionConfig {
                dir: std::env::temp_dir().join("supplier-registration-session"),
                attachments_key: "anexos".to_string(),
                quota_bytes: 5 * 1024 * 1024, // 5 MiB, the usual browser allowance
            },
            output: OutputConfig {
                path: PathBuf::from("fornecedor.json"),
            },
            logging: LoggingConfig {
                default_filter: "info,sr_services=debug,sr_attachments=debug".to_string(),
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for crate::error::SrError {
    fn from(err: ConfigError) -> Self {
        crate::error::SrError::Config(err.to_string())
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Postal lookup
        if let Some(url) = var("SR_POSTAL_BASE_URL") {
            config.postal.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = var("SR_POSTAL_TIMEOUT_SECONDS") {
            config.postal.timeout_seconds = parse_number("SR_POSTAL_TIMEOUT_SECONDS", &timeout)?;
        }

        // Session
        if let Some(dir) = var("SR_SESSION_DIR") {
            config.session.dir = PathBuf::from(dir);
        }
        if let Some(key) = var("SR_SESSION_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "SR_SESSION_KEY".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
            config.session.attachments_key = key;
        }
        if let Some(quota) = var("SR_SESSION_QUOTA_BYTES") {
            config.session.quota_bytes = parse_number("SR_SESSION_QUOTA_BYTES", &quota)?;
        }

        // Output
        if let Some(path) = var("SR_OUTPUT_PATH") {
            config.output.path = PathBuf::from(path);
        }

        // Logging
        if let Some(filter) = var("SR_LOG_FILTER") {
            config.logging.default_filter = filter;
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}
