//! Configuration module for Vessel Push
//!
//! Handles loading and parsing of YAML configuration files with support for
//! environment variable expansion and validation. Every field has a default,
//! so the client works with no configuration file at all.

use crate::trust::TrustBundle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Production upload endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.vesselapp.com/api3/deploy/upload/";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Client configuration
///
/// # Example
///
/// ```yaml
/// endpoint: "https://www.vesselapp.com/api3/deploy/upload/"
/// connect_timeout_secs: 30
/// read_timeout_secs: 300
/// trust_dir: "/usr/local/share/vessel/certs"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the upload endpoint. Supports ${VAR} expansion.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// TCP connect timeout in seconds. Default: 30
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds; uploads of large artifacts over
    /// slow links need headroom. Default: 300
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Directory holding the bundled CA certificates. When unset, the
    /// process-wide default trust root is used.
    #[serde(default)]
    pub trust_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            trust_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&content);
        let config: ClientConfig = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.endpoint) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid endpoint '{}': must start with http:// or https://",
                self.endpoint
            )));
        }

        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Timeouts must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Build the trust bundle this configuration selects: an explicit
    /// `trust_dir` is loaded fresh, otherwise the shared default bundle.
    pub fn trust_bundle(&self) -> TrustBundle {
        match &self.trust_dir {
            Some(dir) => TrustBundle::load(dir),
            None => TrustBundle::shared().clone(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    300
}

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Expand environment variables in the format ${VAR_NAME}
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.read_timeout_secs, 300);
        assert!(config.trust_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = ClientConfig {
            endpoint: "ftp://example.com/upload".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig {
            read_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("VESSEL_TEST_ENDPOINT", "https://staging.vesselapp.com");
        let content = "endpoint: ${VESSEL_TEST_ENDPOINT}/api3/deploy/upload/";
        let expanded = expand_env_vars(content);
        assert_eq!(
            expanded,
            "endpoint: https://staging.vesselapp.com/api3/deploy/upload/"
        );
        std::env::remove_var("VESSEL_TEST_ENDPOINT");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config: ClientConfig = serde_yaml::from_str("endpoint: \"http://localhost:8000/api3/deploy/upload/\"").unwrap();
        assert_eq!(config.endpoint, "http://localhost:8000/api3/deploy/upload/");
        assert_eq!(config.connect_timeout_secs, 30);
    }
}
