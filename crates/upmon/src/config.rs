//! Configuration loading and validation for the upmon binary.
//!
//! The configuration file is a YAML sequence of endpoint objects. Only
//! `url` is required; `name`, `method`, `headers` and `body` are
//! optional. The sequence order is preserved: it is the order endpoints
//! are probed in each cycle.

use probe::EndpointSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// One endpoint entry in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EndpointConfig {
    /// Display name, unused by the probe logic
    #[serde(default)]
    pub name: Option<String>,

    /// Absolute HTTP/HTTPS URL
    #[validate(custom = "validate_http_url")]
    pub url: String,

    /// HTTP method, defaults to GET
    #[serde(default = "default_method")]
    pub method: String,

    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Optional structured request payload
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl EndpointConfig {
    /// Convert to the probe-layer endpoint descriptor.
    pub fn into_spec(self) -> EndpointSpec {
        EndpointSpec {
            name: self.name,
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: self.body,
        }
    }
}

fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::new("url_scheme_invalid"));
    }
    if probe::domain_of(url).is_empty() {
        return Err(ValidationError::new("url_host_missing"));
    }
    Ok(())
}

/// Load and validate the endpoint list from a YAML file.
///
/// Any failure here is fatal: without an endpoint list there is nothing
/// to monitor.
pub fn load_endpoints(path: impl AsRef<Path>) -> Result<Vec<EndpointSpec>, ConfigError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let configs: Vec<EndpointConfig> = serde_yaml::from_str(&contents)?;

    for config in &configs {
        config.validate()?;
    }

    Ok(configs.into_iter().map(EndpointConfig::into_spec).collect())
}
