//! Client configuration
//!
//! A `ClientConfig` is loaded from a YAML or JSON file (JSON is valid YAML)
//! and can be overridden from the environment:
//!
//! - `DATASTORE_EMULATOR_HOST` - talk plain HTTP to a local emulator, no auth
//! - `DATASTORE_PROJECT` - project to query

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::service::{ReadConsistency, ReadOptions, DEFAULT_ENDPOINT};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Emulator host override
pub const EMULATOR_HOST_ENV: &str = "DATASTORE_EMULATOR_HOST";

/// Project override
pub const PROJECT_ENV: &str = "DATASTORE_PROJECT";

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project to query
    #[serde(default)]
    pub project_id: String,

    /// Namespace (default namespace when absent)
    #[serde(default)]
    pub namespace: Option<String>,

    /// Service endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Read consistency sent with every query
    #[serde(default)]
    pub read_consistency: Option<ReadConsistency>,

    /// Default cap on page fetches per query run
    #[serde(default)]
    pub request_limit: Option<u32>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            namespace: None,
            endpoint: default_endpoint(),
            auth: AuthConfig::default(),
            http: HttpConfig::default(),
            read_consistency: None,
            request_limit: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for a project with defaults everywhere else
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file without validating it
    ///
    /// For callers that apply overrides before calling
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Parse and validate a YAML or JSON config
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DATASTORE_EMULATOR_HOST` and `DATASTORE_PROJECT`
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(EMULATOR_HOST_ENV).none_if_empty() {
            debug!("Using emulator at {}", host);
            self.endpoint = if host.contains("://") {
                host
            } else {
                format!("http://{host}")
            };
            self.auth = AuthConfig::None;
        }
        if let Some(project) = lookup(PROJECT_ENV).none_if_empty() {
            self.project_id = project;
        }
        self
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::missing_field("project_id"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.http.retry_backoff.initial_ms > self.http.retry_backoff.max_ms {
            return Err(Error::invalid_value(
                "http.retry_backoff",
                "initial_ms must not exceed max_ms",
            ));
        }
        Ok(())
    }

    /// Read options to send with every query
    pub fn read_options(&self) -> Option<ReadOptions> {
        self.read_consistency.map(|consistency| ReadOptions {
            read_consistency: Some(consistency),
        })
    }

    /// HTTP client settings
    pub fn to_http_client_config(&self) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );

        match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        }
        .build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per page fetch
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting (off when absent)
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
