//! Authentication module
//!
//! Supports: no auth (emulator), Bearer access token, API key
//!
//! Credentials are obtained elsewhere; this module only attaches them to
//! outgoing requests.

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// OAuth2 access token sent as `Authorization: Bearer`
    Bearer {
        /// The access token
        token: String,
    },

    /// API key sent as the `key` query parameter
    ApiKey {
        /// The API key value
        key: String,
    },
}

impl AuthConfig {
    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create an API key config
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => req,
            Self::Bearer { token } => req.bearer_auth(token),
            Self::ApiKey { key } => req.query(&[("key", key)]),
        }
    }

    /// Short name of the auth type, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "api_key",
        }
    }
}

#[cfg(test)]
mod tests;
