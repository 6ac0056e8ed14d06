//! Error types for the Infisical client.
//!
//! Responsibilities:
//! - Describe a single failed HTTP exchange ([`RequestError`]).
//! - Classify failures by the pipeline stage that raised them ([`ClientError`]):
//!   configuration, authentication, or secret fetch.
//!
//! Invariants:
//! - No variant carries a secret value, access token, or request body.
//! - Deserialization failures are reported at the call site that decoded the
//!   body, so they inherit that call site's stage.

use std::time::Duration;

use infisical_config::{AuthMethod, ConfigError, TokenSupplierError};
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of one request/response exchange with the secrets service.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Transport-level failure (connection refused, DNS, TLS, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status returned by the service.
    #[error("API error ({status}) at {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body did not match the expected schema.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The call did not complete within the configured deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The delegated identity token could not be obtained.
    #[error("Identity token supplier failed: {0}")]
    TokenSupplier(TokenSupplierError),
}

impl RequestError {
    /// HTTP status of an API error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error means the service could not be reached in time.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// Errors that can occur while authenticating or loading secrets.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration or auth strategy misuse.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Login against the service failed.
    #[error("Authentication failed ({method}): {source}")]
    AuthFailed {
        method: AuthMethod,
        #[source]
        source: RequestError,
    },

    /// Retrieving secrets failed.
    #[error(
        "Failed to fetch secrets for environment '{environment}' at path '{secret_path}': {source}"
    )]
    FetchFailed {
        environment: String,
        secret_path: String,
        #[source]
        source: RequestError,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed { .. })
    }

    /// Check if this error was raised while fetching secrets.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    /// Check if this error is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// The underlying request failure, if any.
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::AuthFailed { source, .. } | Self::FetchFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// HTTP status returned by the service, if any.
    pub fn status(&self) -> Option<u16> {
        self.request_error().and_then(RequestError::status)
    }

    /// Check if the service could not be reached or did not answer in time.
    pub fn is_connection_error(&self) -> bool {
        self.request_error()
            .is_some_and(RequestError::is_connection_error)
    }
}
