//! Error types for configuration building and loading.
//!
//! Responsibilities:
//! - Define error variants for every configuration failure: missing fields,
//!   auth strategy misuse, invalid values, and `.env` loading.
//!
//! Does NOT handle:
//! - Network or authentication failures at runtime (see `infisical-client`).
//!
//! Invariants:
//! - Every variant is raised synchronously while building configuration and
//!   is never retried.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::auth::AuthMethod;

/// Errors that can occur while building or loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingField(&'static str),

    #[error(
        "Authentication must be set. Configure universal auth (client id + secret) or provider-delegated auth (identity id + token supplier)"
    )]
    MissingAuth,

    #[error("Both universal auth and provider-delegated auth are configured; choose exactly one")]
    AmbiguousAuth,

    #[error("An authentication strategy is already selected ({0}); only one may be set")]
    AuthAlreadySelected(AuthMethod),

    #[error("Requested {expected} credentials but the selected strategy is {actual}")]
    WrongAuthVariant {
        expected: AuthMethod,
        actual: AuthMethod,
    },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
