//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `ConfigError` onto those codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - The exit status of `run` children, which is passed through unchanged.
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use infisical_client::ClientError;
use infisical_config::ConfigError;

/// Structured exit codes for infisical-load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - rejected credentials or token.
    ///
    /// Scripts should rotate credentials rather than retry.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// Not found - unknown project, environment, or secret path.
    NotFound = 4,

    /// Configuration error - missing or invalid settings, or a bad `.env`.
    ConfigError = 5,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        if err.is_connection_error() {
            return ExitCode::ConnectionError;
        }

        match err {
            ClientError::Config(_) => ExitCode::ConfigError,
            ClientError::AuthFailed { .. } => ExitCode::AuthenticationFailed,
            ClientError::FetchFailed { .. } => match err.status() {
                Some(401 | 403) => ExitCode::AuthenticationFailed,
                Some(404) => ExitCode::NotFound,
                _ => ExitCode::GeneralError,
            },
            ClientError::HttpClient(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigError;
            }
        }

        ExitCode::GeneralError
    }
}
