//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `INFISICAL_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use crate::error::ConfigError;

pub const ENV_ENVIRONMENT: &str = "INFISICAL_ENVIRONMENT";
pub const ENV_PROJECT_ID: &str = "INFISICAL_PROJECT_ID";
pub const ENV_SECRET_PATH: &str = "INFISICAL_SECRET_PATH";
pub const ENV_URL: &str = "INFISICAL_URL";
pub const ENV_PREFIX: &str = "INFISICAL_PREFIX";
pub const ENV_CLIENT_ID: &str = "INFISICAL_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "INFISICAL_CLIENT_SECRET";
pub const ENV_IDENTITY_ID: &str = "INFISICAL_IDENTITY_ID";
pub const ENV_IDENTITY_TOKEN_FILE: &str = "INFISICAL_IDENTITY_TOKEN_FILE";
pub const ENV_AZURE_FEDERATED_TOKEN_FILE: &str = "AZURE_FEDERATED_TOKEN_FILE";
pub const ENV_TIMEOUT: &str = "INFISICAL_TIMEOUT";
pub const ENV_SKIP_VERIFY: &str = "INFISICAL_SKIP_VERIFY";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(environment) = env_var_or_none(ENV_ENVIRONMENT) {
        loader.set_environment(Some(environment));
    }
    if let Some(project_id) = env_var_or_none(ENV_PROJECT_ID) {
        loader.set_project_id(Some(project_id));
    }
    if let Some(path) = env_var_or_none(ENV_SECRET_PATH) {
        loader.set_secret_path(Some(path));
    }
    if let Some(url) = env_var_or_none(ENV_URL) {
        loader.set_base_url(Some(url));
    }
    // The prefix is read raw: a deliberate trailing separator must survive.
    if let Ok(prefix) = std::env::var(ENV_PREFIX) {
        loader.set_prefix(Some(prefix));
    }
    if let Some(client_id) = env_var_or_none(ENV_CLIENT_ID) {
        loader.set_client_id(Some(client_id));
    }
    if let Some(secret) = env_var_or_none(ENV_CLIENT_SECRET) {
        loader.set_client_secret(Some(SecretString::new(secret.into())));
    }
    if let Some(identity_id) = env_var_or_none(ENV_IDENTITY_ID) {
        loader.set_identity_id(Some(identity_id));
    }
    if let Some(path) = env_var_or_none(ENV_IDENTITY_TOKEN_FILE)
        .or_else(|| env_var_or_none(ENV_AZURE_FEDERATED_TOKEN_FILE))
    {
        loader.set_identity_token_file(Some(PathBuf::from(path)));
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number of seconds".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY) {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: ENV_SKIP_VERIFY.to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }

    Ok(())
}
