//! Configuration assembly for command execution.
//!
//! Precedence, lowest to highest: `.env` (loaded in `main`), process
//! environment, command-line flags. Blank flag values are ignored so an
//! empty variable never shadows a real one.

use std::time::Duration;

use infisical_config::{Config, ConfigError, ConfigLoader};

use crate::args::Cli;

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Build a validated [`Config`] from environment variables and CLI flags.
pub(crate) fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(url) = non_blank(&cli.url) {
        loader = loader.with_base_url(url);
    }
    if let Some(environment) = non_blank(&cli.environment) {
        loader = loader.with_environment(environment);
    }
    if let Some(project_id) = non_blank(&cli.project_id) {
        loader = loader.with_project_id(project_id);
    }
    if let Some(secret_path) = non_blank(&cli.secret_path) {
        loader = loader.with_secret_path(secret_path);
    }
    if let Some(prefix) = non_blank(&cli.prefix) {
        loader = loader.with_prefix(prefix);
    }
    if let Some(client_id) = non_blank(&cli.client_id) {
        loader = loader.with_client_id(client_id);
    }
    if let Some(client_secret) = non_blank(&cli.client_secret) {
        loader = loader.with_client_secret(client_secret);
    }
    if let Some(identity_id) = non_blank(&cli.identity_id) {
        loader = loader.with_identity_id(identity_id);
    }
    if let Some(ref path) = cli.identity_token_file
        && !path.as_os_str().is_empty()
    {
        loader = loader.with_identity_token_file(path.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader.build()
}
