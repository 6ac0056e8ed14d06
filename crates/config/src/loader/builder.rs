//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges `.env`, environment
//!   variables, and direct builder calls.
//! - Select exactly one authentication strategy from the merged values.
//! - Hand the merged values to `ConfigBuilder` for validation.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Field validation rules (owned by `ConfigBuilder`).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables when called after `from_env()`.
//! - An explicit `with_auth` selector overrides all credential fields.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use crate::auth::AuthSelector;
use crate::error::ConfigError;
use crate::supplier::FileTokenSupplier;
use crate::types::{Config, ConfigBuilder};

/// Configuration loader that builds config from environment variables and explicit values.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    environment: Option<String>,
    project_id: Option<String>,
    secret_path: Option<String>,
    base_url: Option<String>,
    prefix: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    identity_id: Option<String>,
    identity_token_file: Option<PathBuf>,
    auth: Option<AuthSelector>,
    timeout: Option<Duration>,
    skip_verify: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_environment(mut self, environment: String) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_project_id(mut self, project_id: String) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_secret_path(mut self, secret_path: String) -> Self {
        self.secret_path = Some(secret_path);
        self
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_client_id(mut self, client_id: String) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_client_secret(mut self, secret: String) -> Self {
        self.client_secret = Some(SecretString::new(secret.into()));
        self
    }

    pub fn with_identity_id(mut self, identity_id: String) -> Self {
        self.identity_id = Some(identity_id);
        self
    }

    pub fn with_identity_token_file(mut self, path: PathBuf) -> Self {
        self.identity_token_file = Some(path);
        self
    }

    /// Use a prebuilt selector, e.g. one carrying a custom token supplier.
    pub fn with_auth(mut self, auth: AuthSelector) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Choose the auth strategy from the loaded credential fields.
    ///
    /// Universal credentials and delegated credentials are mutually
    /// exclusive; a partial set reports the missing field.
    fn resolve_auth(
        auth: Option<AuthSelector>,
        client_id: Option<String>,
        client_secret: Option<SecretString>,
        identity_id: Option<String>,
        identity_token_file: Option<PathBuf>,
    ) -> Result<AuthSelector, ConfigError> {
        if let Some(auth) = auth {
            return Ok(auth);
        }

        let has_universal = client_id.is_some() || client_secret.is_some();
        let has_delegated = identity_id.is_some() || identity_token_file.is_some();

        match (has_universal, has_delegated) {
            (true, true) => Err(ConfigError::AmbiguousAuth),
            (true, false) => AuthSelector::universal(
                client_id.unwrap_or_default(),
                client_secret
                    .as_ref()
                    .map(|s| s.expose_secret().to_string())
                    .unwrap_or_default(),
            ),
            (false, true) => {
                let path =
                    identity_token_file.ok_or(ConfigError::MissingField("identity_token_file"))?;
                AuthSelector::provider_delegated(
                    identity_id.unwrap_or_default(),
                    FileTokenSupplier::new(path),
                )
            }
            (false, false) => Err(ConfigError::MissingAuth),
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let auth = Self::resolve_auth(
            self.auth,
            self.client_id,
            self.client_secret,
            self.identity_id,
            self.identity_token_file,
        )?;

        let mut builder = ConfigBuilder::new().auth(auth);
        if let Some(environment) = self.environment {
            builder = builder.environment(environment);
        }
        if let Some(project_id) = self.project_id {
            builder = builder.project_id(project_id);
        }
        if let Some(secret_path) = self.secret_path {
            builder = builder.secret_path(secret_path);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(prefix) = self.prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(skip) = self.skip_verify {
            builder = builder.skip_verify(skip);
        }

        builder.build()
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn set_environment(&mut self, environment: Option<String>) {
        self.environment = environment;
    }

    pub(crate) fn set_project_id(&mut self, project_id: Option<String>) {
        self.project_id = project_id;
    }

    pub(crate) fn set_secret_path(&mut self, path: Option<String>) {
        self.secret_path = path;
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    pub(crate) fn set_client_id(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    pub(crate) fn set_client_secret(&mut self, secret: Option<SecretString>) {
        self.client_secret = secret;
    }

    pub(crate) fn set_identity_id(&mut self, identity_id: Option<String>) {
        self.identity_id = identity_id;
    }

    pub(crate) fn set_identity_token_file(&mut self, path: Option<PathBuf>) {
        self.identity_token_file = path;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }
}
