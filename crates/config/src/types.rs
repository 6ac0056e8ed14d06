//! Loader configuration types.
//!
//! [`Config`] holds the project/environment coordinates, the selected
//! authentication strategy, and connection settings. It is immutable once
//! built; [`ConfigBuilder`] is the only way to construct one.

use std::time::Duration;

use crate::auth::AuthSelector;
use crate::constants::{
    API_PATH_SUFFIX, DEFAULT_BASE_URL, DEFAULT_SECRET_PATH, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::error::ConfigError;

/// Validated loader configuration.
#[derive(Debug, Clone)]
pub struct Config {
    environment: String,
    project_id: String,
    auth: AuthSelector,
    secret_path: String,
    base_url: String,
    prefix: String,
    timeout: Duration,
    skip_verify: bool,
}

impl Config {
    /// Create a builder with default optional settings.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Environment slug (e.g. `dev`, `prod`).
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Project (workspace) id.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn auth(&self) -> &AuthSelector {
        &self.auth
    }

    /// Folder scope within the environment.
    pub fn secret_path(&self) -> &str {
        &self.secret_path
    }

    /// Service base URL without a trailing `/api` or slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// String prepended to every output key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Deadline applied to each network call and to the token supplier.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn skip_verify(&self) -> bool {
        self.skip_verify
    }
}

/// Builder for [`Config`].
///
/// `environment`, `project_id` and `auth` are required. Everything else has
/// a default: secret path `/`, the production service URL, an empty prefix
/// and a 30 second timeout.
///
/// ```rust,ignore
/// let config = Config::builder()
///     .environment("dev")
///     .project_id("project-id")
///     .auth(AuthSelector::universal("client-id", "client-secret")?)
///     .base_url("https://secrets.example.com/api")
///     .build()?;
/// assert_eq!(config.base_url(), "https://secrets.example.com");
/// ```
#[derive(Debug)]
pub struct ConfigBuilder {
    environment: Option<String>,
    project_id: Option<String>,
    auth: Option<AuthSelector>,
    secret_path: String,
    base_url: String,
    prefix: String,
    timeout: Duration,
    skip_verify: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            environment: None,
            project_id: None,
            auth: None,
            secret_path: DEFAULT_SECRET_PATH.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            prefix: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_verify: false,
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn auth(mut self, auth: AuthSelector) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn secret_path(mut self, secret_path: impl Into<String>) -> Self {
        self.secret_path = secret_path.into();
        self
    }

    /// Set the service base URL. Trailing slashes and a trailing `/api` are stripped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = strip_api_suffix(base_url.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification (self-hosted instances with
    /// self-signed certificates only).
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingField`] for an empty environment, project id,
    ///   base URL or secret path.
    /// - [`ConfigError::MissingAuth`] if no strategy was supplied.
    /// - [`ConfigError::InvalidValue`] for a malformed base URL or an
    ///   out-of-range timeout.
    pub fn build(self) -> Result<Config, ConfigError> {
        let environment = non_empty(self.environment, "environment")?;
        let project_id = non_empty(self.project_id, "project_id")?;
        let auth = self.auth.ok_or(ConfigError::MissingAuth)?;
        let base_url = non_empty(Some(self.base_url), "base_url")?;
        let secret_path = non_empty(Some(self.secret_path), "secret_path")?;

        validate_base_url(&base_url)?;
        validate_timeout(self.timeout)?;

        Ok(Config {
            environment,
            project_id,
            auth,
            secret_path,
            base_url,
            prefix: self.prefix,
            timeout: self.timeout,
            skip_verify: self.skip_verify,
        })
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingField(field))
}

/// Remove trailing slashes and a single trailing `/api` from a
/// caller-supplied base URL.
///
/// Endpoint paths already start with `/api/...`, so a URL copied from the
/// service's API docs would otherwise produce `/api/api/...`. The result is
/// the exact prefix endpoint paths are joined onto.
pub fn strip_api_suffix(url: String) -> String {
    let trimmed = url.trim_end_matches('/');
    let base = trimmed.strip_suffix(API_PATH_SUFFIX).unwrap_or(trimmed);
    base.trim_end_matches('/').to_string()
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://app.infisical.com): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://app.infisical.com)".into(),
        });
    }

    Ok(())
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    if timeout.is_zero() {
        return Err(ConfigError::InvalidValue {
            var: "timeout".into(),
            message: "must be greater than 0 seconds".into(),
        });
    }
    if timeout.as_secs() > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidValue {
            var: "timeout".into(),
            message: format!("exceeds maximum allowed value of {MAX_TIMEOUT_SECS} seconds"),
        });
    }
    Ok(())
}
