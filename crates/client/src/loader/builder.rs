//! Builder for connecting a [`SecretLoader`].
//!
//! This module is responsible for:
//! - Collecting the validated [`Config`] and optional metrics collector
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//! - Running the one-time authentication that a loader requires
//!
//! # What this module does NOT handle:
//! - Loading secrets (see [`SecretLoader::load`])
//! - Config validation (done by `infisical_config::ConfigBuilder`)
//!
//! # Invariants
//! - A [`SecretLoader`] only exists after a successful authentication
//! - Endpoint paths are joined onto `Config::base_url` exactly as reported
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use infisical_config::constants::DEFAULT_MAX_REDIRECTS;
use infisical_config::{Config, ConfigError};

use crate::auth::Authenticator;
use crate::error::{ClientError, Result};
use crate::fetcher::{SecretFetcher, SecretQuery};
use crate::loader::SecretLoader;
use crate::metrics::MetricsCollector;
use crate::transform::SecretTransformer;

const USER_AGENT: &str = concat!("infisical-client/", env!("CARGO_PKG_VERSION"));

/// Builder for creating a connected [`SecretLoader`].
///
/// ```rust,ignore
/// let loader = SecretLoader::builder()
///     .config(config)
///     .metrics(MetricsCollector::new())
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct SecretLoaderBuilder {
    config: Option<Config>,
    metrics: Option<MetricsCollector>,
    http: Option<reqwest::Client>,
}

impl SecretLoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Record request and load metrics through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Use a preconfigured HTTP client instead of building one from the config.
    ///
    /// The config's timeout still bounds every call.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    fn build_http_client(config: &Config) -> Result<reqwest::Client> {
        let mut http_builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if config.skip_verify() {
            if config.base_url().starts_with("https://") {
                tracing::warn!("TLS certificate verification is disabled");
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        http_builder.build().map_err(ClientError::HttpClient)
    }

    /// Build the HTTP client and authenticate once.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if no config was supplied.
    /// - [`ClientError::HttpClient`] if the HTTP client fails to build.
    /// - [`ClientError::AuthFailed`] if authentication fails.
    pub async fn connect(self) -> Result<SecretLoader> {
        let config = self.config.ok_or(ConfigError::MissingField("config"))?;

        let http = match self.http {
            Some(http) => http,
            None => Self::build_http_client(&config)?,
        };
        let base_url = config.base_url().to_string();

        let authenticator = Authenticator::new(http.clone(), base_url.clone(), config.timeout())
            .with_metrics(self.metrics.clone());
        let fetcher = SecretFetcher::new(http, base_url, config.timeout())
            .with_metrics(self.metrics.clone());

        let token = authenticator.authenticate(config.auth()).await?;

        Ok(SecretLoader::from_parts(
            SecretQuery::from_config(&config),
            SecretTransformer::new(config.prefix()),
            authenticator,
            fetcher,
            token,
            config,
            self.metrics,
        ))
    }
}
