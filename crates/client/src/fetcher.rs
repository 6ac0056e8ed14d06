//! Secret retrieval for one project/environment/path.

use std::time::Duration;

use infisical_config::Config;
use reqwest::Client;
use tracing::{Instrument, info_span};

use crate::auth::AccessToken;
use crate::endpoints;
use crate::error::{ClientError, RequestError};
use crate::metrics::MetricsCollector;
use crate::models::{RawSecret, RawSecretsQuery};

/// Coordinates of the secret set to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretQuery {
    pub environment: String,
    pub project_id: String,
    pub secret_path: String,
}

impl SecretQuery {
    pub fn from_config(config: &Config) -> Self {
        Self {
            environment: config.environment().to_string(),
            project_id: config.project_id().to_string(),
            secret_path: config.secret_path().to_string(),
        }
    }
}

/// Retrieves raw secrets with a bearer token.
#[derive(Debug, Clone)]
pub struct SecretFetcher {
    http: Client,
    base_url: String,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl SecretFetcher {
    pub fn new(http: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Fetch the raw secret list in service order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::FetchFailed`] on transport failure, non-2xx
    /// status, a malformed body, or deadline expiry.
    pub async fn fetch(
        &self,
        token: &AccessToken,
        query: &SecretQuery,
    ) -> Result<Vec<RawSecret>, ClientError> {
        let raw_query = RawSecretsQuery::new(
            &query.environment,
            &query.project_id,
            &query.secret_path,
        );
        let span = info_span!(
            "fetch_secrets",
            environment = %query.environment,
            secret_path = %query.secret_path
        );

        let call = endpoints::list_raw_secrets(
            &self.http,
            &self.base_url,
            token,
            &raw_query,
            self.metrics.as_ref(),
        );

        tokio::time::timeout(self.timeout, call)
            .instrument(span)
            .await
            .unwrap_or(Err(RequestError::Timeout(self.timeout)))
            .map_err(|source| ClientError::FetchFailed {
                environment: query.environment.clone(),
                secret_path: query.secret_path.clone(),
                source,
            })
    }
}
