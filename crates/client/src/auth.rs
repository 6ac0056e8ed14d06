//! Access token acquisition.
//!
//! Responsibilities:
//! - Turn an [`AuthSelector`] into an [`AccessToken`] with one login round trip.
//! - Await the delegated token supplier before the login request.
//! - Bound the whole exchange (supplier plus request) by the configured timeout.
//!
//! Does NOT handle:
//! - Token refresh scheduling (see `SecretLoader::reauthenticate`).
//! - Strategy validation (done when the selector is built).
//!
//! Invariants:
//! - Every failure, including supplier failure and deadline expiry, surfaces
//!   as [`ClientError::AuthFailed`] tagged with the strategy.
//! - Tokens are held in [`SecretString`] and never logged.

use std::fmt;
use std::time::Duration;

use infisical_config::AuthSelector;
use reqwest::Client;
use secrecy::SecretString;
use tracing::{Instrument, debug, info_span};

use crate::endpoints::{self, AZURE_AUTH_LOGIN_PATH};
use crate::error::{ClientError, RequestError};
use crate::metrics::{ErrorCategory, MetricsCollector};

/// Bearer token issued by the service for one machine identity session.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into().into()))
    }

    pub fn secret(&self) -> &SecretString {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Performs machine identity logins against one service instance.
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: Client,
    base_url: String,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Authenticator {
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

    /// Obtain an access token for the selected strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] on supplier failure, transport
    /// failure, non-2xx status, a malformed body, or deadline expiry.
    pub async fn authenticate(&self, auth: &AuthSelector) -> Result<AccessToken, ClientError> {
        let method = auth.method();
        let span = info_span!("authenticate", method = %method);

        let result = tokio::time::timeout(self.timeout, self.login(auth))
            .instrument(span)
            .await
            .unwrap_or(Err(RequestError::Timeout(self.timeout)));

        match result {
            Ok(token) => {
                debug!(%method, "Authenticated");
                Ok(token)
            }
            Err(source) => Err(ClientError::AuthFailed { method, source }),
        }
    }

    async fn login(&self, auth: &AuthSelector) -> Result<AccessToken, RequestError> {
        let metrics = self.metrics.as_ref();

        match auth {
            AuthSelector::Universal(creds) => {
                endpoints::universal_auth_login(
                    &self.http,
                    &self.base_url,
                    creds.client_id(),
                    creds.client_secret(),
                    metrics,
                )
                .await
            }
            AuthSelector::ProviderDelegated(delegated) => {
                let jwt = delegated.supplier().fetch_token().await.map_err(|e| {
                    if let Some(m) = metrics {
                        m.record_error(AZURE_AUTH_LOGIN_PATH, "POST", ErrorCategory::Supplier);
                    }
                    RequestError::TokenSupplier(e)
                })?;

                endpoints::azure_auth_login(
                    &self.http,
                    &self.base_url,
                    delegated.identity_id(),
                    &jwt,
                    metrics,
                )
                .await
            }
        }
    }
}
