//! Secret loading orchestration with last-good fallback.
//!
//! Responsibilities:
//! - Hold the access token obtained at connect time.
//! - Run fetch then transform on every [`SecretLoader::load`] call.
//! - Keep the last successfully published snapshot and republish it when a
//!   later load fails.
//!
//! Does NOT handle:
//! - Scheduling reloads (the host decides when to call `load`).
//! - Retrying failed requests.
//!
//! Invariants:
//! - The cache is replaced wholesale on success and untouched on failure.
//! - A load pass publishes either the fresh snapshot or the previous one,
//!   never a mix.
//! - Concurrent `load` calls are serialized; the sink is written inside the
//!   critical section.

mod builder;

use std::fmt;
use std::sync::Arc;

use infisical_config::Config;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub use builder::SecretLoaderBuilder;

use crate::auth::{AccessToken, Authenticator};
use crate::error::Result;
use crate::fetcher::{SecretFetcher, SecretQuery};
use crate::metrics::{LoadOutcome, MetricsCollector};
use crate::sink::ConfigSink;
use crate::transform::{SecretSnapshot, SecretTransformer};

/// Lifecycle state of a [`SecretLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Connected; no load has run yet.
    Authenticated,
    /// The most recent load published fresh secrets.
    Loaded,
    /// The most recent load failed; the previous snapshot (if any) was republished.
    LoadFailedWithFallback,
}

#[derive(Debug)]
struct CacheState {
    state: LoadState,
    snapshot: Option<Arc<SecretSnapshot>>,
}

/// Loads secrets from the service into a host-provided sink.
///
/// ```rust,ignore
/// let loader = SecretLoader::connect(config).await?;
/// let mut entries = Vec::new();
/// loader.load(&mut entries).await?;
/// ```
pub struct SecretLoader {
    config: Config,
    query: SecretQuery,
    transformer: SecretTransformer,
    authenticator: Authenticator,
    fetcher: SecretFetcher,
    token: AccessToken,
    metrics: Option<MetricsCollector>,
    cache: Mutex<CacheState>,
}

impl SecretLoader {
    /// Create a new loader builder.
    pub fn builder() -> SecretLoaderBuilder {
        SecretLoaderBuilder::new()
    }

    /// Connect with default settings: build the HTTP client and authenticate.
    pub async fn connect(config: Config) -> Result<Self> {
        SecretLoaderBuilder::new().config(config).connect().await
    }

    pub(crate) fn from_parts(
        query: SecretQuery,
        transformer: SecretTransformer,
        authenticator: Authenticator,
        fetcher: SecretFetcher,
        token: AccessToken,
        config: Config,
        metrics: Option<MetricsCollector>,
    ) -> Self {
        Self {
            config,
            query,
            transformer,
            authenticator,
            fetcher,
            token,
            metrics,
            cache: Mutex::new(CacheState {
                state: LoadState::Authenticated,
                snapshot: None,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LoadState {
        self.cache.lock().await.state
    }

    /// Last successfully published snapshot, if any.
    pub async fn cached(&self) -> Option<Arc<SecretSnapshot>> {
        self.cache.lock().await.snapshot.clone()
    }

    /// Fetch, transform, and publish secrets into `sink`.
    ///
    /// On success the fresh snapshot replaces the cache and is published.
    /// On failure the previous snapshot, if any, is published unchanged and
    /// the original error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::FetchFailed`] if the secrets could not be
    /// retrieved or decoded.
    pub async fn load<S: ConfigSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let mut cache = self.cache.lock().await;

        match self.fetcher.fetch(&self.token, &self.query).await {
            Ok(secrets) => {
                let snapshot = Arc::new(self.transformer.transform(secrets));
                snapshot.publish(sink);

                if let Some(m) = &self.metrics {
                    m.record_load(LoadOutcome::Success);
                    m.record_secrets_loaded(snapshot.len());
                }
                info!(
                    environment = %self.query.environment,
                    secret_path = %self.query.secret_path,
                    count = snapshot.len(),
                    "Loaded secrets"
                );

                cache.snapshot = Some(snapshot);
                cache.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                match &cache.snapshot {
                    Some(previous) => {
                        previous.publish(sink);
                        if let Some(m) = &self.metrics {
                            m.record_load(LoadOutcome::Fallback);
                        }
                        warn!(
                            error = %err,
                            count = previous.len(),
                            "Secret load failed; republished last-good snapshot"
                        );
                    }
                    None => {
                        if let Some(m) = &self.metrics {
                            m.record_load(LoadOutcome::Failed);
                        }
                        warn!(error = %err, "Secret load failed with no previous snapshot");
                    }
                }

                cache.state = LoadState::LoadFailedWithFallback;
                Err(err)
            }
        }
    }

    /// Obtain a fresh access token, replacing the current one.
    ///
    /// The cache and state are left unchanged. On failure the old token is kept.
    pub async fn reauthenticate(&mut self) -> Result<()> {
        let token = self.authenticator.authenticate(self.config.auth()).await?;
        self.token = token;
        info!(method = %self.config.auth().method(), "Re-authenticated");
        Ok(())
    }
}

impl fmt::Debug for SecretLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretLoader")
            .field("query", &self.query)
            .field("prefix", &self.transformer.prefix())
            .field("method", &self.config.auth().method())
            .finish_non_exhaustive()
    }
}
