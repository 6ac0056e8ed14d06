//! CLI command implementations.

pub mod export;
pub mod run;
pub mod watch;

use anyhow::Result;
use infisical_client::{MetricsCollector, SecretLoader};
use infisical_config::Config;
use tracing::info;

use crate::cancellation::{CancellationToken, Cancelled};

/// Authenticate and return a connected loader.
pub async fn connect(
    config: Config,
    metrics: Option<MetricsCollector>,
    cancel: &CancellationToken,
) -> Result<SecretLoader> {
    info!(
        url = %config.base_url(),
        environment = %config.environment(),
        method = %config.auth().method(),
        "Connecting"
    );

    let mut builder = SecretLoader::builder().config(config);
    if let Some(metrics) = metrics {
        builder = builder.metrics(metrics);
    }

    tokio::select! {
        res = builder.connect() => Ok(res?),
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

/// Run one load pass and return the published entries.
pub async fn load_entries(
    loader: &SecretLoader,
    cancel: &CancellationToken,
) -> Result<Vec<(String, String)>> {
    let mut entries: Vec<(String, String)> = Vec::new();
    tokio::select! {
        res = loader.load(&mut entries) => res?,
        _ = cancel.cancelled() => return Err(Cancelled.into()),
    }
    Ok(entries)
}
