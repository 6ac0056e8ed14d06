//! Watch command implementation.
//!
//! Reloads on a fixed interval. A failed reload republishes the last good
//! snapshot (the loader handles that), so the output keeps its previous
//! content instead of going empty.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use infisical_client::SecretLoader;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::cancellation::{CancellationToken, Cancelled};
use crate::formatters::{OutputFormat, format_entries, write_to_file};

pub async fn run(
    loader: &SecretLoader,
    interval: Duration,
    format: OutputFormat,
    output_file: Option<&Path>,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => return Err(Cancelled.into()),
        }

        let mut entries: Vec<(String, String)> = Vec::new();
        let result = tokio::select! {
            res = loader.load(&mut entries) => res,
            _ = cancel.cancelled() => return Err(Cancelled.into()),
        };

        match result {
            Ok(()) => info!(count = entries.len(), "Reloaded secrets"),
            Err(e) if loader.cached().await.is_none() => {
                warn!(error = %e, "Reload failed and no previous secrets are available");
                continue;
            }
            Err(e) => warn!(
                error = %e,
                count = entries.len(),
                "Reload failed; serving previously loaded secrets"
            ),
        }

        let output = format_entries(&entries, format)?;
        match output_file {
            Some(path) => write_to_file(&output, path)
                .with_context(|| format!("Failed to write output to {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(output.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("Failed to write to stdout")?;
            }
        }
    }
}
