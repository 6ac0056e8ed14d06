//! Export command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use infisical_client::SecretLoader;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_entries, write_to_file};

pub async fn run(
    loader: &SecretLoader,
    format: OutputFormat,
    output_file: Option<&Path>,
    cancel: &CancellationToken,
) -> Result<()> {
    let entries = super::load_entries(loader, cancel).await?;
    let output = format_entries(&entries, format)?;

    if let Some(path) = output_file {
        write_to_file(&output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Wrote {} secrets to {} ({:?} format)",
            entries.len(),
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}
