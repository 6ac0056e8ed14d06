//! Command dispatch.
//!
//! Connects the loader once, then hands it to the selected command. The
//! returned integer is the process exit code on success.

use anyhow::Result;
use infisical_client::MetricsCollector;
use infisical_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel: &CancellationToken,
) -> Result<i32> {
    let metrics = cli.metrics_bind.is_some().then(MetricsCollector::new);
    let loader = commands::connect(config, metrics, cancel).await?;

    match cli.command {
        Commands::Export {
            format,
            output_file,
        } => {
            commands::export::run(&loader, format, output_file.as_deref(), cancel).await?;
            Ok(0)
        }
        Commands::Run { command } => commands::run::run(&loader, &command, cancel).await,
        Commands::Watch {
            interval,
            format,
            output_file,
        } => {
            commands::watch::run(
                &loader,
                std::time::Duration::from_secs(interval),
                format,
                output_file.as_deref(),
                cancel,
            )
            .await?;
            Ok(0)
        }
    }
}
