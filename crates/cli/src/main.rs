//! infisical-load - Load secrets from Infisical into the environment of a process.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build a validated configuration and connect a secret loader.
//! - Publish loaded secrets to stdout, a file, or a child process.
//!
//! Does NOT handle:
//! - Authentication, fetching, or key rewriting (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Secret values are written only to the chosen output, never to logs.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use infisical_client::{MetricsExporter, TracingConfig};
use infisical_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name(cli.otel_service_name.clone())
        .with_default_filter(cli.log_level.clone());
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let _metrics_exporter = match cli.metrics_bind.as_deref().map(MetricsExporter::install) {
        Some(Ok(exporter)) => Some(exporter),
        Some(Err(e)) => {
            eprintln!("Failed to start metrics exporter: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
        None => None,
    };

    let config = match config_context::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {}", e);
            tracing_guard.shutdown();
            std::process::exit(ExitCode::ConfigError.as_i32());
        }
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let code = match run_command(cli, config, &cancel).await {
        Ok(code) => code,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted.as_i32()
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code().as_i32()
        }
    };

    tracing_guard.shutdown();
    std::process::exit(code);
}
