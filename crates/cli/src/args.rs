//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Mirror every `INFISICAL_*` configuration variable as a global flag.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate configuration (see `config_context` module).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::formatters::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "infisical-load")]
#[command(
    about = "Load secrets from Infisical and publish them as configuration",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  infisical-load -e dev -p $PROJECT_ID export --format json\n  infisical-load run -- ./server --port 8080\n  infisical-load watch --interval 300 --output-file /run/secrets/app.env\n"
)]
pub struct Cli {
    /// Base URL of the Infisical instance (e.g., https://app.infisical.com)
    #[arg(short, long, global = true, env = "INFISICAL_URL")]
    pub url: Option<String>,

    /// Environment slug to read secrets from (e.g., dev, prod)
    #[arg(short, long, global = true, env = "INFISICAL_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Project (workspace) id
    #[arg(short, long, global = true, env = "INFISICAL_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Folder path of the secrets within the environment
    #[arg(long, global = true, env = "INFISICAL_SECRET_PATH")]
    pub secret_path: Option<String>,

    /// Prefix prepended to every published key
    #[arg(long, global = true, env = "INFISICAL_PREFIX", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Machine identity client id for universal auth
    #[arg(long, global = true, env = "INFISICAL_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Machine identity client secret for universal auth
    #[arg(long, global = true, env = "INFISICAL_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Machine identity id for Azure (provider-delegated) auth
    #[arg(long, global = true, env = "INFISICAL_IDENTITY_ID")]
    pub identity_id: Option<String>,

    /// File holding the identity provider token for Azure auth
    #[arg(long, global = true, env = "INFISICAL_IDENTITY_TOKEN_FILE", value_name = "FILE")]
    pub identity_token_file: Option<PathBuf>,

    /// Request timeout in seconds (bounds each login and fetch)
    #[arg(long, global = true, env = "INFISICAL_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "INFISICAL_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Default log filter when RUST_LOG is unset (e.g., info, debug)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// OTLP endpoint for trace export (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "INFISICAL_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Service name reported with exported traces
    #[arg(long, global = true, env = "OTEL_SERVICE_NAME", default_value = "infisical-load")]
    pub otel_service_name: String,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load secrets once and print them
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dotenv)]
        format: OutputFormat,

        /// Write to this file (atomically) instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output_file: Option<PathBuf>,
    },

    /// Load secrets once and run a command with them in its environment
    Run {
        /// Command and arguments to run
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },

    /// Reload secrets on an interval, republishing the last good set on failure
    Watch {
        /// Seconds between reloads
        #[arg(
            short,
            long,
            default_value_t = 60,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dotenv)]
        format: OutputFormat,

        /// Rewrite this file (atomically) after every reload instead of printing
        #[arg(short, long, value_name = "FILE")]
        output_file: Option<PathBuf>,
    },
}
