//! Infisical secret loading client.
//!
//! This crate authenticates a machine identity against an Infisical
//! instance, fetches the raw secrets for one project/environment/path, and
//! publishes them as configuration key/value pairs. A failed reload
//! republishes the last good snapshot before returning the error.

mod auth;
pub mod endpoints;
pub mod error;
mod fetcher;
mod loader;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
mod sink;
pub mod telemetry;
mod transform;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AccessToken, Authenticator};
pub use error::{ClientError, RequestError, Result};
pub use fetcher::{SecretFetcher, SecretQuery};
pub use loader::{LoadState, SecretLoader, SecretLoaderBuilder};
pub use metrics::{ErrorCategory, LoadOutcome, MetricsCollector};
pub use metrics_exporter::MetricsExporter;
pub use models::RawSecret;
pub use sink::ConfigSink;
pub use telemetry::{TracingConfig, TracingGuard};
pub use transform::{SecretSnapshot, SecretTransformer, output_key};
