//! Configuration management for the Infisical secret loader.
//!
//! This crate provides the validated configuration model (project
//! coordinates plus exactly one machine-identity authentication strategy)
//! and a loader that assembles it from environment variables and `.env`
//! files.

pub mod auth;
pub mod constants;
pub mod error;
mod loader;
pub mod supplier;
pub mod types;

pub use auth::{AuthMethod, AuthSelector, AuthSelectorBuilder, ProviderDelegatedAuth, UniversalAuth};
pub use error::ConfigError;
pub use loader::{ConfigLoader, env_var_or_none};
pub use supplier::{FileTokenSupplier, TokenFuture, TokenSupplier, TokenSupplierError};
pub use types::{Config, ConfigBuilder};
