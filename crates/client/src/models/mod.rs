//! Data models for secrets service requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here.

pub mod auth;
pub mod secrets;

pub use auth::{AzureAuthLoginRequest, MachineIdentityLogin, UniversalAuthLoginRequest};
pub use secrets::{RawSecret, RawSecretsQuery, RawSecretsResponse};
