//! REST API endpoint implementations.
//!
//! Each function performs exactly one request against the secrets service
//! and returns a [`crate::error::RequestError`] on failure; callers attach
//! the pipeline stage.

mod auth;
mod request;
mod secrets;

pub use auth::{
    AZURE_AUTH_LOGIN_PATH, UNIVERSAL_AUTH_LOGIN_PATH, azure_auth_login, universal_auth_login,
};
pub use request::{parse_json, send_request};
pub use secrets::{RAW_SECRETS_PATH, list_raw_secrets};
