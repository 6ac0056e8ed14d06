//! Testing utilities for client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! ```ignore
//! use infisical_client::testing::{load_fixture, raw_secrets_body};
//!
//! let login = load_fixture("auth/login_success.json");
//! let listing = raw_secrets_body(&[("FOO", "bar")]);
//! ```

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Build a raw secrets listing body from `(key, value)` pairs, in order.
pub fn raw_secrets_body(pairs: &[(&str, &str)]) -> serde_json::Value {
    let secrets: Vec<serde_json::Value> = pairs
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            serde_json::json!({
                "id": format!("secret-{i}"),
                "workspace": "P",
                "environment": "dev",
                "version": 1,
                "type": "shared",
                "secretKey": key,
                "secretValue": value,
                "secretComment": ""
            })
        })
        .collect();

    serde_json::json!({ "secrets": secrets, "imports": [] })
}

/// Build a login response body carrying `token`.
pub fn login_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "accessToken": token,
        "expiresIn": 7200,
        "accessTokenMaxTTL": 43200,
        "tokenType": "Bearer"
    })
}
