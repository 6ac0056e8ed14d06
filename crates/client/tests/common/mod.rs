//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for testing the Infisical client against a
//! wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Mocks mount on the exact service paths the client requests

use std::time::Duration;

use infisical_config::{AuthSelector, Config};

#[allow(unused_imports)]
pub use infisical_client::testing::{load_fixture, login_body, raw_secrets_body};

#[allow(unused_imports)]
pub use infisical_client::endpoints;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{body_json, method, path};

/// Config pointing at `base_url` with universal credentials `cid`/`secret`.
#[allow(dead_code)]
pub fn universal_config(base_url: &str) -> Config {
    config_with_auth(
        base_url,
        AuthSelector::universal("cid", "secret").expect("valid universal auth"),
    )
}

/// Config for project `P`, environment `dev`, path `/`, with the given auth.
#[allow(dead_code)]
pub fn config_with_auth(base_url: &str, auth: AuthSelector) -> Config {
    Config::builder()
        .environment("dev")
        .project_id("P")
        .auth(auth)
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("valid config")
}

/// Mount a universal-auth login that answers with `token`.
#[allow(dead_code)]
pub async fn mount_universal_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/universal-auth/login"))
        .and(body_json(serde_json::json!({
            "clientId": "cid",
            "clientSecret": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(token)))
        .mount(server)
        .await;
}
