//! Shared test utilities for infisical-load integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount a mock secrets service answering login and listing requests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - Universal auth with `cid`/`secret` for project `P`, environment `dev`.

use assert_cmd::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(unused_imports)]
pub use infisical_client::testing::{login_body, raw_secrets_body};

/// Returns a hermetic `infisical-load` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Host `INFISICAL_*` variables are cleared.
/// - Environment, project, and universal credentials are set.
pub fn infisical_cmd() -> Command {
    let mut cmd = bare_cmd();

    cmd.env("DOTENV_DISABLED", "1")
        .env("INFISICAL_ENVIRONMENT", "dev")
        .env("INFISICAL_PROJECT_ID", "P")
        .env("INFISICAL_CLIENT_ID", "cid")
        .env("INFISICAL_CLIENT_SECRET", "secret");

    cmd
}

/// Returns an `infisical-load` command with only host `INFISICAL_*` variables cleared.
#[allow(dead_code)]
pub fn bare_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("infisical-load");

    for (key, _) in std::env::vars() {
        if key.starts_with("INFISICAL_") || key == "AZURE_FEDERATED_TOKEN_FILE" {
            cmd.env_remove(&key);
        }
    }
    cmd.env("RUST_LOG", "off");

    cmd
}

/// Returns a hermetic command pointed at `base_url`.
#[allow(dead_code)]
pub fn infisical_cmd_with_url(base_url: &str) -> Command {
    let mut cmd = infisical_cmd();
    cmd.env("INFISICAL_URL", base_url);
    cmd
}

/// Mount a successful login (token `T`) and a listing returning `pairs`.
#[allow(dead_code)]
pub async fn mount_service(server: &MockServer, pairs: &[(&str, &str)]) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/universal-auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("T")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_secrets_body(pairs)))
        .mount(server)
        .await;
}
