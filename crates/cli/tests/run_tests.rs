//! Integration tests for the `run` command.

#![cfg(unix)]

mod common;

use common::{infisical_cmd_with_url, mount_service};
use wiremock::MockServer;

#[tokio::test]
async fn test_run_injects_secrets() {
    let server = MockServer::start().await;
    mount_service(&server, &[("FOO", "bar"), ("GREETING", "hello world")]).await;

    infisical_cmd_with_url(&server.uri())
        .args(["run", "--", "sh", "-c", "printf '%s|%s' \"$FOO\" \"$GREETING\""])
        .assert()
        .success()
        .stdout("bar|hello world");
}

#[tokio::test]
async fn test_run_passes_through_exit_code() {
    let server = MockServer::start().await;
    mount_service(&server, &[("FOO", "bar")]).await;

    infisical_cmd_with_url(&server.uri())
        .args(["run", "--", "sh", "-c", "exit 7"])
        .assert()
        .code(7);
}

#[tokio::test]
async fn test_run_missing_program_fails() {
    let server = MockServer::start().await;
    mount_service(&server, &[]).await;

    infisical_cmd_with_url(&server.uri())
        .args(["run", "--", "definitely-not-a-real-program-xyz"])
        .assert()
        .code(1);
}
