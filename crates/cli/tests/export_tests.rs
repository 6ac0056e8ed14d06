//! Integration tests for the `export` command.

mod common;

use common::{infisical_cmd_with_url, mount_service};
use predicates::prelude::*;
use wiremock::MockServer;

#[tokio::test]
async fn test_export_dotenv_to_stdout() {
    let server = MockServer::start().await;
    mount_service(&server, &[("FOO", "bar")]).await;

    infisical_cmd_with_url(&server.uri())
        .arg("export")
        .assert()
        .success()
        .stdout("FOO=\"bar\"\n");
}

#[tokio::test]
async fn test_export_applies_first_wins_prefix_and_separator() {
    let server = MockServer::start().await;
    mount_service(
        &server,
        &[("DB__HOST", "db.local"), ("DB__PORT", "5432"), ("DB__HOST", "ignored")],
    )
    .await;

    let output = infisical_cmd_with_url(&server.uri())
        .args(["--prefix", "App:", "export", "--format", "json"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({ "App:DB:HOST": "db.local", "App:DB:PORT": "5432" })
    );
}

#[tokio::test]
async fn test_export_shell_format() {
    let server = MockServer::start().await;
    mount_service(&server, &[("TOKEN", "it's"), ("A__B", "skipped")]).await;

    infisical_cmd_with_url(&server.uri())
        .args(["export", "-f", "shell"])
        .assert()
        .success()
        .stdout("export TOKEN='it'\\''s'\n");
}

#[tokio::test]
async fn test_export_to_file() {
    let server = MockServer::start().await;
    mount_service(&server, &[("FOO", "bar")]).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secrets.yaml");

    infisical_cmd_with_url(&server.uri())
        .args(["export", "--format", "yaml", "--output-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote 1 secrets"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim(), "FOO: bar");
}

#[tokio::test]
async fn test_export_empty_environment() {
    let server = MockServer::start().await;
    mount_service(&server, &[]).await;

    infisical_cmd_with_url(&server.uri())
        .args(["export", "--format", "json"])
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_help_lists_commands() {
    common::infisical_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("export")
                .and(predicate::str::contains("run"))
                .and(predicate::str::contains("watch")),
        );
}
