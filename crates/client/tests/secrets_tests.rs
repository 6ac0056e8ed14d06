//! Raw secrets listing tests.
//!
//! This module tests:
//! - Query string and bearer header sent to the listing endpoint
//! - Response order preservation
//! - Error mapping for forbidden, server error, and malformed responses
//!
//! # What this does NOT handle
//! - Duplicate resolution and key rewriting (see loader_tests.rs)

mod common;

use std::time::Duration;

use common::*;
use infisical_client::{AccessToken, ClientError, RequestError, SecretFetcher, SecretQuery};
use wiremock::matchers::{header, method, path, query_param};

fn query() -> SecretQuery {
    SecretQuery {
        environment: "dev".to_string(),
        project_id: "P".to_string(),
        secret_path: "/backend".to_string(),
    }
}

#[tokio::test]
async fn test_list_raw_secrets_sends_query_and_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .and(query_param("environment", "dev"))
        .and(query_param("workspaceId", "P"))
        .and(query_param("secretPath", "/backend"))
        .and(query_param("include_imports", "true"))
        .and(query_param("recursive", "true"))
        .and(header("authorization", "Bearer T"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("secrets/list_raw.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = SecretFetcher::new(Client::new(), mock_server.uri(), Duration::from_secs(5));
    let secrets = fetcher.fetch(&AccessToken::new("T"), &query()).await.unwrap();

    let keys: Vec<&str> = secrets.iter().map(|s| s.secret_key.as_str()).collect();
    assert_eq!(keys, ["DATABASE__HOST", "DATABASE__PORT", "API_KEY"]);
    assert_eq!(secrets[2].secret_value, "sk-test-123");
}

#[tokio::test]
async fn test_list_keeps_duplicates_in_service_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("secrets/list_with_imports.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let secrets = endpoints::list_raw_secrets(
        &client,
        &mock_server.uri(),
        &AccessToken::new("T"),
        &infisical_client::models::RawSecretsQuery::new("dev", "P", "/"),
        None,
    )
    .await
    .unwrap();

    let pairs: Vec<(&str, &str)> = secrets
        .iter()
        .map(|s| (s.secret_key.as_str(), s.secret_value.as_str()))
        .collect();
    assert_eq!(pairs, [("A", "1"), ("B", "2"), ("A", "3")]);
}

#[tokio::test]
async fn test_forbidden_maps_to_fetch_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(load_fixture("secrets/forbidden.json")),
        )
        .mount(&mock_server)
        .await;

    let fetcher = SecretFetcher::new(Client::new(), mock_server.uri(), Duration::from_secs(5));
    let err = fetcher.fetch(&AccessToken::new("T"), &query()).await.unwrap_err();

    assert!(err.is_fetch_error());
    assert_eq!(err.status(), Some(403));
    match err {
        ClientError::FetchFailed {
            environment,
            secret_path,
            source: RequestError::Api { message, .. },
        } => {
            assert_eq!(environment, "dev");
            assert_eq!(secret_path, "/backend");
            assert_eq!(
                message,
                "You are not allowed to read secrets in this environment"
            );
        }
        other => panic!("Expected FetchFailed with Api source, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_listing_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "secrets": [{ "secretKey": "ONLY_KEY" }]
        })))
        .mount(&mock_server)
        .await;

    let fetcher = SecretFetcher::new(Client::new(), mock_server.uri(), Duration::from_secs(5));
    let err = fetcher.fetch(&AccessToken::new("T"), &query()).await.unwrap_err();

    match err.request_error() {
        Some(RequestError::InvalidResponse(msg)) => {
            assert!(msg.contains("RawSecretsResponse"));
            assert!(!msg.contains("ONLY_KEY"));
        }
        other => panic!("Expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_fetch_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .respond_with(ResponseTemplate::new(500).set_body_string(""))
        .mount(&mock_server)
        .await;

    let fetcher = SecretFetcher::new(Client::new(), mock_server.uri(), Duration::from_secs(5));
    let err = fetcher.fetch(&AccessToken::new("T"), &query()).await.unwrap_err();

    match err.request_error() {
        Some(RequestError::Api { status, message, .. }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "empty response body");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_secrets_body(&[])))
        .mount(&mock_server)
        .await;

    let fetcher = SecretFetcher::new(Client::new(), mock_server.uri(), Duration::from_secs(5));
    let secrets = fetcher.fetch(&AccessToken::new("T"), &query()).await.unwrap();
    assert!(secrets.is_empty());
}
