//! Single-attempt request execution and response decoding.
//!
//! Every call to the secrets service goes through [`send_request`] so that
//! trace propagation, metrics, and error mapping are uniform.
//!
//! Invariants:
//! - Exactly one attempt is made; there is no retry or backoff.
//! - Non-success responses become [`RequestError::Api`] with the service's
//!   `message` field when the body carries one.
//! - Decode errors report position and category only, never body content.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::RequestError;
use crate::metrics::MetricsCollector;
use crate::telemetry::inject_trace_context;

/// Error body returned by the service on non-success responses.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract a display message from an error response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(ServiceErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ServiceErrorBody {
            error: Some(error), ..
        }) => error,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.chars().take(512).collect(),
    }
}

/// Send a request once, recording metrics under `endpoint`/`method`.
///
/// # Errors
///
/// - [`RequestError::Http`] for transport failures.
/// - [`RequestError::Api`] for any non-2xx status.
pub async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response, RequestError> {
    let builder = inject_trace_context(builder);

    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let started = Instant::now();
    let result = builder.send().await;
    let elapsed = started.elapsed();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            let err = RequestError::from(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, elapsed, None);
                m.record_request_error(endpoint, method, &err);
            }
            debug!(endpoint, method, error = %err, "Request failed before a response arrived");
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, elapsed, Some(status));
    }
    debug!(endpoint, method, status, elapsed_ms = elapsed.as_millis() as u64, "Request completed");

    if response.status().is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let err = RequestError::Api {
        status,
        url,
        message: error_message(&body),
    };
    if let Some(m) = metrics {
        m.record_request_error(endpoint, method, &err);
    }
    Err(err)
}

/// Read the response body and decode it as JSON.
///
/// `model_type` names the target type in errors and metrics.
pub async fn parse_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
    model_type: &'static str,
    metrics: Option<&MetricsCollector>,
) -> Result<T, RequestError> {
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        if let Some(m) = metrics {
            m.record_deserialization_failure(endpoint, model_type);
        }
        RequestError::InvalidResponse(format!(
            "failed to decode {model_type}: {:?} error at line {}, column {}",
            e.classify(),
            e.line(),
            e.column()
        ))
    })
}
