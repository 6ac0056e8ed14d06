//! Metrics collection for secrets service calls and load outcomes.
//!
//! This module provides metrics collection for the loader, including:
//! - Request latency histograms
//! - Request and error counters
//! - Error categorization
//! - Load outcome counters and the size of the published snapshot
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Labels never contain secret keys, values, or tokens
//! - Zero-cost when no metrics recorder is installed

use std::time::Duration;

use crate::error::RequestError;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "infisical_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "infisical_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "infisical_api_errors_total";

/// Metric name for deserialization failure counter.
pub const METRIC_DESERIALIZATION_FAILURES: &str = "infisical_api_deserialization_failures_total";

/// Metric name for load outcome counter.
pub const METRIC_LOADS_TOTAL: &str = "infisical_loader_loads_total";

/// Metric name for the number of secrets in the last published snapshot.
pub const METRIC_SECRETS_LOADED: &str = "infisical_loader_secrets_loaded";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Response body did not match the expected schema
    Deserialization,
    /// Request timeout
    Timeout,
    /// Identity token supplier failure
    Supplier,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Deserialization => "deserialization",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Supplier => "supplier",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&RequestError> for ErrorCategory {
    fn from(error: &RequestError) -> Self {
        match error {
            RequestError::Timeout(_) => ErrorCategory::Timeout,
            RequestError::InvalidResponse(_) => ErrorCategory::Deserialization,
            RequestError::TokenSupplier(_) => ErrorCategory::Supplier,
            RequestError::Api { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            RequestError::Http(e) => {
                if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_connect() || e.is_request() {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Unknown
                }
            }
        }
    }
}

/// Outcome of one `load` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh secrets were published.
    Success,
    /// The load failed and the last-good snapshot was republished.
    Fallback,
    /// The load failed with nothing to fall back to.
    Failed,
}

impl LoadOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Success => "success",
            LoadOutcome::Fallback => "fallback",
            LoadOutcome::Failed => "failed",
        }
    }
}

/// Metrics collector for secrets service calls.
///
/// A thin wrapper around the `metrics` crate macros with consistent labels.
///
/// ```rust,ignore
/// use infisical_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/api/v3/secrets/raw/", "GET", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` if the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_request_error(&self, endpoint: &str, method: &str, error: &RequestError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a deserialization failure.
    ///
    /// `model_type` is the type name that failed to deserialize (e.g. "RawSecretsResponse").
    pub fn record_deserialization_failure(&self, endpoint: &str, model_type: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DESERIALIZATION_FAILURES,
            "endpoint" => endpoint.to_string(),
            "model_type" => model_type,
        )
        .increment(1);
    }

    /// Record the outcome of a load pass.
    pub fn record_load(&self, outcome: LoadOutcome) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_LOADS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }

    /// Record the number of secrets in the published snapshot.
    pub fn record_secrets_loaded(&self, count: usize) {
        if !self.enabled {
            return;
        }
        metrics::gauge!(METRIC_SECRETS_LOADED).set(count as f64);
    }
}
