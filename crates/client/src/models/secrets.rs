//! Raw secret listing returned by `GET /api/v3/secrets/raw/`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query string of the raw secrets listing.
///
/// Imports and nested folders are always included so the loader sees the
/// same effective secret set the service UI shows for the path.
#[derive(Debug, Serialize)]
pub struct RawSecretsQuery<'a> {
    pub environment: &'a str,
    #[serde(rename = "workspaceId")]
    pub workspace_id: &'a str,
    #[serde(rename = "secretPath")]
    pub secret_path: &'a str,
    pub include_imports: bool,
    pub recursive: bool,
}

impl<'a> RawSecretsQuery<'a> {
    pub fn new(environment: &'a str, workspace_id: &'a str, secret_path: &'a str) -> Self {
        Self {
            environment,
            workspace_id,
            secret_path,
            include_imports: true,
            recursive: true,
        }
    }
}

/// Response envelope of the raw secrets listing.
///
/// Other top-level fields (e.g. `imports`) are ignored.
#[derive(Debug, Deserialize)]
pub struct RawSecretsResponse {
    pub secrets: Vec<RawSecret>,
}

/// One secret as returned by the service, in response order.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSecret {
    pub secret_key: String,
    pub secret_value: String,
}

impl RawSecret {
    pub fn new(secret_key: impl Into<String>, secret_value: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            secret_value: secret_value.into(),
        }
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSecret")
            .field("secret_key", &self.secret_key)
            .field("secret_value", &"<redacted>")
            .finish()
    }
}
