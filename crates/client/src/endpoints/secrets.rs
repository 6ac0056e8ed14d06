//! Raw secret listing endpoint.

use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::AccessToken;
use crate::endpoints::{parse_json, send_request};
use crate::error::RequestError;
use crate::metrics::MetricsCollector;
use crate::models::{RawSecret, RawSecretsQuery, RawSecretsResponse};

pub const RAW_SECRETS_PATH: &str = "/api/v3/secrets/raw/";

/// List the secrets visible at a path, in service order.
///
/// The full result arrives in one response; there is no pagination.
pub async fn list_raw_secrets(
    client: &Client,
    base_url: &str,
    token: &AccessToken,
    query: &RawSecretsQuery<'_>,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<RawSecret>, RequestError> {
    debug!(
        environment = query.environment,
        secret_path = query.secret_path,
        "Listing raw secrets"
    );

    let url = format!("{base_url}{RAW_SECRETS_PATH}");
    let builder = client
        .get(&url)
        .bearer_auth(token.secret().expose_secret())
        .query(query);

    let response = send_request(builder, RAW_SECRETS_PATH, "GET", metrics).await?;
    let listing: RawSecretsResponse =
        parse_json(response, RAW_SECRETS_PATH, "RawSecretsResponse", metrics).await?;

    debug!(count = listing.secrets.len(), "Received raw secrets");
    Ok(listing.secrets)
}
