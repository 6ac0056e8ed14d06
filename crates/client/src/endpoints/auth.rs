//! Machine identity login endpoints.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::AccessToken;
use crate::endpoints::{parse_json, send_request};
use crate::error::RequestError;
use crate::metrics::MetricsCollector;
use crate::models::{AzureAuthLoginRequest, MachineIdentityLogin, UniversalAuthLoginRequest};

pub const UNIVERSAL_AUTH_LOGIN_PATH: &str = "/api/v1/auth/universal-auth/login";
pub const AZURE_AUTH_LOGIN_PATH: &str = "/api/v1/auth/azure-auth/login";

/// Exchange a client id and secret for an access token.
pub async fn universal_auth_login(
    client: &Client,
    base_url: &str,
    client_id: &str,
    client_secret: &SecretString,
    metrics: Option<&MetricsCollector>,
) -> Result<AccessToken, RequestError> {
    debug!(client_id, "Logging in with universal auth");

    let url = format!("{base_url}{UNIVERSAL_AUTH_LOGIN_PATH}");
    let builder = client.post(&url).json(&UniversalAuthLoginRequest {
        client_id,
        client_secret: client_secret.expose_secret(),
    });

    login(builder, UNIVERSAL_AUTH_LOGIN_PATH, metrics).await
}

/// Exchange an identity provider token for an access token.
pub async fn azure_auth_login(
    client: &Client,
    base_url: &str,
    identity_id: &str,
    jwt: &SecretString,
    metrics: Option<&MetricsCollector>,
) -> Result<AccessToken, RequestError> {
    debug!(identity_id, "Logging in with azure auth");

    let url = format!("{base_url}{AZURE_AUTH_LOGIN_PATH}");
    let builder = client.post(&url).json(&AzureAuthLoginRequest {
        identity_id,
        jwt: jwt.expose_secret(),
    });

    login(builder, AZURE_AUTH_LOGIN_PATH, metrics).await
}

async fn login(
    builder: reqwest::RequestBuilder,
    endpoint: &'static str,
    metrics: Option<&MetricsCollector>,
) -> Result<AccessToken, RequestError> {
    let response = send_request(builder, endpoint, "POST", metrics).await?;
    let login: MachineIdentityLogin =
        parse_json(response, endpoint, "MachineIdentityLogin", metrics).await?;

    if login.access_token.is_empty() {
        return Err(RequestError::InvalidResponse(
            "login response contained an empty accessToken".to_string(),
        ));
    }

    Ok(AccessToken::new(login.access_token))
}
