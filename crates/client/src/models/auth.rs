//! Machine identity login payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/auth/universal-auth/login`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalAuthLoginRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Body of `POST /api/v1/auth/azure-auth/login`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAuthLoginRequest<'a> {
    pub identity_id: &'a str,
    pub jwt: &'a str,
}

/// Login response shared by every machine identity strategy.
///
/// Only `accessToken` is required; the remaining fields are informational.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineIdentityLogin {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for MachineIdentityLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineIdentityLogin")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_login_response() {
        let json = r#"{"accessToken": "T", "expiresIn": 7200, "accessTokenMaxTTL": 43244, "tokenType": "Bearer"}"#;
        let resp: MachineIdentityLogin = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "T");
        assert_eq!(resp.expires_in, Some(7200));
        assert_eq!(resp.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_missing_access_token_is_an_error() {
        let result = serde_json::from_str::<MachineIdentityLogin>(r#"{"expiresIn": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let resp: MachineIdentityLogin =
            serde_json::from_str(r#"{"accessToken": "very-secret-token"}"#).unwrap();
        assert!(!format!("{resp:?}").contains("very-secret-token"));
    }

    #[test]
    fn test_request_bodies_use_camel_case() {
        let body = serde_json::to_value(UniversalAuthLoginRequest {
            client_id: "cid",
            client_secret: "secret",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"clientId": "cid", "clientSecret": "secret"}));

        let body = serde_json::to_value(AzureAuthLoginRequest {
            identity_id: "identity",
            jwt: "header.payload.sig",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"identityId": "identity", "jwt": "header.payload.sig"})
        );
    }
}
