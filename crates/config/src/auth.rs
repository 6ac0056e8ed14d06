//! Machine-identity authentication strategies.
//!
//! Responsibilities:
//! - Model the selected strategy as an immutable sum type ([`AuthSelector`]).
//! - Validate required fields at construction time.
//! - Provide [`AuthSelectorBuilder`], which locks to exactly one strategy.
//! - Provide strategy-specific accessors that fail with a usage error when
//!   the wrong variant is requested.
//!
//! Does NOT handle:
//! - Performing the login round trip (see `infisical-client`'s authenticator).
//!
//! Invariants:
//! - A constructed [`AuthSelector`] always holds non-empty required fields.
//! - Client secrets are stored as [`SecretString`] and never appear in `Debug` output.

use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::supplier::TokenSupplier;

/// Tag identifying an authentication strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Shared-secret client id / client secret login.
    Universal,
    /// External identity provider token exchanged for an access token.
    ProviderDelegated,
}

impl AuthMethod {
    /// Login route segment, also used as the label in logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            AuthMethod::Universal => "universal-auth",
            AuthMethod::ProviderDelegated => "azure-auth",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client id / client secret credentials.
#[derive(Debug, Clone)]
pub struct UniversalAuth {
    client_id: String,
    client_secret: SecretString,
}

impl UniversalAuth {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }
}

/// Identity id plus the supplier of the identity provider's token.
#[derive(Clone)]
pub struct ProviderDelegatedAuth {
    identity_id: String,
    supplier: Arc<dyn TokenSupplier>,
}

impl ProviderDelegatedAuth {
    pub fn identity_id(&self) -> &str {
        &self.identity_id
    }

    pub fn supplier(&self) -> &dyn TokenSupplier {
        self.supplier.as_ref()
    }
}

impl fmt::Debug for ProviderDelegatedAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDelegatedAuth")
            .field("identity_id", &self.identity_id)
            .finish_non_exhaustive()
    }
}

/// The authentication strategy a loader uses, locked to exactly one variant.
#[derive(Debug, Clone)]
pub enum AuthSelector {
    Universal(UniversalAuth),
    ProviderDelegated(ProviderDelegatedAuth),
}

fn require(value: String, field: &'static str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(value)
    }
}

impl AuthSelector {
    /// Create a builder that accepts exactly one strategy.
    pub fn builder() -> AuthSelectorBuilder {
        AuthSelectorBuilder::default()
    }

    /// Select universal auth.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if either value is empty.
    pub fn universal(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client_id = require(client_id.into(), "client_id")?;
        let client_secret = require(client_secret.into(), "client_secret")?;
        Ok(Self::Universal(UniversalAuth {
            client_id,
            client_secret: SecretString::new(client_secret.into()),
        }))
    }

    /// Select provider-delegated auth.
    ///
    /// `supplier` is awaited once per login to obtain the identity provider's
    /// token. A missing supplier is unrepresentable, so only the identity id
    /// is validated here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `identity_id` is empty.
    pub fn provider_delegated<S>(
        identity_id: impl Into<String>,
        supplier: S,
    ) -> Result<Self, ConfigError>
    where
        S: TokenSupplier + 'static,
    {
        let identity_id = require(identity_id.into(), "identity_id")?;
        Ok(Self::ProviderDelegated(ProviderDelegatedAuth {
            identity_id,
            supplier: Arc::new(supplier),
        }))
    }

    /// The active strategy.
    pub fn method(&self) -> AuthMethod {
        match self {
            AuthSelector::Universal(_) => AuthMethod::Universal,
            AuthSelector::ProviderDelegated(_) => AuthMethod::ProviderDelegated,
        }
    }

    /// Universal credentials, or a usage error if another strategy is active.
    pub fn as_universal(&self) -> Result<&UniversalAuth, ConfigError> {
        match self {
            AuthSelector::Universal(auth) => Ok(auth),
            other => Err(ConfigError::WrongAuthVariant {
                expected: AuthMethod::Universal,
                actual: other.method(),
            }),
        }
    }

    /// Delegated credentials, or a usage error if another strategy is active.
    pub fn as_provider_delegated(&self) -> Result<&ProviderDelegatedAuth, ConfigError> {
        match self {
            AuthSelector::ProviderDelegated(auth) => Ok(auth),
            other => Err(ConfigError::WrongAuthVariant {
                expected: AuthMethod::ProviderDelegated,
                actual: other.method(),
            }),
        }
    }
}

/// Builder that accumulates exactly one authentication strategy.
///
/// Each setter validates its arguments immediately; selecting a second
/// strategy is rejected rather than silently replacing the first.
///
/// ```rust,ignore
/// let auth = AuthSelector::builder()
///     .universal("client-id", "client-secret")?
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct AuthSelectorBuilder {
    selected: Option<AuthSelector>,
}

impl AuthSelectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select universal auth. See [`AuthSelector::universal`].
    pub fn universal(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let selector = AuthSelector::universal(client_id, client_secret)?;
        self.select(selector)
    }

    /// Select provider-delegated auth. See [`AuthSelector::provider_delegated`].
    pub fn provider_delegated<S>(
        self,
        identity_id: impl Into<String>,
        supplier: S,
    ) -> Result<Self, ConfigError>
    where
        S: TokenSupplier + 'static,
    {
        let selector = AuthSelector::provider_delegated(identity_id, supplier)?;
        self.select(selector)
    }

    fn select(mut self, selector: AuthSelector) -> Result<Self, ConfigError> {
        if let Some(existing) = &self.selected {
            return Err(ConfigError::AuthAlreadySelected(existing.method()));
        }
        self.selected = Some(selector);
        Ok(self)
    }

    /// Finish the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAuth`] if no strategy was selected.
    pub fn build(self) -> Result<AuthSelector, ConfigError> {
        self.selected.ok_or(ConfigError::MissingAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn static_supplier() -> impl TokenSupplier {
        || async { Ok::<_, std::io::Error>("jwt".to_string()) }
    }

    #[test]
    fn test_universal_selector() {
        let auth = AuthSelector::universal("cid", "secret").unwrap();
        assert_eq!(auth.method(), AuthMethod::Universal);

        let creds = auth.as_universal().unwrap();
        assert_eq!(creds.client_id(), "cid");
        assert_eq!(creds.client_secret().expose_secret(), "secret");
    }

    #[test]
    fn test_universal_rejects_empty_fields() {
        assert!(matches!(
            AuthSelector::universal("", "secret"),
            Err(ConfigError::MissingField("client_id"))
        ));
        assert!(matches!(
            AuthSelector::universal("cid", "   "),
            Err(ConfigError::MissingField("client_secret"))
        ));
    }

    #[test]
    fn test_provider_delegated_rejects_empty_identity() {
        let result = AuthSelector::provider_delegated("", static_supplier());
        assert!(matches!(result, Err(ConfigError::MissingField("identity_id"))));
    }

    #[tokio::test]
    async fn test_provider_delegated_supplier_is_callable() {
        let auth = AuthSelector::provider_delegated("identity", static_supplier()).unwrap();
        let delegated = auth.as_provider_delegated().unwrap();
        assert_eq!(delegated.identity_id(), "identity");

        let token = delegated.supplier().fetch_token().await.unwrap();
        assert_eq!(token.expose_secret(), "jwt");
    }

    #[test]
    fn test_wrong_variant_access_fails_for_both_variants() {
        let universal = AuthSelector::universal("cid", "secret").unwrap();
        let err = universal.as_provider_delegated().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongAuthVariant {
                expected: AuthMethod::ProviderDelegated,
                actual: AuthMethod::Universal,
            }
        ));

        let delegated = AuthSelector::provider_delegated("identity", static_supplier()).unwrap();
        let err = delegated.as_universal().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongAuthVariant {
                expected: AuthMethod::Universal,
                actual: AuthMethod::ProviderDelegated,
            }
        ));
    }

    #[test]
    fn test_builder_without_strategy_fails() {
        let result = AuthSelector::builder().build();
        assert!(matches!(result, Err(ConfigError::MissingAuth)));
    }

    #[test]
    fn test_builder_locks_to_one_strategy() {
        let result = AuthSelector::builder()
            .universal("cid", "secret")
            .unwrap()
            .provider_delegated("identity", static_supplier());
        assert!(matches!(
            result,
            Err(ConfigError::AuthAlreadySelected(AuthMethod::Universal))
        ));
    }

    #[test]
    fn test_builder_with_single_strategy() {
        let auth = AuthSelector::builder()
            .provider_delegated("identity", static_supplier())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(auth.method(), AuthMethod::ProviderDelegated);
    }

    #[test]
    fn test_builder_setter_fails_immediately_on_empty_field() {
        let result = AuthSelector::builder().universal("cid", "");
        assert!(matches!(result, Err(ConfigError::MissingField("client_secret"))));
    }

    #[test]
    fn test_client_secret_not_exposed_in_debug() {
        let secret = "super-secret-client-secret-123";
        let auth = AuthSelector::universal("visible-client-id", secret).unwrap();

        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains(secret));
        assert!(debug_output.contains("visible-client-id"));
    }

    #[test]
    fn test_delegated_debug_shows_identity_only() {
        let auth = AuthSelector::provider_delegated("identity-42", static_supplier()).unwrap();
        let debug_output = format!("{:?}", auth);
        assert!(debug_output.contains("identity-42"));
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(AuthMethod::Universal.to_string(), "universal-auth");
        assert_eq!(AuthMethod::ProviderDelegated.to_string(), "azure-auth");
    }
}
