//! Identity token suppliers for provider-delegated authentication.
//!
//! Responsibilities:
//! - Define the [`TokenSupplier`] seam: an injected asynchronous operation
//!   that produces a short-lived identity token (e.g. an Azure AD JWT).
//! - Provide a blanket implementation for async closures.
//! - Provide [`FileTokenSupplier`], which reads a projected federated token file.
//!
//! Does NOT handle:
//! - Exchanging the identity token for an access token (see `infisical-client`).
//! - Timeouts around the supplier (applied by the authenticator).
//!
//! Invariants:
//! - Supplied tokens are wrapped in [`SecretString`] as soon as they are produced.
//! - A supplier failure is reported as [`TokenSupplierError`]; callers map it onto
//!   their authentication-failure kind.

use std::future::Future;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use secrecy::SecretString;

/// Error returned by a failing token supplier.
pub type TokenSupplierError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by [`TokenSupplier::fetch_token`].
pub type TokenFuture = BoxFuture<'static, Result<SecretString, TokenSupplierError>>;

/// Produces identity tokens on demand.
///
/// Implementations may perform network I/O and suspend; the authenticator
/// awaits the returned future before issuing its login request.
///
/// Any `Fn() -> impl Future<Output = Result<String, E>>` closure is a supplier:
///
/// ```rust,ignore
/// let selector = AuthSelector::provider_delegated("identity-id", || async {
///     fetch_azure_token().await
/// })?;
/// ```
pub trait TokenSupplier: Send + Sync {
    /// Produce a fresh identity token.
    fn fetch_token(&self) -> TokenFuture;
}

impl<F, Fut, E> TokenSupplier for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, E>> + Send + 'static,
    E: Into<TokenSupplierError>,
{
    fn fetch_token(&self) -> TokenFuture {
        let pending = (self)();
        async move {
            pending
                .await
                .map(|token| SecretString::new(token.into()))
                .map_err(Into::into)
        }
        .boxed()
    }
}

/// Reads an identity token from a file on every call.
///
/// Workload identity platforms project a short-lived token into a file and
/// rotate it in place, so the file is re-read rather than cached.
#[derive(Debug, Clone)]
pub struct FileTokenSupplier {
    path: PathBuf,
}

impl FileTokenSupplier {
    /// Create a supplier reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSupplier for FileTokenSupplier {
    fn fetch_token(&self) -> TokenFuture {
        read_token_file(self.path.clone()).boxed()
    }
}

async fn read_token_file(path: PathBuf) -> Result<SecretString, TokenSupplierError> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("failed to read identity token file {}: {e}", path.display()))?;

    let token = raw.trim();
    if token.is_empty() {
        return Err(format!("identity token file {} is empty", path.display()).into());
    }

    tracing::debug!(path = %path.display(), "Read identity token from file");
    Ok(SecretString::new(token.into()))
}
