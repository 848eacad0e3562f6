//! Request authentication seam
//!
//! Defines the `Provider` trait that decouples the authenticated transport
//! from how a bearer token is obtained. `StaticBearerProvider` attaches a
//! fixed token; the token source in `awqat-auth` implements the same trait
//! with login, refresh, and caching behind it.

pub mod static_bearer;

pub use static_bearer::StaticBearerProvider;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::future::Future;
use std::pin::Pin;

/// Errors from provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Obtaining a token failed; the source keeps the typed cause.
    #[error("authentication failed: {0}")]
    Auth(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid token value: {0}")]
    InvalidToken(String),
}

impl ProviderError {
    pub fn auth(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Auth(Box::new(err))
    }
}

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Something that can authenticate an outgoing request.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Provider>`).
pub trait Provider: Send + Sync {
    /// Identifier for logging (e.g. "static-bearer", "awqat-token-source")
    fn id(&self) -> &str;

    /// Attach credentials to the outgoing request headers.
    ///
    /// Called before every request. Implementations replace any existing
    /// Authorization header.
    fn prepare_request<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Set `Authorization: Bearer <token>`, replacing any existing value.
pub fn insert_bearer(headers: &mut HeaderMap, token: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ProviderError::InvalidToken(e.to_string()))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}
