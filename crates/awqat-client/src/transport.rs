//! Authenticated HTTP transport
//!
//! Wraps a `reqwest::Client` and runs the provider's `prepare_request`
//! before every send. Knows nothing about endpoints or envelopes.

use provider::{Provider, ProviderError};
use std::sync::Arc;
use tracing::debug;

/// Why a request never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Auth(#[from] ProviderError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct AuthenticatedClient {
    http: reqwest::Client,
    provider: Arc<dyn Provider>,
}

impl AuthenticatedClient {
    pub fn new(http: reqwest::Client, provider: Arc<dyn Provider>) -> Self {
        Self { http, provider }
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    /// Authenticate and send an already-built request.
    pub async fn execute(
        &self,
        mut request: reqwest::Request,
    ) -> Result<reqwest::Response, SendError> {
        self.provider.prepare_request(request.headers_mut()).await?;
        debug!(
            provider = self.provider.id(),
            method = %request.method(),
            path = request.url().path(),
            "sending authenticated request"
        );
        Ok(self.http.execute(request).await?)
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response, SendError> {
        let request = self.http.get(url).build()?;
        self.execute(request).await
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("provider", &self.provider.id())
            .finish_non_exhaustive()
    }
}
