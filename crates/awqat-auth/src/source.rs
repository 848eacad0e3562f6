//! Cached, concurrency-safe token source
//!
//! `TokenSource` serves a cached token while it is fresh and otherwise
//! runs the acquirer. Uses a `RwLock` for the cached token (read on every
//! call) and a `Mutex` around the acquirer so at most one login or refresh
//! is in flight. Callers that waited on the mutex re-check the cache
//! before acquiring again.

use common::Credentials;
use provider::{Provider, ProviderError, insert_bearer};
use reqwest::header::HeaderMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::acquirer::{TokenAcquirer, TokenSettings};
use crate::error::Result;
use crate::metrics;
use crate::token::Token;

pub struct TokenSource {
    cached: RwLock<Option<Token>>,
    acquirer: Mutex<TokenAcquirer>,
    reuse_margin: Duration,
}

impl TokenSource {
    pub fn new(credentials: Credentials, settings: TokenSettings, http_client: reqwest::Client) -> Self {
        let reuse_margin = settings.reuse_margin;
        Self::from_acquirer(TokenAcquirer::new(http_client, credentials, settings), reuse_margin)
    }

    pub fn from_acquirer(acquirer: TokenAcquirer, reuse_margin: Duration) -> Self {
        Self {
            cached: RwLock::new(None),
            acquirer: Mutex::new(acquirer),
            reuse_margin,
        }
    }

    /// Return a valid token, acquiring one when the cache is empty or stale.
    ///
    /// Failures are returned to the caller and leave nothing cached.
    pub async fn token(&self) -> Result<Token> {
        if let Some(token) = self.fresh_cached().await {
            metrics::record_cache_hit();
            return Ok(token);
        }

        let mut acquirer = self.acquirer.lock().await;

        // Another caller may have finished acquiring while we waited.
        if let Some(token) = self.fresh_cached().await {
            metrics::record_cache_hit();
            return Ok(token);
        }

        debug!("cached token missing or stale, acquiring");
        match acquirer.acquire().await {
            Ok(token) => {
                *self.cached.write().await = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                *self.cached.write().await = None;
                Err(e)
            }
        }
    }

    /// The cached token regardless of freshness.
    pub async fn cached(&self) -> Option<Token> {
        self.cached.read().await.clone()
    }

    /// Drop the cached token so the next call acquires. The refresh ticket is kept.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn fresh_cached(&self) -> Option<Token> {
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|t| t.is_fresh(self.reuse_margin))
            .cloned()
    }

    #[cfg(test)]
    async fn refresh_ticket(&self) -> Option<String> {
        self.acquirer.lock().await.refresh_ticket().map(str::to_string)
    }
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSource")
            .field("reuse_margin", &self.reuse_margin)
            .finish_non_exhaustive()
    }
}

impl Provider for TokenSource {
    fn id(&self) -> &str {
        "awqat-token-source"
    }

    fn prepare_request<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
    ) -> Pin<Box<dyn Future<Output = provider::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let token = self.token().await.map_err(ProviderError::auth)?;
            insert_bearer(headers, &token.access_token)
        })
    }
}
