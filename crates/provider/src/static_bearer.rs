//! Static bearer provider: attaches a token the caller already holds.
//!
//! The token is never renewed. Useful when it is obtained out of band,
//! and for exercising resource accessors in tests.

use crate::{Provider, insert_bearer};
use reqwest::header::HeaderMap;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

pub struct StaticBearerProvider {
    token: String,
}

impl StaticBearerProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticBearerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticBearerProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Provider for StaticBearerProvider {
    fn id(&self) -> &str {
        "static-bearer"
    }

    fn prepare_request<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
    ) -> Pin<Box<dyn Future<Output = crate::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            insert_bearer(headers, &self.token)?;
            debug!(provider = self.id(), "attached static bearer token");
            Ok(())
        })
    }
}
