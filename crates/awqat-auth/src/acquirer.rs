//! Token acquisition with refresh-then-login fallback
//!
//! `TokenAcquirer` owns the one piece of mutable auth state: the session
//! (last access token plus its refresh ticket). A held, still-admissible
//! session is refreshed first; a refresh that completes with an error is
//! logged, the session dropped, and a full login performed instead. The
//! session is only written after a fully decoded response, so a cancelled
//! call leaves it as it was.

use common::{ApiConfig, Credentials};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::claims;
use crate::constants::{DEFAULT_REUSE_MARGIN, DEFAULT_SAFETY_MARGIN, REFRESH_ADMISSION_SKEW};
use crate::error::{Operation, Result};
use crate::metrics;
use crate::token::{self, Token, TokenPayload};

/// Endpoint and timing settings for token acquisition and reuse.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub base_url: String,
    /// Subtracted from the `exp` claim to get the token's expiry.
    pub safety_margin: Duration,
    /// Extra slack the cache keeps before that expiry.
    pub reuse_margin: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            base_url: common::config::DEFAULT_BASE_URL.to_string(),
            safety_margin: DEFAULT_SAFETY_MARGIN,
            reuse_margin: DEFAULT_REUSE_MARGIN,
        }
    }
}

impl From<&ApiConfig> for TokenSettings {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            safety_margin: Duration::from_secs(api.safety_margin_secs),
            reuse_margin: Duration::from_secs(api.reuse_margin_secs),
        }
    }
}

/// Access token and refresh ticket from the same response.
struct Session {
    access_token: String,
    refresh_token: String,
}

pub struct TokenAcquirer {
    client: reqwest::Client,
    credentials: Credentials,
    settings: TokenSettings,
    session: Option<Session>,
}

impl TokenAcquirer {
    pub fn new(client: reqwest::Client, credentials: Credentials, settings: TokenSettings) -> Self {
        Self {
            client,
            credentials,
            settings,
            session: None,
        }
    }

    /// The refresh ticket held from the last successful exchange.
    pub fn refresh_ticket(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.refresh_token.as_str())
    }

    /// Obtain a token, preferring a refresh over a full login.
    pub async fn acquire(&mut self) -> Result<Token> {
        if let Some(token) = self.try_refresh().await {
            return Ok(token);
        }
        self.login().await
    }

    /// Refresh the held session. `None` means fall through to login.
    async fn try_refresh(&mut self) -> Option<Token> {
        let session = self.session.as_ref()?;

        if !claims::is_admissible(&session.access_token, REFRESH_ADMISSION_SKEW) {
            debug!("previous access token past its claim, skipping refresh");
            self.session = None;
            return None;
        }

        let result = token::refresh(
            &self.client,
            &self.settings.base_url,
            &session.refresh_token,
            Some(&session.access_token),
        )
        .await;
        metrics::record_token_request(Operation::Refresh, result.is_ok());

        match result {
            Ok(payload) => Some(self.store(Operation::Refresh, payload)),
            Err(e) => {
                warn!(error = %e, "token refresh failed, falling back to login");
                self.session = None;
                None
            }
        }
    }

    async fn login(&mut self) -> Result<Token> {
        let result = token::login(&self.client, &self.settings.base_url, &self.credentials).await;
        metrics::record_token_request(Operation::Login, result.is_ok());
        Ok(self.store(Operation::Login, result?))
    }

    /// Replace the session and build the Token. Both strings come from one payload.
    fn store(&mut self, op: Operation, payload: TokenPayload) -> Token {
        let expiry = claims::conservative_expiry(&payload.access_token, self.settings.safety_margin);
        let token = Token::new(payload.access_token.clone(), expiry);
        self.session = Some(Session {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
        });
        info!(
            op = op.as_str(),
            expires_in_secs = token.expires_in_secs(),
            "obtained access token"
        );
        token
    }
}
