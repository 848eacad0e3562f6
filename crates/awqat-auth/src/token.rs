//! Login and refresh exchanges
//!
//! Handles the two auth endpoint interactions:
//! 1. Login: POST `Auth/Login` with the account email and password
//! 2. Refresh: GET `Auth/RefreshToken/{refreshToken}` with the old bearer
//!
//! Both answer with the `{data, success, message}` envelope around
//! `{accessToken, refreshToken}`. These functions perform exactly one
//! request and hold no state; `TokenAcquirer` owns the refresh ticket.

use common::{Credentials, Envelope};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tracing::debug;

use crate::constants::{LOGIN_PATH, REFRESH_PATH, TOKEN_TYPE};
use crate::error::{Error, Operation, Result};

/// A bearer token with a conservatively early expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: &'static str,
    pub expiry: SystemTime,
}

impl Token {
    pub fn new(access_token: String, expiry: SystemTime) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE,
            expiry,
        }
    }

    /// True while `now + margin` is still before the expiry.
    pub fn is_fresh(&self, margin: Duration) -> bool {
        SystemTime::now()
            .checked_add(margin)
            .is_some_and(|deadline| deadline < self.expiry)
    }

    /// Seconds until expiry, zero if already past. For log fields.
    pub fn expires_in_secs(&self) -> u64 {
        self.expiry
            .duration_since(SystemTime::now())
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Payload of a successful login or refresh.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Join a base URL and a relative path with exactly one slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Log in with the account credentials.
pub async fn login(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<TokenPayload> {
    let url = endpoint(base_url, LOGIN_PATH);
    let body = LoginRequest {
        email: credentials.email(),
        password: credentials.password().expose(),
    };

    debug!(%url, "sending login request");
    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|source| Error::Transport {
            op: Operation::Login,
            source,
        })?;

    decode_token_response(Operation::Login, response).await
}

/// Exchange a refresh ticket for a new token pair.
///
/// `bearer` is the previous access token, sent as `Authorization: Bearer`
/// when the caller still considers it admissible.
pub async fn refresh(
    client: &reqwest::Client,
    base_url: &str,
    refresh_token: &str,
    bearer: Option<&str>,
) -> Result<TokenPayload> {
    let url = refresh_url(base_url, refresh_token)?;

    let mut request = client.get(url);
    if let Some(bearer) = bearer {
        let mut value = HeaderValue::from_str(&format!("Bearer {bearer}"))
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        request = request.header(AUTHORIZATION, value);
    }

    debug!(path = REFRESH_PATH, "sending refresh request");
    let response = request.send().await.map_err(|source| Error::Transport {
        op: Operation::Refresh,
        source,
    })?;

    decode_token_response(Operation::Refresh, response).await
}

/// `{base}/Auth/RefreshToken/{ticket}` with the ticket percent-encoded as one segment.
fn refresh_url(base_url: &str, refresh_token: &str) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(&endpoint(base_url, REFRESH_PATH))
        .map_err(|e| Error::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(format!("base URL cannot carry a path: {base_url}")))?
        .push(refresh_token);
    Ok(url)
}

/// Turn an auth response into a payload or a typed error.
///
/// Non-2xx: prefer the server's failure message when the body is an
/// envelope with `success: false`, otherwise report the status code.
async fn decode_token_response(op: Operation, response: reqwest::Response) -> Result<TokenPayload> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| Error::Transport { op, source })?;

    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
            && !envelope.success
        {
            return Err(Error::Api {
                op,
                message: envelope.message().to_string(),
            });
        }
        return Err(Error::Status { op, status });
    }

    let envelope: Envelope<TokenPayload> =
        serde_json::from_slice(&body).map_err(|source| Error::Decode { op, source })?;
    envelope
        .into_result()
        .map_err(|message| Error::Api { op, message })
}
