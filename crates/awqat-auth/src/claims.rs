//! Conservative expiry from the access token's `exp` claim
//!
//! The access token is a three-part dot-delimited structure whose middle
//! segment is unpadded URL-safe base64 JSON carrying `exp` in epoch seconds.
//! Expiry is set `safety_margin` before that claim. Anything malformed
//! degrades to [`EXPIRED`] so the next request re-acquires instead of
//! trusting a token forever.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Sentinel expiry for tokens whose claim cannot be read. Always stale.
pub const EXPIRED: SystemTime = UNIX_EPOCH;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ClaimError {
    Format,
    Base64(String),
    Json(String),
    OutOfRange(u64),
}

impl std::fmt::Display for ClaimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimError::Format => f.write_str("invalid access token format"),
            ClaimError::Base64(e) => write!(f, "failed to decode access token payload: {e}"),
            ClaimError::Json(e) => write!(f, "failed to unmarshal access token claims: {e}"),
            ClaimError::OutOfRange(exp) => write!(f, "access token exp claim out of range: {exp}"),
        }
    }
}

/// Read the raw `exp` claim as a point in time.
pub(crate) fn claim_expiry(access_token: &str) -> std::result::Result<SystemTime, ClaimError> {
    let mut parts = access_token.split('.');
    let (Some(_header), Some(payload), Some(_signature)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimError::Format);
    };

    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimError::Base64(e.to_string()))?;
    let claims: Claims =
        serde_json::from_slice(&decoded).map_err(|e| ClaimError::Json(e.to_string()))?;

    UNIX_EPOCH
        .checked_add(Duration::from_secs(claims.exp))
        .ok_or(ClaimError::OutOfRange(claims.exp))
}

/// Expiry `safety_margin` before the token's `exp` claim, or [`EXPIRED`].
pub fn conservative_expiry(access_token: &str, safety_margin: Duration) -> SystemTime {
    match claim_expiry(access_token) {
        Ok(exp) => exp.checked_sub(safety_margin).unwrap_or(EXPIRED).max(EXPIRED),
        Err(e) => {
            warn!(error = %e, "treating access token as expired");
            EXPIRED
        }
    }
}

/// Whether the token's own claim is still at least `skew` in the future.
/// Malformed tokens are never admissible.
pub fn is_admissible(access_token: &str, skew: Duration) -> bool {
    claim_expiry(access_token)
        .map(|exp| {
            SystemTime::now()
                .checked_add(skew)
                .is_some_and(|deadline| exp > deadline)
        })
        .unwrap_or(false)
}
