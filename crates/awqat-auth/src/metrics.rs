//! Token lifecycle counters
//!
//! - `awqat_token_requests_total` (counter): labels `kind` (login/refresh), `outcome`
//! - `awqat_token_cache_hits_total` (counter)
//!
//! Emitted through the `metrics` facade; no-ops until the application
//! installs a recorder.

use crate::error::Operation;

/// Record a completed login or refresh call.
pub fn record_token_request(op: Operation, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("awqat_token_requests_total", "kind" => op.as_str(), "outcome" => outcome)
        .increment(1);
}

/// Record a token served from the cache without a network call.
pub fn record_cache_hit() {
    metrics::counter!("awqat_token_cache_hits_total").increment(1);
}
