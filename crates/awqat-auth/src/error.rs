//! Error types for token acquisition

use std::fmt;

/// Which auth exchange an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Refresh,
}

impl Operation {
    /// Label used for metrics and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Login => f.write_str("unable to retrieve access token"),
            Operation::Refresh => f.write_str("unable to refresh access token"),
        }
    }
}

/// Errors from login and refresh calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request construction or network failure. Never retried here.
    #[error("{op}: request failed: {source}")]
    Transport {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status without a decodable failure envelope.
    #[error("{op}: received non-2xx status code: {status}")]
    Status {
        op: Operation,
        status: reqwest::StatusCode,
    },

    /// The service answered with `success: false`.
    #[error("{op}: API error: {message}")]
    Api { op: Operation, message: String },

    /// The body was not the expected JSON envelope.
    #[error("{op}: failed to decode response: {source}")]
    Decode {
        op: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// The exchange that failed, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Transport { op, .. }
            | Error::Status { op, .. }
            | Error::Api { op, .. }
            | Error::Decode { op, .. } => Some(*op),
            Error::InvalidHeader(_) | Error::InvalidUrl(_) => None,
        }
    }
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
