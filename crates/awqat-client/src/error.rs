//! Error types for resource calls

use provider::ProviderError;

/// Errors from the resource client.
///
/// `context` names the resource and identifier, e.g. "states for country ID 2".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No token could be attached to the request.
    #[error("unable to authenticate request for {context}: {source}")]
    Auth {
        context: String,
        #[source]
        source: ProviderError,
    },

    #[error("unable to get {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status without a decodable failure envelope.
    #[error("unable to get {context}: received non-2xx status code: {status}")]
    Status {
        context: String,
        status: reqwest::StatusCode,
    },

    #[error("unable to decode {context} response: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with `success: false`.
    #[error("API error retrieving {context}: {message}")]
    Api { context: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] common::Error),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Result alias for resource calls.
pub type Result<T> = std::result::Result<T, Error>;
