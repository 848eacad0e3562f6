//! Configuration error types

use thiserror::Error;

/// Errors raised while building a client configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias using the config Error
pub type Result<T> = std::result::Result<T, Error>;
