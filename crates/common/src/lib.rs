//! Shared types for the Diyanet Awqat Salah client crates
//!
//! Holds the pieces every other crate needs: the login identity and its
//! TOML/env configuration, the `Secret` wrapper that keeps the password out
//! of logs, and the `{data, success, message}` envelope the service wraps
//! every JSON response in.

pub mod config;
mod envelope;
mod error;
mod secret;

pub use config::{ApiConfig, Config, Credentials};
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use secret::Secret;
