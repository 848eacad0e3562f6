//! Awqat Salah token lifecycle
//!
//! Obtains and keeps a valid bearer token for the prayer-time API. This
//! crate has no dependency on the resource client; it can be tested and
//! used on its own.
//!
//! Token flow:
//! 1. `TokenSource::token()` returns the cached token while it is fresh
//! 2. Otherwise `TokenAcquirer::acquire()` refreshes with the held ticket
//! 3. A refresh that fails falls back to `token::login()` with credentials
//! 4. Expiry is read from the token's `exp` claim minus a safety margin
//!
//! `TokenSource` implements `provider::Provider`, so it plugs straight into
//! the authenticated transport.

pub mod acquirer;
pub mod claims;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod source;
pub mod token;

pub use acquirer::{TokenAcquirer, TokenSettings};
pub use constants::*;
pub use error::{Error, Operation, Result};
pub use source::TokenSource;
pub use token::{Token, TokenPayload, login, refresh};
