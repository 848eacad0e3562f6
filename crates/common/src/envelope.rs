//! The `{data, success, message}` wrapper around every service response

use serde::Deserialize;

/// Message used when a response claims success but carries no payload.
const NO_DATA_MESSAGE: &str = "response reported success but carried no data";

/// Generic response envelope returned by every Awqat Salah endpoint,
/// including the auth endpoints.
///
/// `data` must not be used when `success` is false; `message` then holds the
/// server's diagnostic text. Both `data` and `message` may be `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// The server message, or an empty string when it sent none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Collapse into the payload or the server's failure message.
    pub fn into_result(self) -> std::result::Result<T, String> {
        if !self.success {
            return Err(self.message.unwrap_or_default());
        }
        self.data.ok_or_else(|| NO_DATA_MESSAGE.to_string())
    }
}
