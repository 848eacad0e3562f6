//! Awqat Salah auth endpoints and token timing defaults

use std::time::Duration;

/// Login endpoint, relative to the base URL. POST, JSON `{email, password}`.
pub const LOGIN_PATH: &str = "Auth/Login";

/// Refresh endpoint prefix, relative to the base URL. GET `Auth/RefreshToken/{refreshToken}`.
pub const REFRESH_PATH: &str = "Auth/RefreshToken";

/// How long before the `exp` claim a token is treated as expired.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(15 * 60);

/// Slack the token cache keeps before the computed expiry.
pub const DEFAULT_REUSE_MARGIN: Duration = Duration::from_secs(10);

/// An old access token is only sent along with a refresh call while its
/// `exp` claim is at least this far in the future.
pub const REFRESH_ADMISSION_SKEW: Duration = Duration::from_secs(10);

/// Token type reported on every Token.
pub const TOKEN_TYPE: &str = "Bearer";
