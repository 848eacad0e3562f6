//! Client configuration: login identity and API settings
//!
//! Precedence: env vars > config file > defaults. The password is loaded
//! from the DIYANET_PASSWORD env var or `password_file`, never stored in the
//! TOML directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::secret::Secret;

/// Production endpoint of the Awqat Salah service.
pub const DEFAULT_BASE_URL: &str = "https://awqatsalah.diyanet.gov.tr/";

pub const ENV_EMAIL: &str = "DIYANET_EMAIL";
pub const ENV_PASSWORD: &str = "DIYANET_PASSWORD";
pub const ENV_CONFIG_PATH: &str = "DIYANET_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "diyanet.toml";

/// Upper bound for either token margin (one day).
pub const MAX_MARGIN_SECS: u64 = 24 * 60 * 60;

/// The identity used to log in. Immutable once built.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: Secret,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<Secret>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }
}

/// Service endpoint and token timing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How long before the token's `exp` claim it is considered expired.
    #[serde(default = "default_safety_margin")]
    pub safety_margin_secs: u64,
    /// Extra slack the token cache keeps before the computed expiry.
    #[serde(default = "default_reuse_margin")]
    pub reuse_margin_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            safety_margin_secs: default_safety_margin(),
            reuse_margin_secs: default_reuse_margin(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }
        if self.safety_margin_secs > MAX_MARGIN_SECS {
            return Err(Error::Config(format!(
                "safety_margin_secs must be at most {MAX_MARGIN_SECS}, got: {}",
                self.safety_margin_secs
            )));
        }
        if self.reuse_margin_secs > MAX_MARGIN_SECS {
            return Err(Error::Config(format!(
                "reuse_margin_secs must be at most {MAX_MARGIN_SECS}, got: {}",
                self.reuse_margin_secs
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_safety_margin() -> u64 {
    15 * 60
}

fn default_reuse_margin() -> u64 {
    10
}

/// Root configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api: ApiConfig,
}

/// On-disk shape; the password is resolved separately.
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    credentials: FileCredentials,
    #[serde(default)]
    api: ApiConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileCredentials {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password_file: Option<PathBuf>,
}

impl Config {
    /// Configuration with default API settings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api: ApiConfig::default(),
        }
    }

    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text, then overlay environment variables.
    ///
    /// Email: DIYANET_EMAIL env var, then `credentials.email`.
    /// Password: DIYANET_PASSWORD env var, then `credentials.password_file`.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)?;
        file.api.validate()?;

        let email = std::env::var(ENV_EMAIL)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or(file.credentials.email)
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty())
            .ok_or(Error::MissingCredential("email"))?;

        let password = match std::env::var(ENV_PASSWORD) {
            Ok(p) if !p.is_empty() => p,
            _ => match file.credentials.password_file {
                Some(ref path) => read_password_file(path)?,
                None => return Err(Error::MissingCredential("password")),
            },
        };

        Ok(Self {
            credentials: Credentials::new(email, password),
            api: file.api,
        })
    }

    /// Resolve the config file path: explicit argument, then DIYANET_CONFIG.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

fn read_password_file(path: &Path) -> Result<String> {
    let password = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read password_file {}: {e}", path.display()))
    })?;
    let password = password.trim().to_owned();
    if password.is_empty() {
        return Err(Error::MissingCredential("password"));
    }
    Ok(password)
}
