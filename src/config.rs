//! Provider configuration.
//!
//! Holds the organization service URL and the personal access token (PAT)
//! used to authenticate against the Azure DevOps REST API. Values are usually
//! supplied through the environment by the host runtime.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Environment variable holding the organization URL.
pub const ENV_ORG_SERVICE_URL: &str = "AZDO_ORG_SERVICE_URL";
/// Environment variable holding the personal access token.
pub const ENV_PERSONAL_ACCESS_TOKEN: &str = "AZDO_PERSONAL_ACCESS_TOKEN";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "AZDO_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to an Azure DevOps organization.
///
/// Custom `Debug` implementation redacts the token.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Organization URL, e.g. `https://dev.azure.com/my-org`
    pub org_service_url: String,
    /// Personal access token
    pub personal_access_token: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("org_service_url", &self.org_service_url)
            .field("personal_access_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration with the default timeout.
    pub fn new(org_service_url: impl Into<String>, personal_access_token: impl Into<String>) -> Self {
        Self {
            org_service_url: org_service_url.into(),
            personal_access_token: personal_access_token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `AZDO_ORG_SERVICE_URL` (required)
    /// - `AZDO_PERSONAL_ACCESS_TOKEN` (required)
    /// - `AZDO_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let org_service_url =
            lookup(ENV_ORG_SERVICE_URL).ok_or(ConfigError::Missing(ENV_ORG_SERVICE_URL))?;
        let personal_access_token = lookup(ENV_PERSONAL_ACCESS_TOKEN)
            .ok_or(ConfigError::Missing(ENV_PERSONAL_ACCESS_TOKEN))?;
        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            org_service_url,
            personal_access_token,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.org_service_url.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_ORG_SERVICE_URL));
        }
        if !(self.org_service_url.starts_with("https://")
            || self.org_service_url.starts_with("http://"))
        {
            return Err(ConfigError::InvalidUrl(self.org_service_url.clone()));
        }
        if self.personal_access_token.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_PERSONAL_ACCESS_TOKEN));
        }
        Ok(())
    }

    /// Organization URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.org_service_url.trim_end_matches('/')
    }

    /// Credential derived from the personal access token.
    pub fn credential(&self) -> PatCredential {
        PatCredential::new(self.personal_access_token.clone())
    }
}

/// Personal access token credential.
///
/// Azure DevOps accepts a PAT as the password of HTTP basic auth with an
/// empty user name.
#[derive(Clone)]
pub struct PatCredential {
    token: String,
}

impl std::fmt::Debug for PatCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatCredential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl PatCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!(":{}", self.token)))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty value")]
    Missing(&'static str),
    #[error("invalid organization URL '{0}', expected an http(s) URL")]
    InvalidUrl(String),
    #[error("invalid timeout '{0}', expected a number of seconds")]
    InvalidTimeout(String),
}
