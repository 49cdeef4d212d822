use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Origin of the backend every request is issued against.
///
/// Always an absolute `http`/`https` URL with a host and without a trailing
/// slash, so paths can be appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ConfigError::InvalidUrl {
                url: raw,
                reason: "URL cannot be empty".to_string(),
            });
        }

        if trimmed.len() > MAX_URL_LENGTH {
            return Err(ConfigError::InvalidUrl {
                url: Self::truncate_url(trimmed),
                reason: format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
            });
        }

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: Self::truncate_url(trimmed),
            reason: e.to_string(),
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidUrl {
                url: Self::truncate_url(trimmed),
                reason: format!("invalid scheme '{scheme}', only 'http' and 'https' are allowed"),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidUrl {
                url: Self::truncate_url(trimmed),
                reason: "URL must have a host".to_string(),
            });
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(ConfigError::InvalidUrl {
                url: Self::truncate_url(trimmed),
                reason: "credentials in URL are not allowed".to_string(),
            });
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Reads `API_BASE_URL`, falling back to the local development address
    /// when the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(API_BASE_URL_ENV) {
            Some(value) if !value.trim().is_empty() => Self::new(value),
            _ => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base. `path` must start with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn truncate_url(url: &str) -> String {
        match url.char_indices().nth(100) {
            Some((idx, _)) => format!("{}...", &url[..idx]),
            None => url.to_string(),
        }
    }
}

impl TryFrom<String> for ApiConfig {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiConfig> for String {
    fn from(config: ApiConfig) -> Self {
        config.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}
