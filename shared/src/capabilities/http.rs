use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crux_http::{HttpError, Response};

pub const HEALTH_PATH: &str = "/health";
pub const USERS_PATH: &str = "/users/";

pub fn user_path(id: i64) -> String {
    format!("/users/{id}")
}

/// What the shell hands back for every request the core issues.
pub type HttpResult = crux_http::Result<Response<Vec<u8>>>;

/// Failure of a single backend call, as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable response: connection refused, I/O failure, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response. `detail` is the backend's `{ "detail": "..." }`
    /// message when one could be read.
    #[error("server responded with {status}")]
    Server { status: u16, detail: Option<String> },

    /// 2xx response whose body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } => detail.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Server-provided detail if present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    fn server(status: u16, body: Option<&[u8]>) -> Self {
        Self::Server {
            status,
            detail: body.and_then(error_detail),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Http { code, body, .. } => Self::server(u16::from(code), body.as_deref()),
            HttpError::Json(msg) => Self::Decode(msg),
            other => Self::Network(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pulls a human-readable `detail` string out of an error body. Structured
/// details (for instance request-validation lists) are not shown verbatim.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

/// Succeeds on any 2xx response, handing back its raw body.
pub fn expect_success(result: HttpResult) -> Result<Vec<u8>, ApiError> {
    let mut response = result.map_err(ApiError::from)?;
    let status = response.status();
    let body = response.take_body().unwrap_or_default();

    if !status.is_success() {
        return Err(ApiError::server(u16::from(status), Some(&body)));
    }

    Ok(body)
}

/// Checks the status and decodes a 2xx JSON body into `T`.
pub fn decode_json<T: DeserializeOwned>(result: HttpResult) -> Result<T, ApiError> {
    let body = expect_success(result)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
