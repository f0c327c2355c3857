//! Error types for the relationship client.
//!
//! # Design
//! Twitter answers failed calls with a structured body
//! (`{"errors":[{"code":50,"message":"User not found."}]}`). That payload is
//! more useful than the bare status code, so `relevant_error` lets it replace
//! the generic HTTP or transport error whenever it is present. A non-2xx
//! response without such a body stays an `Error::Http`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors returned by the client, its services and its transports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No response was obtained (connection, DNS, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server returned a non-2xx status without a structured error body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The server returned a structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body did not match the expected model.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Error codes of the API payload, empty for every other variant.
    pub fn api_codes(&self) -> Vec<i64> {
        match self {
            Error::Api(api) => api.errors.iter().map(|detail| detail.code).collect(),
            _ => Vec::new(),
        }
    }
}

/// One entry of the API's error payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// The API's structured error payload. Empty means "no API error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Best-effort decode of an error body. Anything that is not the
    /// structured payload yields an empty `ApiError`.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(detail) => write!(f, "twitter: {} {}", detail.code, detail.message),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Pick the error worth reporting: a non-empty API payload wins over the
/// transport-level error, otherwise the transport error is returned as is.
pub fn relevant_error(transport: Option<Error>, api: ApiError) -> Option<Error> {
    if api.is_empty() {
        transport
    } else {
        Some(Error::Api(api))
    }
}
