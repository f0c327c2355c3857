//! HTTP requests and responses as plain data.
//!
//! # Design
//! Services build `HttpRequest` values and parse `HttpResponse` values without
//! touching the network. A `Transport` (see `transport.rs`) performs the
//! round-trip in between, so request construction and response decoding stay
//! deterministic and can be tested without a server.

use std::fmt;

/// HTTP method for a request. The relationship endpoints only use two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string. The
/// relationship endpoints never send a body, but the field is kept so any
/// transport can execute a request without special-casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Decoded query pairs of `url`, in order.
    pub fn query(&self) -> Vec<(String, String)> {
        match url::Url::parse(&self.url) {
            Ok(url) => url.query_pairs().into_owned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// `url` without its query string.
    pub fn path(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(path, _)| path)
    }
}

/// An HTTP response described as plain data.
///
/// Returned by a `Transport` and handed back to the caller inside `Reply`, so
/// status code and headers (rate-limit counters, for example) stay
/// inspectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
