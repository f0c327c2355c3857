//! Client configuration.
//!
//! A `Config` is built once and shared read-only by every service of a
//! `Client`.

use std::time::Duration;

use url::Url;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";
pub const DEFAULT_USER_AGENT: &str = concat!("twitter-core/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "TWITTER_API_BASE_URL";
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "TWITTER_TIMEOUT_SECS";

#[derive(Clone)]
pub struct Config {
    base_url: Url,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Config {
    /// `base_url` is the API root every resource path is joined onto, e.g.
    /// `https://api.twitter.com/1.1/`. A missing trailing slash is added.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{base_url} cannot be used as a base URL")));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        Ok(Self {
            base_url,
            bearer_token: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Read `TWITTER_API_BASE_URL`, `TWITTER_BEARER_TOKEN` and
    /// `TWITTER_TIMEOUT_SECS`. Only the base URL has a default.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(token) = std::env::var(ENV_BEARER_TOKEN) {
            config = config.with_bearer_token(token);
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {secs:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Deadline for a whole request/response cycle, enforced by the transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Headers sent with every request.
    pub(crate) fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.user_agent.clone()),
        ];
        if let Some(token) = &self.bearer_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            bearer_token: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// The token stays out of debug output and therefore out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
