//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.wordsmith.ai/";

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "WORDSMITH_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WORDSMITH_BASE_URL";

/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "WORDSMITH_TIMEOUT_SECS";

/// Connection settings for a [`WordsmithClient`](crate::WordsmithClient).
///
/// Built once and handed to the client, which keeps it read-only for its
/// whole lifetime.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the production service with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the config at a different endpoint.
    ///
    /// Fails with [`Error::Network`] when `url` is not an absolute URL.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = parse_base_url(url.as_ref())?;
        Ok(self)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load a config from `WORDSMITH_API_KEY`, `WORDSMITH_BASE_URL` and
    /// `WORDSMITH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load a config from variables resolved by `lookup`.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::validation(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim())?;
            }
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::validation(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::validation("API key cannot be empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::validation("Timeout must be greater than zero"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parse and normalize a base URL so relative paths join beneath it.
pub(crate) fn parse_base_url(url: &str) -> Result<Url> {
    let mut base_url = Url::parse(url).map_err(|e| Error::Network {
        message: format!("Invalid base URL '{}': {}", url, e),
        source: Some(Box::new(e)),
    })?;
    if base_url.cannot_be_a_base() {
        return Err(Error::network(format!("Invalid base URL '{}'", url)));
    }
    if !base_url.path().ends_with('/') {
        base_url.set_path(&format!("{}/", base_url.path()));
    }
    Ok(base_url)
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid absolute URL")
}
