//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ArticlesApi;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::types::{GenerateArticleResponse, GetArticleResponse};

/// Prefix every API path is resolved under.
const API_PREFIX: &str = "api/";

/// Wordsmith API client.
///
/// Cheap to clone; clones share one connection pool and one read-only
/// [`ClientConfig`]. Any number of requests may be in flight at once.
///
/// # Example
///
/// ```no_run
/// use wordsmith_client::WordsmithClient;
///
/// # async fn example() -> wordsmith_client::Result<()> {
/// let client = WordsmithClient::with_api_key("secret")?;
///
/// let response = client.generate_article("rust async", None).await?;
/// if let Some(id) = response.first_article_id() {
///     let article = client.get_article(id).await?;
///     println!("{:?}", article.article.map(|a| a.status));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WordsmithClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
#[derive(Debug)]
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Connection settings.
    pub(crate) config: ClientConfig,
}

impl WordsmithClient {
    /// Create a client from a config, using the default user agent.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_config(config, None)
    }

    /// Create a client for the production service with the default timeout.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key))
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn from_config(config: ClientConfig, user_agent: Option<String>) -> Result<Self> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| Error::validation("API key contains characters not allowed in a header"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = user_agent.unwrap_or_else(default_user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(Error::from_transport)?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// The connection settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }

    /// Access the articles API.
    pub fn articles(&self) -> ArticlesApi {
        ArticlesApi::new(self.clone())
    }

    /// Start generating an article for `target_keyword`.
    ///
    /// The keyword is trimmed before sending; a blank keyword fails with
    /// [`Error::Validation`] without touching the network.
    pub async fn generate_article(
        &self,
        target_keyword: &str,
        project_name: Option<&str>,
    ) -> Result<GenerateArticleResponse> {
        self.articles().generate(target_keyword, project_name).await
    }

    /// Fetch an article's status and content.
    ///
    /// A blank ID fails with [`Error::Validation`] without touching the network.
    pub async fn get_article(&self, article_id: &str) -> Result<GetArticleResponse> {
        self.articles().get(article_id).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .config
            .base_url
            .join(&format!("{}{}", API_PREFIX, path))
            .map_err(|e| Error::Network {
                message: format!("Invalid request URL for '{}': {}", path, e),
                source: Some(Box::new(e)),
            })
    }

    /// Build a URL for an API path followed by one caller-supplied segment.
    ///
    /// The segment is percent-encoded as a whole, so `/`, `?` and `#` inside it
    /// cannot reach another path or add a query.
    pub(crate) fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|_| Error::network(format!("Invalid request URL for '{}'", path)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Make a GET request to a URL from [`Self::url`] or [`Self::url_with_segment`].
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(method = "GET", %url, "sending request");
        let request = self.inner.http.get(url);
        self.send(request).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let body = serde_json::to_vec(body)
            .map_err(|e| Error::validation(format!("Failed to encode request body: {}", e)))?;
        tracing::debug!(method = "POST", %url, "sending request");
        let request = self.inner.http.post(url).body(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Error::from_transport)?;
        Self::handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();

        // Extract Retry-After header before consuming response
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.map_err(Error::from_transport)?;
        tracing::debug!(status, bytes = body.len(), "received response");

        decode_response(status, retry_after.as_deref(), &body)
    }
}

/// Turn a status code, `Retry-After` value and body into a typed result.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: u16,
    retry_after: Option<&str>,
    body: &str,
) -> Result<T> {
    if let Some(err) = error_for_status(status, retry_after, body) {
        return Err(err);
    }

    serde_json::from_str(body).map_err(|e| Error::Api {
        message: format!("Failed to decode response: {}", e),
        status: Some(status),
    })
}

/// Classify a non-success status. Returns `None` for 2xx.
pub(crate) fn error_for_status(status: u16, retry_after: Option<&str>, body: &str) -> Option<Error> {
    let err = match status {
        200..=299 => return None,
        401 => Error::Authentication {
            message: "Invalid API key or unauthorized access".to_string(),
            status: Some(status),
        },
        429 => {
            let retry_after = retry_after.and_then(parse_retry_after);
            tracing::warn!(?retry_after, "rate limited by server");
            Error::RateLimit {
                message: "Rate limit exceeded".to_string(),
                retry_after,
            }
        }
        400..=499 => Error::Validation {
            message: extract_error_message(body).unwrap_or_else(|| "Client error".to_string()),
            status: Some(status),
        },
        500..=599 => Error::Api {
            message: extract_error_message(body).unwrap_or_else(|| "Server error".to_string()),
            status: Some(status),
        },
        _ => Error::network(format!("Unexpected status code: {}", status)),
    };
    Some(err)
}

/// Pull `message` (or failing that `error`) out of a JSON error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    ["message", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(|v| v.as_str()))
        .map(str::to_owned)
}

/// Parse a `Retry-After` value given in (possibly fractional) seconds.
fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

fn default_user_agent() -> String {
    format!("wordsmith-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for creating a WordsmithClient.
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL for the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<WordsmithClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::validation("api_key is required"))?;

        let mut config = ClientConfig::new(api_key).with_timeout(self.timeout);
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url)?;
        }

        WordsmithClient::from_config(config, self.user_agent)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
