//! HTTP transport shared by the authorization flow and the resource layer.
//!
//! Every call performs exactly one round trip and runs the response through
//! [`classify`] before handing it back, so provider-side 500s and 429s never
//! reach the per-endpoint status checks.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use basecamp_core::Result;
use basecamp_core::error::{ConfigurationError, Error, TransportError};

/// Content type attached to every request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Content type of [`Payload::Form`] bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the underlying HTTP client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use basecamp_api::TransportConfig;
///
/// let config = TransportConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("my-app (me@example.com)");
/// assert_eq!(config.timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for a whole request, `None` to wait forever.
    pub timeout: Option<Duration>,
    /// Sent as the `User-Agent` header. Basecamp asks integrations to
    /// identify themselves here.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("basecamp-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as JSON under the default content type.
    Json(serde_json::Value),
    /// Sent form-encoded; overrides the content type for that one request.
    Form(Vec<(String, String)>),
}

impl Payload {
    /// Encode any serializable value as a JSON payload.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| ConfigurationError::InvalidPayload {
            message: e.to_string(),
        })?;
        Ok(Payload::Json(value))
    }

    fn encode(&self) -> Result<(HeaderValue, Vec<u8>)> {
        match self {
            Payload::Json(value) => {
                let body =
                    serde_json::to_vec(value).map_err(|e| ConfigurationError::InvalidPayload {
                        message: e.to_string(),
                    })?;
                Ok((HeaderValue::from_static(JSON_CONTENT_TYPE), body))
            }
            Payload::Form(pairs) => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                Ok((HeaderValue::from_static(FORM_CONTENT_TYPE), body.into_bytes()))
            }
        }
    }
}

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    /// Parsed `Retry-After` header, seconds form only.
    pub retry_after: Option<Duration>,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Returns true if the response has exactly this status.
    pub fn is(&self, status: u16) -> bool {
        self.status == status
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// The `error` string of a JSON error body, if there is one.
    pub fn provider_error(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        self.json::<ErrorBody>().ok().and_then(|body| body.error)
    }
}

/// Map provider-side failures to typed errors; pass everything else through.
///
/// - `500` → [`Error::Server`]
/// - `429` → [`Error::RateLimited`] with the `Retry-After` hint
/// - anything else is left for the caller to interpret
pub fn classify(response: ResponseEnvelope) -> Result<ResponseEnvelope> {
    match response.status {
        500 => Err(Error::server()),
        429 => Err(Error::rate_limited(response.retry_after)),
        _ => Ok(response),
    }
}

/// A fresh copy of the headers sent with every request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers
}

/// HTTP client issuing GET/POST/PUT/DELETE calls.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with the given configuration.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigurationError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this transport was built with.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Perform a GET request, merging `extra_headers` over the defaults.
    #[instrument(skip_all, fields(url = %loggable(url)))]
    pub async fn get(
        &self,
        url: &str,
        extra_headers: Option<HeaderMap>,
    ) -> Result<ResponseEnvelope> {
        let mut headers = default_headers();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }
        self.send(Method::GET, url, headers, None).await
    }

    /// Perform a POST request.
    #[instrument(skip_all, fields(url = %loggable(url)))]
    pub async fn post(&self, url: &str, payload: Option<&Payload>) -> Result<ResponseEnvelope> {
        self.send(Method::POST, url, default_headers(), payload).await
    }

    /// Perform a PUT request.
    #[instrument(skip_all, fields(url = %loggable(url)))]
    pub async fn put(&self, url: &str, payload: Option<&Payload>) -> Result<ResponseEnvelope> {
        self.send(Method::PUT, url, default_headers(), payload).await
    }

    /// Perform a DELETE request.
    #[instrument(skip_all, fields(url = %loggable(url)))]
    pub async fn delete(&self, url: &str, payload: Option<&Payload>) -> Result<ResponseEnvelope> {
        self.send(Method::DELETE, url, default_headers(), payload).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        mut headers: HeaderMap,
        payload: Option<&Payload>,
    ) -> Result<ResponseEnvelope> {
        debug!(%method, "Sending request");

        let mut request = self.client.request(method, url);
        if let Some(payload) = payload {
            let (content_type, body) = payload.encode()?;
            headers.insert(CONTENT_TYPE, content_type);
            request = request.body(body);
        }

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        trace!(status, "Received response");

        classify(ResponseEnvelope {
            status,
            retry_after,
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self
                    .config
                    .timeout
                    .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
                    .unwrap_or(0),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

/// The URL without its query string, which carries the access token.
fn loggable(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
