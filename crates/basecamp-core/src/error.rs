//! Error types for the Basecamp binding.
//!
//! A single [`Error`] enum with one variant per failure family: local
//! misconfiguration, authorization rejections, provider-side 500s and
//! 429s, connection-level transport failures, and unexpected statuses
//! from resource endpoints.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Message carried by [`Error::Server`] for every HTTP 500.
pub const SERVER_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Message carried by [`Error::RateLimited`] for every HTTP 429.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests.";

/// The unified error type for Basecamp operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Local misuse, never caused by the network.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The authorization server rejected a request.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The provider answered with HTTP 500.
    #[error("server error: {message}")]
    Server { message: String },

    /// The provider answered with HTTP 429.
    #[error("rate limited: {message}")]
    RateLimited {
        message: String,
        /// The provider's `Retry-After` hint, when it sent one.
        retry_after: Option<Duration>,
    },

    /// Connection-level failure (DNS, TLS, timeout, broken body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A resource endpoint answered with a status it does not document as success.
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),
}

impl Error {
    /// The error raised for every HTTP 500 response.
    pub fn server() -> Self {
        Error::Server {
            message: SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    /// The error raised for every HTTP 429 response.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Error::RateLimited {
            message: RATE_LIMITED_MESSAGE.to_string(),
            retry_after,
        }
    }
}

/// Errors caused by how the binding was set up or called.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A request URL was built without a resource path.
    #[error("No endpoint has been set.")]
    MissingEndpoint,

    /// A header value could not be encoded (e.g. a token with control characters).
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// A request payload could not be encoded as JSON.
    #[error("request payload could not be serialized: {message}")]
    InvalidPayload { message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// The authorization server rejected a request.
///
/// Carries the provider's `error` string when the response body had one.
#[derive(Debug)]
pub struct AuthError {
    /// HTTP status code of the rejected request.
    pub status: u16,
    /// The `error` field of the provider's JSON body, if present.
    pub error: Option<String>,
}

impl AuthError {
    /// Create a new authorization error.
    pub fn new(status: u16, error: Option<String>) -> Self {
        Self { status, error }
    }

    /// Returns the provider's error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{}", error),
            None => write!(f, "authorization request failed (HTTP {})", self.status),
        }
    }
}

impl std::error::Error for AuthError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed (DNS, refused, TLS handshake).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The response body could not be read.
    #[error("failed to read response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Errors from the resource endpoints (projects, to-dos, comments, ...).
#[derive(Debug, Error)]
pub enum ResourceError {
    /// HTTP 403: not allowed, or an account limit was reached.
    #[error("forbidden: not allowed or account limit reached")]
    Forbidden { body: String },

    /// HTTP 404.
    #[error("resource not found")]
    NotFound { body: String },

    /// Any other status the endpoint does not document as success.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A success status whose body did not match the expected shape.
    #[error("invalid response body: {message}")]
    InvalidBody { message: String },

    /// The provider acknowledged an archive request without archiving.
    #[error("project {id} was not archived")]
    NotArchived { id: u64 },
}

impl ResourceError {
    /// Returns the HTTP status this error was raised for, if it came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResourceError::Forbidden { .. } => Some(403),
            ResourceError::NotFound { .. } => Some(404),
            ResourceError::UnexpectedStatus { status, .. } => Some(*status),
            ResourceError::InvalidBody { .. } | ResourceError::NotArchived { .. } => None,
        }
    }

    /// Returns the raw response body kept for diagnostics, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ResourceError::Forbidden { body }
            | ResourceError::NotFound { body }
            | ResourceError::UnexpectedStatus { body, .. } => Some(body),
            ResourceError::InvalidBody { .. } | ResourceError::NotArchived { .. } => None,
        }
    }
}
