//! OAuth client credentials.

use std::fmt;

/// Client credentials registered with the Launchpad authorization server.
///
/// Supplied by the embedding application and immutable once handed to an
/// authorization flow.
///
/// # Security
///
/// The client secret is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use basecamp_core::Credentials;
///
/// let creds = Credentials::new("12345asdfg", "764332asvi44", "http://127.0.0.1:8000/auth-return/");
/// assert_eq!(creds.client_id(), "12345asdfg");
/// ```
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The application's client id
    /// * `client_secret` - The application's client secret
    /// * `redirect_uri` - Where Launchpad sends the user back with a code
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Returns the client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when building token requests. Never log it.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_secret_in_debug() {
        let creds = Credentials::new("client", "s3cr3t", "http://localhost/cb");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("client"));
        assert!(debug.contains("http://localhost/cb"));
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }
}
