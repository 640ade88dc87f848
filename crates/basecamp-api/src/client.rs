//! Account-scoped client: request URL construction and verb dispatch.

use basecamp_core::error::ConfigurationError;
use basecamp_core::{AccessToken, RefreshToken, Result};

use crate::resources::{Comments, Documents, People, Projects, TodoLists, Todos};
use crate::transport::{HttpTransport, Payload, ResponseEnvelope};

/// Client for the resources of one Basecamp account.
///
/// Holds the account's API base URL and the caller's tokens. The resource
/// path is an argument of every call, so one client can be shared freely
/// between concurrent requests.
///
/// # Example
///
/// ```
/// use basecamp_api::ResourceClient;
/// use basecamp_core::AccessToken;
///
/// # fn example() -> basecamp_core::Result<()> {
/// let client = ResourceClient::new(
///     "https://basecamp.com/12345/api/v1",
///     AccessToken::new("token"),
///     None,
/// )?;
/// assert_eq!(
///     client.build_url("/projects.json/")?,
///     "https://basecamp.com/12345/api/v1/projects.json?access_token=token"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResourceClient {
    account_url: String,
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    transport: HttpTransport,
}

impl ResourceClient {
    /// Create a client with a default transport.
    ///
    /// The account URL is stored verbatim; no validation is applied.
    pub fn new(
        account_url: impl Into<String>,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Result<Self> {
        Ok(Self::with_transport(
            account_url,
            access_token,
            refresh_token,
            HttpTransport::new()?,
        ))
    }

    /// Create a client on top of an existing transport.
    pub fn with_transport(
        account_url: impl Into<String>,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        transport: HttpTransport,
    ) -> Self {
        Self {
            account_url: account_url.into(),
            access_token,
            refresh_token,
            transport,
        }
    }

    pub fn account_url(&self) -> &str {
        &self.account_url
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    /// Build the full request URL for an endpoint path.
    ///
    /// Leading and trailing slashes of `endpoint` are dropped and the access
    /// token is appended as a query parameter.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingEndpoint`] if `endpoint` is empty or
    /// made only of slashes.
    pub fn build_url(&self, endpoint: &str) -> Result<String> {
        self.build_url_with_query(endpoint, &[])
    }

    /// Like [`build_url`](Self::build_url), with extra query pairs placed
    /// after the access token.
    pub fn build_url_with_query(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return Err(ConfigurationError::MissingEndpoint.into());
        }

        let mut params = url::form_urlencoded::Serializer::new(String::new());
        params.append_pair("access_token", self.access_token.as_str());
        params.extend_pairs(query);

        Ok(format!(
            "{}/{}?{}",
            self.account_url,
            endpoint,
            params.finish()
        ))
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn todo_lists(&self) -> TodoLists<'_> {
        TodoLists::new(self)
    }

    pub fn todos(&self) -> Todos<'_> {
        Todos::new(self)
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(self)
    }

    pub fn people(&self) -> People<'_> {
        People::new(self)
    }

    pub fn documents(&self) -> Documents<'_> {
        Documents::new(self)
    }

    pub(crate) async fn get(&self, endpoint: &str) -> Result<ResponseEnvelope> {
        self.get_with_query(endpoint, &[]).await
    }

    pub(crate) async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<ResponseEnvelope> {
        let url = self.build_url_with_query(endpoint, query)?;
        self.transport.get(&url, None).await
    }

    pub(crate) async fn post(&self, endpoint: &str, payload: &Payload) -> Result<ResponseEnvelope> {
        let url = self.build_url(endpoint)?;
        self.transport.post(&url, Some(payload)).await
    }

    pub(crate) async fn put(&self, endpoint: &str, payload: &Payload) -> Result<ResponseEnvelope> {
        let url = self.build_url(endpoint)?;
        self.transport.put(&url, Some(payload)).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<ResponseEnvelope> {
        let url = self.build_url(endpoint)?;
        self.transport.delete(&url, None).await
    }
}
