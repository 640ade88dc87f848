//! Launchpad OAuth2 authorization-code flow.
//!
//! Three independent entry points, none of which keeps state between calls:
//!
//! 1. [`AuthFlow::launchpad_url`] builds the URL to redirect the user to.
//! 2. [`AuthFlow::get_token`] exchanges the returned code for tokens.
//! 3. [`AuthFlow::get_identity`] / [`AuthFlow::get_accounts`] look up who
//!    the token belongs to and which accounts it can reach.
//!
//! Step 3 needs only the access token, so it also lives on [`Launchpad`],
//! which can be built without application credentials.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use basecamp_core::error::{AuthError, ConfigurationError};
use basecamp_core::{
    AccessToken, AccountReference, AccountType, Authorization, Credentials, Identity,
    RefreshToken, Result, TokenPair,
};

use crate::transport::{HttpTransport, Payload, ResponseEnvelope};

/// Launchpad's public base URL.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://launchpad.37signals.com/";

/// Grant type sent with the authorize and token requests.
pub const AUTH_TYPE: &str = "web_server";

/// Grant type sent when refreshing an access token.
pub const REFRESH_TYPE: &str = "refresh";

/// Token lookups against Launchpad's `authorization.json`.
///
/// Only the bearer token is sent; no client id or secret is involved.
#[derive(Debug, Clone)]
pub struct Launchpad {
    auth_base_url: String,
    transport: HttpTransport,
}

impl Launchpad {
    /// Point at the public Launchpad with a default transport.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }

    pub fn with_transport(transport: HttpTransport) -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            transport,
        }
    }

    /// Point at another authorization server (e.g. a mock).
    ///
    /// A trailing slash is added when missing.
    pub fn with_auth_base_url(mut self, auth_base_url: impl Into<String>) -> Self {
        let mut auth_base_url = auth_base_url.into();
        if !auth_base_url.ends_with('/') {
            auth_base_url.push('/');
        }
        self.auth_base_url = auth_base_url;
        self
    }

    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    /// Fetch the whole `authorization.json` document for a token.
    pub async fn authorization(&self, access_token: &AccessToken) -> Result<Authorization> {
        self.fetch(access_token).await
    }

    /// The identity the token was issued to. Only `identity` is decoded.
    pub async fn get_identity(&self, access_token: &AccessToken) -> Result<Identity> {
        #[derive(Deserialize)]
        struct Body {
            identity: Identity,
        }

        Ok(self.fetch::<Body>(access_token).await?.identity)
    }

    /// The accounts reachable with the token, filtered by product.
    ///
    /// Only `accounts` is decoded. Order is preserved. Pass
    /// [`AccountType::All`] to get every entry and `AccountType::default()`
    /// for `bcx` accounts only.
    pub async fn get_accounts(
        &self,
        access_token: &AccessToken,
        account_type: &AccountType,
    ) -> Result<Vec<AccountReference>> {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            accounts: Vec<AccountReference>,
        }

        let accounts = self.fetch::<Body>(access_token).await?.accounts;
        Ok(account_type.filter(accounts))
    }

    #[instrument(skip_all)]
    async fn fetch<T: DeserializeOwned>(&self, access_token: &AccessToken) -> Result<T> {
        debug!("Fetching authorization");

        let response = self
            .transport
            .get(
                &self.url("authorization.json"),
                Some(bearer_headers(access_token)?),
            )
            .await?;

        expect_ok(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.auth_base_url, path)
    }
}

/// Client for the Launchpad authorization server.
#[derive(Clone)]
pub struct AuthFlow {
    credentials: Credentials,
    launchpad: Launchpad,
}

impl AuthFlow {
    /// Create a flow against the public Launchpad with a default transport.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self::with_transport(credentials, HttpTransport::new()?))
    }

    /// Create a flow on top of an existing transport.
    pub fn with_transport(credentials: Credentials, transport: HttpTransport) -> Self {
        Self {
            credentials,
            launchpad: Launchpad::with_transport(transport),
        }
    }

    /// Point the flow at another authorization server (e.g. a mock).
    ///
    /// A trailing slash is added when missing.
    pub fn with_auth_base_url(mut self, auth_base_url: impl Into<String>) -> Self {
        self.launchpad = self.launchpad.with_auth_base_url(auth_base_url);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn auth_base_url(&self) -> &str {
        self.launchpad.auth_base_url()
    }

    /// The credential-free lookups this flow uses.
    pub fn launchpad(&self) -> &Launchpad {
        &self.launchpad
    }

    /// The URL to send the user to so they can grant access.
    ///
    /// No network call is made.
    ///
    /// # Example
    ///
    /// ```
    /// use basecamp_api::AuthFlow;
    /// use basecamp_core::Credentials;
    ///
    /// # fn example() -> basecamp_core::Result<()> {
    /// let flow = AuthFlow::new(Credentials::new("id", "secret", "https://app.example/cb"))?;
    /// assert_eq!(
    ///     flow.launchpad_url(),
    ///     "https://launchpad.37signals.com/authorization/new?\
    ///      redirect_uri=https%3A%2F%2Fapp.example%2Fcb&type=web_server&client_id=id"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn launchpad_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_args())
            .finish();
        format!("{}?{}", self.launchpad.url("authorization/new"), query)
    }

    /// Exchange an authorization code for an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// [`AuthError`] carrying the provider's `error` string on any status
    /// other than 200.
    #[instrument(skip_all, fields(client_id = %self.credentials.client_id()))]
    pub async fn get_token(&self, code: &str) -> Result<TokenPair> {
        info!("Exchanging authorization code");

        let mut form = self.query_args();
        form.push(("code".to_string(), code.to_string()));
        form.push((
            "client_secret".to_string(),
            self.credentials.client_secret().to_string(),
        ));

        let response = self
            .launchpad
            .transport
            .post(&self.token_url(), Some(&Payload::Form(form)))
            .await?;

        let pair: TokenPair = expect_ok(&response)?;
        debug!(expires_in = ?pair.expires_in, "Authorization code exchanged");
        Ok(pair)
    }

    /// Obtain a fresh access token from a refresh token.
    ///
    /// Launchpad may leave `refresh_token` out of the answer; keep using the
    /// old one in that case.
    #[instrument(skip_all, fields(client_id = %self.credentials.client_id()))]
    pub async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        info!("Refreshing access token");

        let form = vec![
            ("type".to_string(), REFRESH_TYPE.to_string()),
            (
                "refresh_token".to_string(),
                refresh_token.as_str().to_string(),
            ),
            (
                "client_id".to_string(),
                self.credentials.client_id().to_string(),
            ),
            (
                "redirect_uri".to_string(),
                self.credentials.redirect_uri().to_string(),
            ),
            (
                "client_secret".to_string(),
                self.credentials.client_secret().to_string(),
            ),
        ];

        let response = self
            .launchpad
            .transport
            .post(&self.token_url(), Some(&Payload::Form(form)))
            .await?;

        expect_ok(&response)
    }

    /// See [`Launchpad::authorization`].
    pub async fn authorization(&self, access_token: &AccessToken) -> Result<Authorization> {
        self.launchpad.authorization(access_token).await
    }

    /// See [`Launchpad::get_identity`].
    pub async fn get_identity(&self, access_token: &AccessToken) -> Result<Identity> {
        self.launchpad.get_identity(access_token).await
    }

    /// See [`Launchpad::get_accounts`].
    pub async fn get_accounts(
        &self,
        access_token: &AccessToken,
        account_type: &AccountType,
    ) -> Result<Vec<AccountReference>> {
        self.launchpad.get_accounts(access_token, account_type).await
    }

    /// `redirect_uri`, `type`, `client_id`: the authorize URL keeps this order.
    fn query_args(&self) -> Vec<(String, String)> {
        vec![
            (
                "redirect_uri".to_string(),
                self.credentials.redirect_uri().to_string(),
            ),
            ("type".to_string(), AUTH_TYPE.to_string()),
            (
                "client_id".to_string(),
                self.credentials.client_id().to_string(),
            ),
        ]
    }

    fn token_url(&self) -> String {
        self.launchpad.url("authorization/token")
    }
}

impl std::fmt::Debug for AuthFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFlow")
            .field("credentials", &self.credentials)
            .field("auth_base_url", &self.launchpad.auth_base_url)
            .finish()
    }
}

/// `Authorization: Bearer <token>`, flagged sensitive so it never shows up
/// in reqwest's debug output.
fn bearer_headers(access_token: &AccessToken) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", access_token.as_str()))
        .map_err(|e| ConfigurationError::InvalidHeader {
            name: AUTHORIZATION.to_string(),
            reason: e.to_string(),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Decode a 200 body, or turn anything else into an [`AuthError`].
fn expect_ok<T: DeserializeOwned>(response: &ResponseEnvelope) -> Result<T> {
    if !response.is(200) {
        return Err(AuthError::new(response.status, response.provider_error()).into());
    }
    response
        .json()
        .map_err(|_| AuthError::new(response.status, None).into())
}
