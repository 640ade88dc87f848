//! Mock Launchpad tests for the authorization flow.
//!
//! A wiremock server stands in for launchpad.37signals.com so the token
//! exchange and account lookup run without network access.

use std::time::Duration;

use basecamp_api::{AuthFlow, HttpTransport, Launchpad, TransportConfig};
use basecamp_core::error::{SERVER_ERROR_MESSAGE, TransportError};
use basecamp_core::{AccessToken, AccountType, Credentials, Error, RefreshToken};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_flow(server: &MockServer) -> AuthFlow {
    AuthFlow::new(Credentials::new(
        "client-id",
        "client-secret",
        "https://app.example/callback",
    ))
    .unwrap()
    .with_auth_base_url(server.uri())
}

fn authorization_body() -> serde_json::Value {
    json!({
        "expires_at": "2012-03-22T16:56:48-05:00",
        "identity": {
            "id": 9999999,
            "first_name": "Jason",
            "last_name": "Fried",
            "email_address": "jason@example.com"
        },
        "accounts": [
            {
                "product": "bcx",
                "id": 88888888,
                "name": "Wayne Enterprises, Ltd.",
                "href": "https://basecamp.com/88888888/api/v1"
            },
            {
                "product": "campfire",
                "id": 44444444,
                "name": "Wayne Enterprises, Ltd.",
                "href": "https://wayneenterprises.campfirenow.com"
            },
            {
                "product": "bcx",
                "id": 77777777,
                "name": "Stark Industries",
                "href": "https://basecamp.com/77777777/api/v1"
            }
        ]
    })
}

// ============================================================================
// Token exchange
// ============================================================================

#[tokio::test]
async fn test_get_token_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("code=code123"))
        .and(body_string_contains("type=web_server"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-abc",
            "refresh_token": "refresh-xyz",
            "expires_in": 1209600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = mock_flow(&server).get_token("code123").await.unwrap();

    assert_eq!(tokens.access_token.as_str(), "access-abc");
    assert_eq!(
        tokens.refresh_token.as_ref().map(RefreshToken::as_str),
        Some("refresh-xyz")
    );
    assert_eq!(tokens.expires_in, Some(1209600));
}

#[tokio::test]
async fn test_get_token_rejected_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "expired_verification_code"
        })))
        .mount(&server)
        .await;

    let err = mock_flow(&server).get_token("stale").await.unwrap_err();

    match err {
        Error::Auth(auth) => {
            assert_eq!(auth.status, 400);
            assert_eq!(auth.message(), Some("expired_verification_code"));
            assert_eq!(auth.to_string(), "expired_verification_code");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_token_rejection_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .mount(&server)
        .await;

    let err = mock_flow(&server).get_token("code").await.unwrap_err();

    match err {
        Error::Auth(auth) => {
            assert_eq!(auth.status, 401);
            assert!(auth.message().is_none());
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .and(body_string_contains("type=refresh"))
        .and(body_string_contains("refresh_token=refresh-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-new",
            "expires_in": 1209600
        })))
        .mount(&server)
        .await;

    let tokens = mock_flow(&server)
        .refresh(&RefreshToken::new("refresh-xyz"))
        .await
        .unwrap();

    assert_eq!(tokens.access_token.as_str(), "access-new");
    assert!(tokens.refresh_token.is_none());
}

// ============================================================================
// Identity and accounts
// ============================================================================

#[tokio::test]
async fn test_get_identity_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(authorization_body()))
        .expect(1)
        .mount(&server)
        .await;

    let identity = mock_flow(&server)
        .get_identity(&AccessToken::new("access-abc"))
        .await
        .unwrap();

    assert_eq!(identity.id, 9999999);
    assert_eq!(identity.email_address.as_deref(), Some("jason@example.com"));
}

#[tokio::test]
async fn test_get_accounts_filters_bcx_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(authorization_body()))
        .mount(&server)
        .await;

    let flow = mock_flow(&server);
    let token = AccessToken::new("access-abc");

    let bcx = flow
        .get_accounts(&token, &AccountType::default())
        .await
        .unwrap();
    let ids: Vec<Option<u64>> = bcx.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(88888888), Some(77777777)]);

    let all = flow.get_accounts(&token, &AccountType::All).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].product, "campfire");

    let none = flow
        .get_accounts(&token, &AccountType::from("highrise"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_get_accounts_reads_only_accounts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [
                {"product": "bcx", "id": 1},
                {"product": "bc3", "id": 2}
            ]
        })))
        .mount(&server)
        .await;

    let flow = mock_flow(&server);
    let token = AccessToken::new("access-abc");

    let bcx = flow
        .get_accounts(&token, &AccountType::default())
        .await
        .unwrap();
    assert_eq!(bcx.len(), 1);
    assert_eq!(bcx[0].id, Some(1));
    assert_eq!(bcx[0].product, "bcx");

    let all = flow.get_accounts(&token, &AccountType::All).await.unwrap();
    let products: Vec<&str> = all.iter().map(|a| a.product.as_str()).collect();
    assert_eq!(products, vec!["bcx", "bc3"]);
}

#[tokio::test]
async fn test_get_accounts_all_keeps_unusual_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identity": { "id": 9999999 },
            "accounts": [
                {"id": 3, "name": "Legacy"},
                {"product": "bcx", "id": "not-a-number"}
            ]
        })))
        .mount(&server)
        .await;

    let launchpad = Launchpad::new().unwrap().with_auth_base_url(server.uri());
    let token = AccessToken::new("access-abc");

    let all = launchpad
        .get_accounts(&token, &AccountType::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Legacy");
    assert_eq!(all[0].product, "");
    assert_eq!(all[1].id, None);
    assert_eq!(all[1].extra["id"], "not-a-number");

    let bcx = launchpad
        .get_accounts(&token, &AccountType::default())
        .await
        .unwrap();
    assert_eq!(bcx.len(), 1);
}

#[tokio::test]
async fn test_get_identity_ignores_accounts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identity": { "id": 42, "first_name": "Jason" },
            "accounts": "unavailable"
        })))
        .mount(&server)
        .await;

    let identity = Launchpad::new()
        .unwrap()
        .with_auth_base_url(server.uri())
        .get_identity(&AccessToken::new("access-abc"))
        .await
        .unwrap();

    assert_eq!(identity.id, 42);
    assert_eq!(identity.first_name.as_deref(), Some("Jason"));
}

#[tokio::test]
async fn test_authorization_invalid_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "OAuth token could not be verified"
        })))
        .mount(&server)
        .await;

    let err = mock_flow(&server)
        .authorization(&AccessToken::new("bad"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(ref auth) if auth.status == 401));
}

// ============================================================================
// Provider failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_reported_each_time() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let flow = mock_flow(&server);
    for _ in 0..2 {
        match flow.get_token("code").await.unwrap_err() {
            Error::Server { message } => assert_eq!(message, SERVER_ERROR_MESSAGE),
            other => panic!("expected server error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let err = mock_flow(&server)
        .get_identity(&AccessToken::new("access-abc"))
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { retry_after, .. } => {
            assert_eq!(retry_after, Some(Duration::from_secs(30)));
        }
        other => panic!("expected rate limit, got {other:?}"),
    }
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let flow = AuthFlow::new(Credentials::new("id", "secret", "https://app.example/cb"))
        .unwrap()
        .with_auth_base_url(format!("http://127.0.0.1:{port}"));

    let err = flow.get_token("code").await.unwrap_err();

    assert!(
        matches!(err, Error::Transport(TransportError::Connection { .. })),
        "expected connection error, got {err:?}"
    );
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(authorization_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let transport =
        HttpTransport::with_config(TransportConfig::default().with_timeout(Duration::from_millis(200)))
            .unwrap();
    let launchpad = Launchpad::with_transport(transport).with_auth_base_url(server.uri());

    let err = launchpad
        .get_identity(&AccessToken::new("access-abc"))
        .await
        .unwrap_err();

    match err {
        Error::Transport(TransportError::Timeout { duration_ms }) => assert_eq!(duration_ms, 200),
        other => panic!("expected timeout, got {other:?}"),
    }
}
