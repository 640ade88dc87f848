//! CLI integration tests.
//!
//! The binary runs against a wiremock server, so no network access or real
//! credentials are needed.

use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the CLI binary with arguments.
fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bcx"));
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_auth_url_makes_no_request() {
    let stdout = run_cli_success(&[
        "auth",
        "url",
        "--client-id",
        "id",
        "--client-secret",
        "secret",
        "--redirect-uri",
        "https://app.example/cb",
    ]);

    assert_eq!(
        stdout.trim(),
        "https://launchpad.37signals.com/authorization/new?\
         redirect_uri=https%3A%2F%2Fapp.example%2Fcb&type=web_server&client_id=id"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_accounts_against_mock_launchpad() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authorization.json"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identity": { "id": 1 },
            "accounts": [
                { "product": "bc3", "id": 10 },
                { "product": "bcx", "id": 20, "href": "https://basecamp.com/20/api/v1" }
            ]
        })))
        .mount(&server)
        .await;

    let stdout = run_cli_success(&[
        "auth",
        "accounts",
        "--token",
        "token-1",
        "--auth-base-url",
        &server.uri(),
    ]);

    let accounts: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["id"], 20);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_projects_list_against_mock_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/api/v1/projects.json"))
        .and(query_param("access_token", "token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Launch" }
        ])))
        .mount(&server)
        .await;

    let account_url = format!("{}/1/api/v1", server.uri());
    let stdout = run_cli_success(&[
        "projects",
        "list",
        "--account-url",
        &account_url,
        "--token",
        "token-1",
    ]);

    let projects: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(projects[0]["name"], "Launch");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_projects_get_reports_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/api/v1/projects/9.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let account_url = format!("{}/1/api/v1", server.uri());
    let output = run_cli(&[
        "projects",
        "get",
        "--account-url",
        &account_url,
        "--token",
        "token-1",
        "--id",
        "9",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to fetch project"));
}
