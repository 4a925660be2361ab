//! Integration tests for the accounts client.
//!
//! Each test runs the client against a one-shot HTTP responder on a local
//! listener and inspects the request it received.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use keyroster_api::{
    Account, AccountApi, AccountId, AccountType, AccountsClient, ClientConfig, Error, Label,
    StatusCode,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves a single canned response and returns the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map_or(0, |value| value.trim().parse::<usize>().unwrap());
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8_lossy(&request).into_owned()
    });

    (base, handle)
}

fn client(base: &str) -> AccountsClient {
    AccountsClient::new(&ClientConfig::new(base).unwrap()).unwrap()
}

/// Splits a raw request into its request line and body.
fn split_request(raw: &str) -> (&str, &str) {
    let line = raw.lines().next().unwrap_or_default();
    let body = raw.split("\r\n\r\n").nth(1).unwrap_or_default();
    (line, body)
}

#[tokio::test]
async fn list_decodes_server_order() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[
            {"id":"2","type":"ldap","login":"carol","password":null,"labels":[]},
            {"id":"1","type":"local","login":"bob","password":"x","labels":[{"text":"admin"}]}
        ]"#,
    )
    .await;

    let accounts = client(&base).list().await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(split_request(&request).0, "GET /accounts HTTP/1.1");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].login, "carol");
    assert_eq!(accounts[0].kind, AccountType::Ldap);
    assert_eq!(accounts[1].id, Some(AccountId::new("1")));
    assert_eq!(accounts[1].labels, vec![Label::new("admin")]);
}

#[tokio::test]
async fn create_posts_body_and_returns_created() {
    let (base, server) = serve_once(
        "201 Created",
        r#"{"id":"7","type":"local","login":"dave","password":"pw","labels":[{"text":"ops"}]}"#,
    )
    .await;

    let account = Account::new(AccountType::Local, "dave")
        .with_password("pw")
        .with_labels(["ops"]);
    let created = client(&base).create(&account).await.unwrap();
    let request = server.await.unwrap();
    let (line, body) = split_request(&request);

    assert_eq!(line, "POST /accounts HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert!(sent.get("id").is_none());
    assert_eq!(sent["login"], "dave");
    assert_eq!(sent["type"], "local");

    assert_eq!(created.id, Some(AccountId::new("7")));
    assert_eq!(created.labels, vec![Label::new("ops")]);
}

#[tokio::test]
async fn update_puts_to_item_url() {
    let (base, server) = serve_once("200 OK", "{}").await;

    let account = Account::new(AccountType::Ldap, "erin").with_id("5");
    client(&base).update(&account).await.unwrap();
    let request = server.await.unwrap();
    let (line, body) = split_request(&request);

    assert_eq!(line, "PUT /accounts/5 HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["id"], "5");
    assert!(sent["password"].is_null());
}

#[tokio::test]
async fn update_ignores_non_json_body() {
    let (base, server) = serve_once("200 OK", "ok").await;

    let account = Account::new(AccountType::Local, "erin").with_id("5");
    client(&base).update(&account).await.unwrap();
    server.await.unwrap();
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let (base, server) = serve_once("204 No Content", "").await;

    client(&base).delete(&AccountId::new("5")).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(split_request(&request).0, "DELETE /accounts/5 HTTP/1.1");
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = client(&base).list().await.unwrap_err();
    server.await.unwrap();

    match err {
        Error::Status { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, r#"{"error":"boom"}"#);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let (base, server) = serve_once("200 OK", "not json").await;

    let err = client(&base).list().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base).list().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.status().is_none());
}
