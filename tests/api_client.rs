//! ApiClient against a one-shot local HTTP server

use std::time::Duration;

use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use nextcheck::api::ApiClient;
use nextcheck::models::IncomeId;
use nextcheck::storage::{ExpenseStore, IncomeStore};

/// Request line, headers and body as received
struct Captured {
    head: String,
    body: String,
}

/// Serve a single request with a canned response and hand back what was sent
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: request_body,
        }
    });

    (base_url, handle)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, IncomeId::new(7), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_income() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"id":7,"amount":2150.5,"recent_pay":"2024-06-01","last_pay":"2024-05-18"}"#,
    )
    .await;

    let record = client(&url).get_income().await.unwrap();
    assert_eq!(record.id, IncomeId::new(7));
    assert_eq!(record.amount.cents(), 215050);
    assert_eq!(record.recent_pay.as_deref(), Some("2024-06-01"));

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("GET /income/7 "));
}

#[tokio::test]
async fn test_get_income_missing_is_not_found() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"no such income"}"#).await;

    let err = client(&url).get_income().await.unwrap_err();
    assert!(err.is_not_found());
    server.await.unwrap();
}

#[tokio::test]
async fn test_update_recent_pay_sends_date() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"id":7,"amount":2150.0,"recent_pay":"2024-06-15","last_pay":"2024-06-01"}"#,
    )
    .await;

    let new_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let record = client(&url)
        .update_recent_pay(IncomeId::new(7), new_date)
        .await
        .unwrap();
    assert_eq!(record.recent_pay.as_deref(), Some("2024-06-15"));

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("PUT /income/7 "));
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body, serde_json::json!({ "recent_pay": "2024-06-15" }));
}

#[tokio::test]
async fn test_update_recent_pay_rejected() {
    let (url, server) = serve_once("500 Internal Server Error", "").await;

    let new_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let err = client(&url)
        .update_recent_pay(IncomeId::new(7), new_date)
        .await
        .unwrap_err();

    assert!(err.is_update_failed());
    assert!(err.to_string().contains("500"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_list_expenses() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"name":"Internet","amount":60.0,"due_date":10},{"id":2,"name":"Gift","amount":40.0,"due_date":null},{"id":3,"name":"Water","amount":25.0,"due_date":12}]"#,
    )
    .await;

    let expenses = client(&url).list_expenses().await.unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[0].name, "Internet");
    assert!(expenses[1].due_day.is_none());
    assert_eq!(expenses[2].due_day.map(|d| d.get()), Some(12));

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("GET /expenses "));
}
