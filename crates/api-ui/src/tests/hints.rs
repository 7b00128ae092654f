#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::hints::models::{HintPayload, HintResponse};
use crate::tests::common::http_req;
use crate::tests::server::{FakeExecutor, run_test_server};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_ui_hint() {
    let server = run_test_server(FakeExecutor::default()).await;

    let response = http_req::<HintResponse>(
        &reqwest::Client::new(),
        Method::POST,
        &server.url("/hint"),
        json!(HintPayload {
            question: Some("Count orders".to_string()),
            query: Some("SELECT * FROM orders".to_string()),
        })
        .to_string(),
    )
    .await
    .unwrap();
    assert_eq!(response.hint, "hint for Count orders / SELECT * FROM orders");
}

#[tokio::test]
async fn test_ui_hint_without_query() {
    let server = run_test_server(FakeExecutor::default()).await;

    let response = http_req::<HintResponse>(
        &reqwest::Client::new(),
        Method::POST,
        &server.url("/hint"),
        json!({"question": "Count orders"}).to_string(),
    )
    .await
    .unwrap();
    assert_eq!(response.hint, "hint for Count orders / None");
}

#[tokio::test]
async fn test_ui_hint_requires_question() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();

    for payload in [json!({}), json!({"question": "  ", "query": "SELECT 1"})] {
        let err = http_req::<HintResponse>(
            &client,
            Method::POST,
            &server.url("/hint"),
            payload.to_string(),
        )
        .await
        .expect_err("Missing question should fail");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.body.contains("Question context missing"));
    }
}
