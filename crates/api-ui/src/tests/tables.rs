#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::tables::models::TablePreviewResponse;
use crate::tests::common::http_req;
use crate::tests::server::{FakeExecutor, run_test_server, users};
use http::{Method, StatusCode};

#[tokio::test]
async fn test_ui_table_preview() {
    let server =
        run_test_server(FakeExecutor::default().with_table("users", users(&[(1, "ann")]))).await;

    let preview = http_req::<TablePreviewResponse>(
        &reqwest::Client::new(),
        Method::GET,
        &server.url("/tables/users"),
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(preview.table, "users");
    assert_eq!(preview.data, users(&[(1, "ann")]));
    assert_eq!(
        *server.executor.previews.lock().unwrap(),
        vec![("users".to_string(), 100)]
    );
}

#[tokio::test]
async fn test_ui_table_preview_flattens_result_set() {
    let server =
        run_test_server(FakeExecutor::default().with_table("users", users(&[(1, "ann")]))).await;

    let body = http_req::<serde_json::Value>(
        &reqwest::Client::new(),
        Method::GET,
        &server.url("/tables/users"),
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(body["table"], "users");
    assert_eq!(body["fields"], serde_json::json!(["id", "name"]));
    assert_eq!(body["rows"][0]["name"], "ann");
}

#[tokio::test]
async fn test_ui_table_preview_rejects_bad_names() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();

    for name in ["users%3BDROP", "users%20x", "public.users"] {
        let err = http_req::<TablePreviewResponse>(
            &client,
            Method::GET,
            &server.url(&format!("/tables/{name}")),
            String::new(),
        )
        .await
        .expect_err("Invalid table name should fail");
        assert_eq!(err.status, StatusCode::BAD_REQUEST, "{name}");
    }
    assert!(server.executor.previews.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_ui_table_preview_missing_table() {
    let server = run_test_server(FakeExecutor::default()).await;

    let err = http_req::<TablePreviewResponse>(
        &reqwest::Client::new(),
        Method::GET,
        &server.url("/tables/missing"),
        String::new(),
    )
    .await
    .expect_err("Missing table should fail");
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.body.contains("Failed to fetch table data"));
}
