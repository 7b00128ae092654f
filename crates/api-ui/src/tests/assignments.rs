#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::ErrorResponse;
use crate::tests::common::http_req;
use crate::tests::server::{FakeExecutor, run_test_server};
use core_history::{Assignment, AssignmentStore, Difficulty};
use http::{Method, StatusCode};
use uuid::Uuid;

#[tokio::test]
async fn test_ui_assignments_list_and_get() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();

    let hard = server
        .store
        .add_assignment(Assignment::new(
            "Top spenders".to_string(),
            "Customers ranked by total spend".to_string(),
            Difficulty::Hard,
            "SELECT customer_id, SUM(total) FROM orders GROUP BY customer_id".to_string(),
        ))
        .await
        .unwrap();
    let easy = server
        .store
        .add_assignment(
            Assignment::new(
                "All users".to_string(),
                "Select every user".to_string(),
                Difficulty::Easy,
                "SELECT * FROM users".to_string(),
            )
            .with_source_table("users", &["id", "name"]),
        )
        .await
        .unwrap();

    let items = http_req::<Vec<Assignment>>(
        &client,
        Method::GET,
        &server.url("/assignments"),
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(
        items.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![easy.id, hard.id]
    );

    let fetched = http_req::<Assignment>(
        &client,
        Method::GET,
        &server.url(&format!("/assignments/{}", easy.id)),
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(fetched, easy);
}

#[tokio::test]
async fn test_ui_assignment_not_found() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();

    let err = http_req::<Assignment>(
        &client,
        Method::GET,
        &server.url(&format!("/assignments/{}", Uuid::now_v7())),
        String::new(),
    )
    .await
    .expect_err("Unknown assignment should fail");
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    let body: ErrorResponse = serde_json::from_str(&err.body).unwrap();
    assert_eq!(body.status_code, 404);
}

#[tokio::test]
async fn test_ui_assignments_empty() {
    let server = run_test_server(FakeExecutor::default()).await;
    let items = http_req::<Vec<Assignment>>(
        &reqwest::Client::new(),
        Method::GET,
        &server.url("/assignments"),
        String::new(),
    )
    .await
    .unwrap();
    assert!(items.is_empty());
}
