#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::tests::common::{http_req, http_req_as, http_req_with_headers, json_headers, token_for};
use crate::tests::server::{
    FakeExecutor, JWT_SECRET, TEST_HOST, run_test_server, run_test_server_with_auth, users,
};
use core_history::{Assignment, AssignmentStore, Attempt, AttemptStore, Difficulty, UserStats};
use http::{Method, StatusCode, header};
use serde_json::json;

fn assignment(title: &str, difficulty: Difficulty) -> Assignment {
    Assignment::new(
        title.to_string(),
        String::new(),
        difficulty,
        "SELECT * FROM users".to_string(),
    )
}

#[tokio::test]
async fn test_ui_attempts_require_token() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();

    let err = http_req::<UserStats>(
        &client,
        Method::GET,
        &server.url("/attempts/stats"),
        String::new(),
    )
    .await
    .expect_err("Stats without token should fail");
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        err.headers.get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer realm=\"api-auth\", error=\"No Authorization header\""
    );

    let err = http_req_as::<UserStats>(
        &client,
        Method::GET,
        &server.url("/attempts/stats"),
        &token_for("alice", TEST_HOST, "other-secret"),
        String::new(),
    )
    .await
    .expect_err("Stats with foreign token should fail");
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);

    let err = http_req_as::<UserStats>(
        &client,
        Method::GET,
        &server.url("/attempts/stats"),
        &token_for("alice", "example.com", JWT_SECRET),
        String::new(),
    )
    .await
    .expect_err("Stats with token for another host should fail");
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ui_attempts_auth_disabled() {
    let server = run_test_server_with_auth(FakeExecutor::default(), "").await;

    let err = http_req::<UserStats>(
        &reqwest::Client::new(),
        Method::GET,
        &server.url("/attempts/stats"),
        String::new(),
    )
    .await
    .expect_err("Stats without jwt secret should fail");
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_ui_attempts_and_stats() {
    let query = "SELECT * FROM users";
    let server = run_test_server(
        FakeExecutor::default().with_result(query, users(&[(1, "ann")])),
    )
    .await;
    let client = reqwest::Client::new();
    let easy = server
        .store
        .add_assignment(assignment("Users", Difficulty::Easy))
        .await
        .unwrap();
    let hard = server
        .store
        .add_assignment(assignment("Users again", Difficulty::Hard))
        .await
        .unwrap();
    let alice = token_for("alice", TEST_HOST, JWT_SECRET);
    let bob = token_for("bob", TEST_HOST, JWT_SECRET);

    // alice solves the easy one twice, bob solves the hard one
    for (token, id) in [(&alice, easy.id), (&alice, easy.id), (&bob, hard.id)] {
        let (_, body) = http_req_with_headers::<serde_json::Value>(
            &client,
            Method::POST,
            json_headers(Some(token)),
            &server.url("/query/execute"),
            json!({"query": query, "assignmentId": id}).to_string(),
        )
        .await
        .unwrap();
        assert_eq!(body["isSuccessful"], true);
    }

    let stats = http_req_as::<UserStats>(
        &client,
        Method::GET,
        &server.url("/attempts/stats"),
        &alice,
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(stats.stats.easy, 1);
    assert_eq!(stats.stats.hard, 0);
    assert_eq!(stats.stats.total, 1);
    assert_eq!(stats.solved_ids, vec![easy.id]);

    let attempts = http_req_as::<Vec<Attempt>>(
        &client,
        Method::GET,
        &server.url(&format!("/attempts/{}", easy.id)),
        &alice,
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].created_at >= attempts[1].created_at);
    assert!(
        attempts
            .iter()
            .all(|a| a.user_id.as_deref() == Some("alice"))
    );

    // bob sees none of alice's attempts
    let attempts = http_req_as::<Vec<Attempt>>(
        &client,
        Method::GET,
        &server.url(&format!("/attempts/{}", easy.id)),
        &bob,
        String::new(),
    )
    .await
    .unwrap();
    assert!(attempts.is_empty());
}

#[tokio::test]
async fn test_ui_attempts_paging() {
    let server = run_test_server(FakeExecutor::default()).await;
    let client = reqwest::Client::new();
    let target = server
        .store
        .add_assignment(assignment("Users", Difficulty::Medium))
        .await
        .unwrap();
    for i in 0..3 {
        server
            .store
            .add_attempt(&Attempt::new(
                target.id,
                Some("alice".to_string()),
                format!("SELECT {i}"),
                false,
                None,
            ))
            .await
            .unwrap();
    }
    let alice = token_for("alice", TEST_HOST, JWT_SECRET);

    let first = http_req_as::<Vec<Attempt>>(
        &client,
        Method::GET,
        &server.url(&format!("/attempts/{}?limit=2", target.id)),
        &alice,
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(
        first.iter().map(|a| a.query.as_str()).collect::<Vec<_>>(),
        vec!["SELECT 2", "SELECT 1"]
    );

    let rest = http_req_as::<Vec<Attempt>>(
        &client,
        Method::GET,
        &server.url(&format!("/attempts/{}?cursor={}", target.id, first[1].id)),
        &alice,
        String::new(),
    )
    .await
    .unwrap();
    assert_eq!(
        rest.iter().map(|a| a.query.as_str()).collect::<Vec<_>>(),
        vec!["SELECT 0"]
    );
}

#[tokio::test]
async fn test_ui_invalid_token_is_anonymous_on_execute() {
    let query = "SELECT * FROM users";
    let server = run_test_server(
        FakeExecutor::default().with_result(query, users(&[(1, "ann")])),
    )
    .await;
    let target = server
        .store
        .add_assignment(assignment("Users", Difficulty::Easy))
        .await
        .unwrap();

    let (headers, _) = http_req_with_headers::<serde_json::Value>(
        &reqwest::Client::new(),
        Method::POST,
        json_headers(Some("not-a-jwt")),
        &server.url("/query/execute"),
        json!({"query": query, "assignmentId": target.id}).to_string(),
    )
    .await
    .unwrap();
    assert!(headers.contains_key("x-request-id"));

    let stats = server.store.get_user_stats("alice").await.unwrap();
    assert_eq!(stats, UserStats::default());
    let anonymous = server
        .store
        .get_attempts(core_history::GetAttemptsParams::new(target.id))
        .await
        .unwrap();
    assert_eq!(anonymous.len(), 1);
}
