use crate::auth::Identity;
use crate::error::ErrorResponse;
use crate::queries::error::{QueriesResult, SubmitSnafu};
use crate::queries::models::{QueryExecutePayload, QueryExecuteResponse};
use crate::state::AppState;
use axum::{Json, extract::State};
use core_checker::{ResultSet, Row};
use core_executor::Submission;
use snafu::ResultExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(execute_query),
    components(schemas(QueryExecutePayload, QueryExecuteResponse, ResultSet, Row, ErrorResponse)),
    tags(
      (name = "queries", description = "Query execution and checking"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/query/execute",
    operation_id = "executeQuery",
    tags = ["queries"],
    request_body(
        content(
            (
                QueryExecutePayload = "application/json",
                examples (
                    ("free query" = (
                        value = json!(QueryExecutePayload {
                            query: "SELECT * FROM users".to_string(),
                            assignment_id: None,
                        })
                    )),
                )
            ),
        )
    ),
    responses(
        (status = 200, description = "Query result, checked against the assignment when one is given", body = QueryExecuteResponse),
        (status = 400, description = "Rejected or failed query", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn execute_query(
    Identity(user_id): Identity,
    State(state): State<AppState>,
    Json(payload): Json<QueryExecutePayload>,
) -> QueriesResult<Json<QueryExecuteResponse>> {
    let outcome = state
        .submissions
        .submit(Submission {
            query: payload.query,
            assignment_id: payload.assignment_id,
            user_id,
        })
        .await
        .context(SubmitSnafu)?;
    Ok(Json(outcome.into()))
}
