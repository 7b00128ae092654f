use crate::assignments::handlers::ApiDoc as AssignmentsApiDoc;
use crate::assignments::handlers::{get_assignment, list_assignments};
use crate::attempts::handlers::ApiDoc as AttemptsApiDoc;
use crate::attempts::handlers::{get_attempts, get_stats};
use crate::hints::handlers::{ApiDoc as HintsApiDoc, get_hint};
use crate::layers::add_request_metadata;
use crate::queries::handlers::{ApiDoc as QueriesApiDoc, execute_query};
use crate::state::AppState;
use crate::tables::handlers::{ApiDoc as TablesApiDoc, get_table_data};
use axum::Router;
use axum::routing::{get, post};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SQL Practice API",
        description = "Assignments, query checking, hints and attempt history.",
        version = "0.1.0",
    ),
    tags()
)]
pub struct ApiDoc;

#[must_use]
pub fn ui_open_api_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(AssignmentsApiDoc::openapi())
        .merge_from(TablesApiDoc::openapi())
        .merge_from(QueriesApiDoc::openapi())
        .merge_from(HintsApiDoc::openapi())
        .merge_from(AttemptsApiDoc::openapi())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(list_assignments))
        .route("/assignments/{id}", get(get_assignment))
        .route("/tables/{tableName}", get(get_table_data))
        .route("/query/execute", post(execute_query))
        .route("/hint", post(get_hint))
        // static segment wins over the capture below
        .route("/attempts/stats", get(get_stats))
        .route("/attempts/{assignmentId}", get(get_attempts))
        .layer(SetSensitiveHeadersLayer::new([
            axum::http::header::AUTHORIZATION,
        ]))
        .layer(axum::middleware::from_fn(add_request_metadata))
}
