use crate::assignments::error::{AssignmentsResult, GetSnafu, ListSnafu};
use crate::error::ErrorResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use core_history::{Assignment, AssignmentId, Difficulty, SourceTable};
use snafu::ResultExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(list_assignments, get_assignment),
    components(schemas(Assignment, Difficulty, SourceTable, ErrorResponse)),
    tags(
      (name = "assignments", description = "Practice assignments"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/assignments",
    operation_id = "getAssignments",
    tags = ["assignments"],
    responses(
        (status = 200, description = "Assignments ordered by difficulty then title", body = Vec<Assignment>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn list_assignments(
    State(state): State<AppState>,
) -> AssignmentsResult<Json<Vec<Assignment>>> {
    let assignments = state.assignments.get_assignments().await.context(ListSnafu)?;
    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    operation_id = "getAssignment",
    tags = ["assignments"],
    params(
        ("id" = uuid::Uuid, Path, description = "Assignment id"),
    ),
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 400, description = "Malformed assignment id", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<AssignmentId>,
) -> AssignmentsResult<Json<Assignment>> {
    let assignment = state.assignments.get_assignment(id).await.context(GetSnafu)?;
    Ok(Json(assignment))
}
