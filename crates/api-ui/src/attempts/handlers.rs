use crate::attempts::error::{AttemptsResult, ListSnafu, StatsSnafu};
use crate::attempts::models::GetAttemptsQuery;
use crate::auth::AuthenticatedUser;
use crate::error::ErrorResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use core_history::{AssignmentId, Attempt, DifficultyStats, GetAttemptsParams, UserStats};
use snafu::ResultExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_stats, get_attempts),
    components(schemas(Attempt, UserStats, DifficultyStats, ErrorResponse)),
    tags(
      (name = "attempts", description = "Attempt history and progress"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/attempts/stats",
    operation_id = "getStats",
    tags = ["attempts"],
    responses(
        (status = 200, description = "Solved assignments by difficulty", body = UserStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_stats(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(state): State<AppState>,
) -> AttemptsResult<Json<UserStats>> {
    let stats = state
        .attempts
        .get_user_stats(&user_id)
        .await
        .context(StatsSnafu)?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/attempts/{assignmentId}",
    operation_id = "getAttempts",
    tags = ["attempts"],
    params(
        ("assignmentId" = uuid::Uuid, Path, description = "Assignment id"),
        GetAttemptsQuery,
    ),
    responses(
        (status = 200, description = "Caller's attempts, newest first", body = Vec<Attempt>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_attempts(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<AssignmentId>,
    Query(query): Query<GetAttemptsQuery>,
) -> AttemptsResult<Json<Vec<Attempt>>> {
    let mut params = GetAttemptsParams::new(assignment_id).with_user_id(user_id);
    if let Some(cursor) = query.cursor {
        params = params.with_cursor(cursor);
    }
    if let Some(limit) = query.limit {
        params = params.with_limit(limit);
    }
    let attempts = state
        .attempts
        .get_attempts(params)
        .await
        .context(ListSnafu)?;
    Ok(Json(attempts))
}
