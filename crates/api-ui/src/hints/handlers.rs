use crate::error::ErrorResponse;
use crate::hints::error::{HintsResult, MissingQuestionSnafu};
use crate::hints::models::{HintPayload, HintResponse};
use crate::state::AppState;
use axum::{Json, extract::State};
use snafu::OptionExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_hint),
    components(schemas(HintPayload, HintResponse, ErrorResponse)),
    tags(
      (name = "hints", description = "Conceptual hints"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/hint",
    operation_id = "getHint",
    tags = ["hints"],
    request_body = HintPayload,
    responses(
        (status = 200, description = "Conceptual hint for the problem", body = HintResponse),
        (status = 400, description = "Question missing", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_hint(
    State(state): State<AppState>,
    Json(payload): Json<HintPayload>,
) -> HintsResult<Json<HintResponse>> {
    let question = payload
        .question
        .filter(|question| !question.trim().is_empty())
        .context(MissingQuestionSnafu)?;
    let hint = state
        .hints
        .generate_hint(&question, payload.query.as_deref())
        .await;
    Ok(Json(HintResponse { hint }))
}
