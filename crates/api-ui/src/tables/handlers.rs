use crate::error::ErrorResponse;
use crate::state::AppState;
use crate::tables::error::{PreviewSnafu, TableNameSnafu, TablesResult};
use crate::tables::models::TablePreviewResponse;
use axum::{
    Json,
    extract::{Path, State},
};
use core_executor::TableName;
use snafu::ResultExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_table_data),
    components(schemas(TablePreviewResponse, ErrorResponse)),
    tags(
      (name = "tables", description = "Sandbox table previews"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/tables/{tableName}",
    operation_id = "getTableData",
    tags = ["tables"],
    params(
        ("tableName" = String, Path, description = "Sandbox table name"),
    ),
    responses(
        (status = 200, description = "First rows of the table", body = TablePreviewResponse),
        (status = 400, description = "Invalid table name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_table_data(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> TablesResult<Json<TablePreviewResponse>> {
    let table = TableName::parse(&table_name).context(TableNameSnafu)?;
    let data = state
        .executor
        .preview_table(&table, state.preview_row_limit)
        .await
        .context(PreviewSnafu)?;
    Ok(Json(TablePreviewResponse {
        table: table_name,
        data,
    }))
}
