use core_checker::ResultSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TablePreviewResponse {
    pub table: String,
    #[serde(flatten)]
    pub data: ResultSet,
}
