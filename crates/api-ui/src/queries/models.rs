use core_checker::ResultSet;
use core_executor::SubmissionOutcome;
use core_history::AssignmentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryExecutePayload {
    #[serde(default)]
    pub query: String,
    #[schema(value_type = Option<uuid::Uuid>)]
    pub assignment_id: Option<AssignmentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryExecuteResponse {
    pub data: ResultSet,
    pub is_successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_data: Option<ResultSet>,
}

impl From<SubmissionOutcome> for QueryExecuteResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            data: outcome.data,
            is_successful: outcome.is_successful,
            expected_data: outcome.expected_data,
        }
    }
}
