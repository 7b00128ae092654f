use core_history::AttemptId;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetAttemptsQuery {
    /// Continue after this attempt id
    #[param(value_type = Option<uuid::Uuid>)]
    pub cursor: Option<AttemptId>,
    /// Maximum number of attempts to return
    pub limit: Option<u16>,
}
