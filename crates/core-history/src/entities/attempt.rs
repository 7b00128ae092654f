use crate::AssignmentId;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use core_utils::iterable::IterableEntity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub type AttemptId = Uuid;

/// One logged submission of a query against an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    #[schema(value_type = Uuid)]
    pub id: AttemptId,
    #[schema(value_type = Uuid)]
    pub assignment_id: AssignmentId,
    pub user_id: Option<String>,
    pub query: String,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    #[must_use]
    pub fn new(
        assignment_id: AssignmentId,
        user_id: Option<String>,
        query: String,
        is_successful: bool,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            assignment_id,
            user_id,
            query,
            is_successful,
            error_message,
            created_at: Utc::now(),
        }
    }

    /// Key prefix of every attempt made by `user_id`.
    #[must_use]
    pub fn user_prefix(user_id: Option<&str>) -> String {
        let user = user_id.map_or_else(
            || "-".to_string(),
            |user| user.bytes().map(|b| format!("{b:02x}")).collect(),
        );
        format!("/ua/{user}/")
    }

    /// Key prefix of every attempt made by `user_id` on one assignment.
    #[must_use]
    pub fn assignment_prefix(user_id: Option<&str>, assignment_id: AssignmentId) -> String {
        format!("{}{assignment_id}/", Self::user_prefix(user_id))
    }

    // Ids are time ordered, inverting them makes a prefix scan yield newest first
    #[must_use]
    pub fn get_key(user_id: Option<&str>, assignment_id: AssignmentId, id: AttemptId) -> Bytes {
        Bytes::from(format!(
            "{}{:032x}",
            Self::assignment_prefix(user_id, assignment_id),
            !id.as_u128()
        ))
    }
}

impl IterableEntity for Attempt {
    type Cursor = AttemptId;

    fn cursor(&self) -> Self::Cursor {
        self.id
    }

    fn key(&self) -> Bytes {
        Self::get_key(self.user_id.as_deref(), self.assignment_id, self.id)
    }
}
