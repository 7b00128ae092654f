use bytes::Bytes;
use chrono::{DateTime, Utc};
use core_utils::iterable::IterableEntity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub type AssignmentId = Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Sandbox table the assignment is written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

// Assignment is stored as is and also returned in http responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[schema(value_type = Uuid)]
    pub id: AssignmentId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub solution_query: String,
    #[serde(default)]
    pub source_tables: Vec<SourceTable>,
    #[serde(default)]
    pub expected_result_schema: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    #[must_use]
    pub fn get_key(id: AssignmentId) -> Bytes {
        Bytes::from(format!("/as/{id}"))
    }

    #[must_use]
    pub fn new(
        title: String,
        description: String,
        difficulty: Difficulty,
        solution_query: String,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            description,
            difficulty,
            solution_query,
            source_tables: vec![],
            expected_result_schema: vec![],
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: AssignmentId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_source_table(mut self, name: &str, columns: &[&str]) -> Self {
        self.source_tables.push(SourceTable {
            name: name.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_expected_result_schema(mut self, columns: &[&str]) -> Self {
        self.expected_result_schema = columns.iter().map(ToString::to_string).collect();
        self
    }
}

impl IterableEntity for Assignment {
    type Cursor = AssignmentId;

    fn cursor(&self) -> Self::Cursor {
        self.id
    }

    fn key(&self) -> Bytes {
        Self::get_key(self.id)
    }
}
