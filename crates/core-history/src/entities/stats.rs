use crate::{AssignmentId, Difficulty};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Distinct solved assignments per difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct DifficultyStats {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub total: u32,
}

impl DifficultyStats {
    pub const fn record(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub stats: DifficultyStats,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub solved_ids: Vec<AssignmentId>,
}
