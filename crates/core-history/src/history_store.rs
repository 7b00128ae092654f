use crate::errors::{self as errors, HistoryStoreError};
use crate::{
    Assignment, AssignmentId, Attempt, AttemptId, DifficultyStats, SlateDBHistoryStore, UserStats,
};
use async_trait::async_trait;
use bytes::Bytes;
use core_utils::iterable::prefix_range;
use snafu::ResultExt;
use std::collections::BTreeSet;
use std::ops::Bound;

pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

#[derive(Debug, Clone)]
pub struct GetAttemptsParams {
    pub assignment_id: AssignmentId,
    pub user_id: Option<String>,
    pub cursor: Option<AttemptId>,
    pub limit: Option<u16>,
}

impl GetAttemptsParams {
    #[must_use]
    pub const fn new(assignment_id: AssignmentId) -> Self {
        Self {
            assignment_id,
            user_id: None,
            cursor: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub const fn with_cursor(mut self, cursor: AttemptId) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u16) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait AssignmentStore: std::fmt::Debug + Send + Sync {
    async fn add_assignment(&self, assignment: Assignment) -> HistoryStoreResult<Assignment>;
    async fn get_assignment(&self, id: AssignmentId) -> HistoryStoreResult<Assignment>;
    async fn get_assignments(&self) -> HistoryStoreResult<Vec<Assignment>>;
}

#[async_trait]
pub trait AttemptStore: std::fmt::Debug + Send + Sync {
    async fn add_attempt(&self, attempt: &Attempt) -> HistoryStoreResult<()>;
    async fn get_attempts(&self, params: GetAttemptsParams) -> HistoryStoreResult<Vec<Attempt>>;
    async fn get_user_stats(&self, user_id: &str) -> HistoryStoreResult<UserStats>;
}

#[async_trait]
impl AssignmentStore for SlateDBHistoryStore {
    #[tracing::instrument(level = "debug", skip_all, fields(id = %assignment.id), err)]
    async fn add_assignment(&self, assignment: Assignment) -> HistoryStoreResult<Assignment> {
        self.db
            .put_iterable_entity(&assignment)
            .await
            .context(errors::AssignmentAddSnafu)?;
        Ok(assignment)
    }

    async fn get_assignment(&self, id: AssignmentId) -> HistoryStoreResult<Assignment> {
        let key = format!("/as/{id}");
        let res: Option<Assignment> = self
            .db
            .get(&key)
            .await
            .context(errors::AssignmentGetSnafu)?;
        res.ok_or(HistoryStoreError::AssignmentNotFound { id })
    }

    async fn get_assignments(&self) -> HistoryStoreResult<Vec<Assignment>> {
        let mut assignments: Vec<Assignment> = self
            .db
            .items_from_range(prefix_range("/as/"), None)
            .await
            .context(errors::AssignmentsListSnafu)?;
        assignments.sort_by(|a, b| {
            a.difficulty
                .cmp(&b.difficulty)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(assignments)
    }
}

#[async_trait]
impl AttemptStore for SlateDBHistoryStore {
    #[tracing::instrument(level = "debug", skip_all, fields(assignment_id = %attempt.assignment_id), err)]
    async fn add_attempt(&self, attempt: &Attempt) -> HistoryStoreResult<()> {
        self.db
            .put_iterable_entity(attempt)
            .await
            .context(errors::AttemptAddSnafu)
    }

    async fn get_attempts(&self, params: GetAttemptsParams) -> HistoryStoreResult<Vec<Attempt>> {
        let GetAttemptsParams {
            assignment_id,
            user_id,
            cursor,
            limit,
        } = params;

        let prefix = Attempt::assignment_prefix(user_id.as_deref(), assignment_id);
        let start = cursor.map_or_else(
            || Bound::Included(Bytes::from(prefix.clone())),
            |cursor| Bound::Excluded(Attempt::get_key(user_id.as_deref(), assignment_id, cursor)),
        );
        let end = Bound::Excluded(Bytes::from(format!("{prefix}\x7F")));

        self.db
            .items_from_range((start, end), limit)
            .await
            .context(errors::AttemptsGetSnafu)
    }

    async fn get_user_stats(&self, user_id: &str) -> HistoryStoreResult<UserStats> {
        let attempts: Vec<Attempt> = self
            .db
            .items_from_range(prefix_range(&Attempt::user_prefix(Some(user_id))), None)
            .await
            .context(errors::StatsGetSnafu)?;

        let solved: BTreeSet<AssignmentId> = attempts
            .iter()
            .filter(|attempt| attempt.is_successful)
            .map(|attempt| attempt.assignment_id)
            .collect();

        let mut stats = DifficultyStats::default();
        let mut solved_ids = Vec::with_capacity(solved.len());
        for id in solved {
            match self.get_assignment(id).await {
                Ok(assignment) => {
                    stats.record(assignment.difficulty);
                    solved_ids.push(id);
                }
                Err(HistoryStoreError::AssignmentNotFound { .. }) => {
                    tracing::debug!(%id, "skipping solved attempt of a removed assignment");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(UserStats { stats, solved_ids })
    }
}
