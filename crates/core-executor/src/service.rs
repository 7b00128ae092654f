use crate::error::ExecutionError;
use crate::executor::{QueryExecutor, ReferenceRun};
use crate::guard::{GuardError, ValidatedQuery};
use core_checker::{ResultSet, compare};
use core_history::errors::HistoryStoreError;
use core_history::{Assignment, AssignmentId, AssignmentStore, Attempt, AttemptStore};
use snafu::prelude::*;
use std::sync::Arc;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SubmissionError {
    #[snafu(display("{source}"))]
    Validation { source: GuardError },

    #[snafu(display("{source}"))]
    Execution { source: ExecutionError },

    #[snafu(display("Assignment {id} not found"))]
    AssignmentNotFound { id: AssignmentId },

    #[snafu(display("Error getting assignment: {source}"))]
    AssignmentStore { source: HistoryStoreError },
}

pub type SubmissionResult<T> = std::result::Result<T, SubmissionError>;

#[derive(Debug, Clone)]
pub struct Submission {
    pub query: String,
    pub assignment_id: Option<AssignmentId>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub data: ResultSet,
    pub is_successful: bool,
    pub expected_data: Option<ResultSet>,
}

/// Validates a submission, runs it next to the assignment's solution,
/// compares the two results and logs the attempt.
pub struct SubmissionService {
    executor: Arc<dyn QueryExecutor>,
    assignments: Arc<dyn AssignmentStore>,
    attempts: Arc<dyn AttemptStore>,
}

impl SubmissionService {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        assignments: Arc<dyn AssignmentStore>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        Self {
            executor,
            assignments,
            attempts,
        }
    }

    #[tracing::instrument(
        name = "SubmissionService::submit",
        level = "debug",
        skip(self),
        fields(assignment_id = ?submission.assignment_id),
        err
    )]
    pub async fn submit(&self, submission: Submission) -> SubmissionResult<SubmissionOutcome> {
        let Submission {
            query,
            assignment_id,
            user_id,
        } = submission;
        let query = ValidatedQuery::parse(&query).context(ValidationSnafu)?;

        let assignment = match assignment_id {
            Some(id) => Some(self.assignment(id).await?),
            None => None,
        };

        let run = match self
            .executor
            .run_submission(&query, assignment.as_ref().map(|a| a.solution_query.as_str()))
            .await
        {
            Ok(run) => run,
            Err(source) => {
                if let Some(assignment) = &assignment {
                    self.record_attempt(assignment, user_id, &query, false, Some(source.to_string()))
                        .await;
                }
                return Err(SubmissionError::Execution { source });
            }
        };

        let (is_successful, expected_data) = match (&assignment, run.reference) {
            (Some(assignment), Some(ReferenceRun::Completed(reference))) => {
                let outcome = compare(&run.student, &reference, &assignment.solution_query);
                (outcome.is_equivalent, Some(reference))
            }
            (Some(assignment), Some(ReferenceRun::Failed(error))) => {
                tracing::error!(
                    assignment_id = %assignment.id,
                    %error,
                    "Reference solution failed to execute"
                );
                (false, None)
            }
            _ => (false, None),
        };

        if let Some(assignment) = &assignment {
            self.record_attempt(assignment, user_id, &query, is_successful, None)
                .await;
        }

        Ok(SubmissionOutcome {
            data: run.student,
            is_successful,
            expected_data,
        })
    }

    async fn assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment> {
        match self.assignments.get_assignment(id).await {
            Ok(assignment) => Ok(assignment),
            Err(HistoryStoreError::AssignmentNotFound { id }) => AssignmentNotFoundSnafu { id }.fail(),
            Err(source) => Err(SubmissionError::AssignmentStore { source }),
        }
    }

    async fn record_attempt(
        &self,
        assignment: &Assignment,
        user_id: Option<String>,
        query: &ValidatedQuery,
        is_successful: bool,
        error_message: Option<String>,
    ) {
        let attempt = Attempt::new(
            assignment.id,
            user_id,
            query.to_string(),
            is_successful,
            error_message,
        );
        if let Err(err) = self.attempts.add_attempt(&attempt).await {
            tracing::error!(assignment_id = %assignment.id, error = %err, "Failed to record attempt");
        }
    }
}
