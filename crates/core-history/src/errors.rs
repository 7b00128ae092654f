use crate::AssignmentId;
use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum HistoryStoreError {
    #[snafu(display("Error adding assignment: {source}"))]
    AssignmentAdd { source: core_utils::Error },

    #[snafu(display("Error getting assignment: {source}"))]
    AssignmentGet { source: core_utils::Error },

    #[snafu(display("Error getting assignments: {source}"))]
    AssignmentsList { source: core_utils::Error },

    #[snafu(display("Assignment {id} not found"))]
    AssignmentNotFound { id: AssignmentId },

    #[snafu(display("Error adding attempt: {source}"))]
    AttemptAdd { source: core_utils::Error },

    #[snafu(display("Error getting attempts: {source}"))]
    AttemptsGet { source: core_utils::Error },

    #[snafu(display("Error getting user stats: {source}"))]
    StatsGet { source: core_utils::Error },
}
