use crate::error::{IntoStatusCode, into_error_response};
use axum::response::IntoResponse;
use core_executor::{ExecutionError, SubmissionError};
use http::status::StatusCode;
use snafu::prelude::*;

pub type QueriesResult<T> = Result<T, QueriesAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QueriesAPIError {
    // execution messages reach the learner unchanged
    #[snafu(display("{source}"))]
    Submit { source: SubmissionError },
}

pub(crate) const fn execution_status_code(error: &ExecutionError) -> StatusCode {
    match error {
        ExecutionError::Query { .. }
        | ExecutionError::Timeout { .. }
        | ExecutionError::UnsupportedType { .. }
        | ExecutionError::DuplicateColumn { .. } => StatusCode::BAD_REQUEST,
        ExecutionError::Decode { .. } | ExecutionError::Connection { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoStatusCode for QueriesAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Submit { source } => match source {
                SubmissionError::Validation { .. } => StatusCode::BAD_REQUEST,
                SubmissionError::Execution { source } => execution_status_code(source),
                SubmissionError::AssignmentNotFound { .. } => StatusCode::NOT_FOUND,
                SubmissionError::AssignmentStore { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for QueriesAPIError {
    fn into_response(self) -> axum::response::Response {
        into_error_response(&self)
    }
}
