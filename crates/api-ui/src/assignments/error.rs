use crate::error::{IntoStatusCode, into_error_response};
use axum::response::IntoResponse;
use core_history::errors::HistoryStoreError;
use http::status::StatusCode;
use snafu::prelude::*;

pub type AssignmentsResult<T> = Result<T, AssignmentsAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AssignmentsAPIError {
    #[snafu(display("Failed to fetch assignments: {source}"))]
    List { source: HistoryStoreError },

    #[snafu(display("Failed to fetch assignment: {source}"))]
    Get { source: HistoryStoreError },
}

impl IntoStatusCode for AssignmentsAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Get {
                source: HistoryStoreError::AssignmentNotFound { .. },
            } => StatusCode::NOT_FOUND,
            Self::List { .. } | Self::Get { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssignmentsAPIError {
    fn into_response(self) -> axum::response::Response {
        into_error_response(&self)
    }
}
