use crate::error::{IntoStatusCode, into_error_response};
use axum::response::IntoResponse;
use core_executor::{ExecutionError, GuardError};
use http::status::StatusCode;
use snafu::prelude::*;

pub type TablesResult<T> = Result<T, TablesAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TablesAPIError {
    #[snafu(display("{source}"))]
    TableName { source: GuardError },

    #[snafu(display("Failed to fetch table data: {source}"))]
    Preview { source: ExecutionError },
}

impl IntoStatusCode for TablesAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TableName { .. } => StatusCode::BAD_REQUEST,
            Self::Preview { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TablesAPIError {
    fn into_response(self) -> axum::response::Response {
        into_error_response(&self)
    }
}
