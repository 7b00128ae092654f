use crate::error::{IntoStatusCode, into_error_response};
use axum::response::IntoResponse;
use core_history::errors::HistoryStoreError;
use http::status::StatusCode;
use snafu::prelude::*;

pub type AttemptsResult<T> = Result<T, AttemptsAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AttemptsAPIError {
    #[snafu(display("Failed to fetch attempts: {source}"))]
    List { source: HistoryStoreError },

    #[snafu(display("Failed to fetch stats: {source}"))]
    Stats { source: HistoryStoreError },
}

impl IntoStatusCode for AttemptsAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::List { .. } | Self::Stats { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AttemptsAPIError {
    fn into_response(self) -> axum::response::Response {
        into_error_response(&self)
    }
}
