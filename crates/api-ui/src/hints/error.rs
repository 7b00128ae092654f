use crate::error::{IntoStatusCode, into_error_response};
use axum::response::IntoResponse;
use http::status::StatusCode;
use snafu::prelude::*;

pub type HintsResult<T> = Result<T, HintsAPIError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum HintsAPIError {
    #[snafu(display("Question context missing"))]
    MissingQuestion,
}

impl IntoStatusCode for HintsAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingQuestion => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for HintsAPIError {
    fn into_response(self) -> axum::response::Response {
        into_error_response(&self)
    }
}
