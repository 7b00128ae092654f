use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub(crate) trait IntoStatusCode {
    fn status_code(&self) -> StatusCode;
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub(crate) fn response(code: StatusCode, message: String) -> Response {
        let error = Self {
            message,
            status_code: code.as_u16(),
        };
        (code, Json(error)).into_response()
    }
}

/// Renders any endpoint error as `ErrorResponse` json with its chosen status code.
pub(crate) fn into_error_response<E: IntoStatusCode + Display>(error: &E) -> Response {
    ErrorResponse::response(error.status_code(), error.to_string())
}
