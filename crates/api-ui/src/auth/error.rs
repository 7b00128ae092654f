use crate::error::ErrorResponse;
use axum::{Json, http, response::IntoResponse};
use http::HeaderValue;
use http::StatusCode;
use http::header;
use jsonwebtoken::errors::Error as JwtError;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum AuthError {
    #[snafu(display("No JWT secret set"))]
    NoJwtSecret,

    #[snafu(display("Bad authentication token. {source}"))]
    BadAuthToken { source: JwtError },

    #[snafu(display("Bad Authorization header"))]
    BadAuthHeader,

    #[snafu(display("No Authorization header"))]
    NoAuthHeader,

    #[snafu(display("JWT create error: {source}"))]
    CreateJwt { source: JwtError },
}

// Return WwwAuthenticate header along with Unauthorized status code
#[derive(Debug)]
pub struct WwwAuthenticate {
    pub error: String,
    pub kind: Option<String>,
}

impl TryFrom<&AuthError> for WwwAuthenticate {
    type Error = ();
    fn try_from(value: &AuthError) -> Result<Self, Self::Error> {
        let error = value.to_string();
        match value {
            AuthError::NoAuthHeader | AuthError::BadAuthHeader => Ok(Self { error, kind: None }),
            AuthError::BadAuthToken { source } => Ok(Self {
                error,
                kind: Some(source.to_string()),
            }),
            AuthError::NoJwtSecret | AuthError::CreateJwt { .. } => Err(()),
        }
    }
}

impl std::fmt::Display for WwwAuthenticate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let base = format!(r#"Bearer realm="api-auth", error="{}""#, self.error);
        match &self.kind {
            Some(kind) => write!(f, r#"{base}, kind="{kind}""#),
            None => write!(f, "{base}"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response<axum::body::Body> {
        let message = self.to_string();
        match WwwAuthenticate::try_from(&self) {
            Ok(www_value) => (
                StatusCode::UNAUTHORIZED,
                // rfc7235
                [(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_str(&www_value.to_string()).unwrap_or_else(|_| {
                        HeaderValue::from_static("Error adding www_authenticate header")
                    }),
                )],
                Json(ErrorResponse {
                    message,
                    status_code: StatusCode::UNAUTHORIZED.as_u16(),
                }),
            )
                .into_response(),
            Err(()) => ErrorResponse::response(StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;
