use super::error::{AuthError, AuthResult, BadAuthTokenSnafu};
use super::models::get_claims_validate_jwt_token;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;
use snafu::ResultExt;
use std::convert::Infallible;

fn get_authorization_token(headers: &HeaderMap) -> AuthResult<&str> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::NoAuthHeader)?;
    auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::BadAuthHeader)
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> AuthResult<String> {
    if !state.auth_config.is_enabled() {
        return Err(AuthError::NoJwtSecret);
    }
    let access_token = get_authorization_token(headers)?;
    let token = get_claims_validate_jwt_token(
        access_token,
        &state.config.host,
        state.auth_config.jwt_secret(),
    )
    .context(BadAuthTokenSnafu)?;
    Ok(token.claims.sub)
}

/// Caller identity when a valid bearer token is present; anonymous otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub Option<String>);

impl FromRequestParts<AppState> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(&parts.headers, state) {
            Ok(user_id) => Ok(Self(Some(user_id))),
            Err(AuthError::NoAuthHeader) => Ok(Self(None)),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring credentials, continuing anonymously");
                Ok(Self(None))
            }
        }
    }
}

/// Caller identity for endpoints that require a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, state).map(Self)
    }
}
