use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use http::header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue};
use http::{HeaderValue, Method};
use std::str::FromStr;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy)]
pub struct RequestMetadata {
    pub request_id: Uuid,
}

/// Takes the caller's `x-request-id` when it is a valid uuid, otherwise
/// generates one, and echoes it on the response.
pub async fn add_request_metadata(
    headers: HeaderMap,
    mut request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id: Uuid = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|s| Uuid::from_str(s).ok())
        .unwrap_or_else(Uuid::now_v7);
    request
        .extensions_mut()
        .insert(RequestMetadata { request_id });
    tracing::debug!(%request_id, "request received");
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub fn make_cors_middleware(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin_value = origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin_value)
        .allow_methods(vec![Method::GET, Method::POST, Method::HEAD])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}
