#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::auth::models::{Claims, create_jwt};
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};

#[derive(Debug)]
pub struct TestHttpError {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap<HeaderValue>,
    pub status: StatusCode,
    pub body: String,
    pub error: String,
}

/// As of minimalistic interface this doesn't support checking request headers
pub async fn http_req_with_headers<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    method: Method,
    headers: HeaderMap,
    url: &String,
    payload: String,
) -> Result<(HeaderMap, T), TestHttpError> {
    let response = client
        .request(method.clone(), url)
        .headers(headers)
        .body(payload)
        .send()
        .await
        .unwrap();
    let headers = response.headers().clone();
    let status = response.status();
    let text = response.text().await.expect("Failed to get response text");
    if status == StatusCode::OK {
        serde_json::from_str::<T>(&text)
            .map(|json| (headers.clone(), json))
            .map_err(|err| TestHttpError {
                method,
                url: url.clone(),
                headers,
                status,
                body: text,
                error: err.to_string(),
            })
    } else {
        // Return custom error as reqwest error has no body contents
        Err(TestHttpError {
            method,
            url: url.clone(),
            headers,
            status,
            body: text,
            error: format!("http status {status}"),
        })
    }
}

pub async fn http_req<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    method: Method,
    url: &String,
    payload: String,
) -> Result<T, TestHttpError> {
    let (_, res) = http_req_with_headers(client, method, json_headers(None), url, payload).await?;
    Ok(res)
}

pub async fn http_req_as<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    method: Method,
    url: &String,
    token: &str,
    payload: String,
) -> Result<T, TestHttpError> {
    let (_, res) =
        http_req_with_headers(client, method, json_headers(Some(token)), url, payload).await?;
    Ok(res)
}

pub fn json_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::from_iter(vec![(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    )]);
    if let Some(token) = token {
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
    }
    headers
}

pub fn token_for(user_id: &str, audience: &str, secret: &str) -> String {
    create_jwt(
        &Claims::new(user_id, audience, chrono::Duration::minutes(10)),
        secret,
    )
    .unwrap()
}
