use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Deserialize;

use super::AppState;
use crate::api::forum::ForumClient;

// Hop-by-hop or recomputed by the server when the body is re-sent.
const DROPPED_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

#[derive(Debug, Deserialize)]
pub struct CorsParams {
    url: String,
}

/// Fetches any URL for a browser client and answers with permissive CORS headers.
pub async fn cors_bypass(
    State(state): State<AppState>,
    Query(params): Query<CorsParams>,
) -> Response {
    match forward(&state.client, &params.url).await {
        Ok(response) => response,
        Err(err) => {
            error!("Pass-through fetch of {} failed: {:#}", params.url, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(HeaderMap::new()),
                format!("{:#}", err),
            )
                .into_response()
        }
    }
}

async fn forward(client: &ForumClient, url: &str) -> Result<Response> {
    let upstream = client.fetch_raw(url).await?;
    let status = upstream.status();

    let mut headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if !is_dropped(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    let body = upstream
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    Ok((status, cors_headers(headers), body).into_response())
}

fn is_dropped(name: &HeaderName) -> bool {
    DROPPED_HEADERS.contains(&name.as_str()) || name.as_str().starts_with("access-control-")
}

fn cors_headers(mut headers: HeaderMap) -> HeaderMap {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers
}
