//! HTTP surface. The router is built once at startup and owns the one
//! [`ForumClient`] every request shares.

mod cors;
mod files;
mod project;
mod search;
mod top;

use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use serde_json::json;

use crate::api::forum::ForumClient;

#[derive(Clone)]
pub struct AppState {
    pub client: ForumClient,
}

pub fn router(client: ForumClient) -> Router {
    let state = AppState { client };

    Router::new()
        .route("/", get(root))
        .route("/project/search", get(search::search))
        .route("/project/top", get(top::top_boards))
        .route("/project/:project_id", get(project::project))
        .route("/project/:project_id/", get(project::project))
        .route("/project/:project_id/files", get(files::files))
        .route("/project/:project_id/files/", get(files::files))
        .route("/project/:project_id/files/:file_id", get(files::file))
        .route("/cors_bypass", get(cors::cors_bypass))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        "{} {} -> {} ({:?})",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

/// "Nothing here" answers keep a 200 status; only the body says so.
fn not_found(message: &str) -> Response {
    Json(json!({ "error": message })).into_response()
}

/// An upstream failure surfaced to the caller as a 500.
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("{:#}", self.0) })),
        )
            .into_response()
    }
}
