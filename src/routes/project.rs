use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{not_found, AppError, AppState};
use crate::extractors::fetch_project;
use crate::utils::errors::is_upstream_not_found;

pub async fn project(
    State(state): State<AppState>,
    Path(project_id): Path<u32>,
) -> Result<Response, AppError> {
    match fetch_project(&state.client, project_id).await {
        Ok(detail) => Ok(Json(detail).into_response()),
        Err(err) if is_upstream_not_found(&err) => Ok(not_found("Project not found")),
        Err(err) => Err(err.into()),
    }
}
