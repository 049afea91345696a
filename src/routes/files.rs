use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{not_found, AppError, AppState};
use crate::extractors::fetch_versions;
use crate::models::ProjectFiles;
use crate::utils::errors::is_upstream_not_found;

pub async fn files(
    State(state): State<AppState>,
    Path(project_id): Path<u32>,
) -> Result<Response, AppError> {
    let versions = match fetch_versions(&state.client, project_id, None).await {
        Ok(versions) => versions,
        Err(err) if is_upstream_not_found(&err) => return Ok(not_found("Files not found")),
        Err(err) => return Err(err.into()),
    };

    if versions.is_empty() {
        return Ok(not_found("Files not found"));
    }

    Ok(Json(ProjectFiles {
        project_id,
        versions,
    })
    .into_response())
}

pub async fn file(
    State(state): State<AppState>,
    Path((project_id, file_id)): Path<(u32, u32)>,
) -> Result<Response, AppError> {
    // Numeric so "087" and "87" name the same file.
    let file_id = file_id.to_string();
    let versions = match fetch_versions(&state.client, project_id, Some(&file_id)).await {
        Ok(versions) => versions,
        Err(err) if is_upstream_not_found(&err) => return Ok(not_found("File not found")),
        Err(err) => return Err(err.into()),
    };

    match versions.into_iter().next() {
        Some(version) => Ok(Json(version).into_response()),
        None => Ok(not_found("File not found")),
    }
}
