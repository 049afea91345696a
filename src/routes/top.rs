use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{AppError, AppState};
use crate::extractors::fetch_top_boards;
use crate::extractors::top_boards::DEFAULT_MAX;
use crate::models::BoardSummary;

#[derive(Debug, Deserialize)]
pub struct TopParams {
    max: Option<usize>,
}

pub async fn top_boards(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<BoardSummary>>, AppError> {
    let max = params.max.unwrap_or(DEFAULT_MAX);
    let boards = fetch_top_boards(&state.client, max).await?;
    Ok(Json(boards))
}
