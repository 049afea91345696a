use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::{not_found, AppError, AppState};
use crate::extractors::search_projects;
use crate::models::GameId;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(rename = "gameId")]
    game_id: Option<u8>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    // An unknown game can't match any result.
    let game = match params.game_id.map(GameId::from_number) {
        Some(None) => return Ok(not_found("No results")),
        Some(game) => game,
        None => None,
    };

    let results = search_projects(&state.client, &params.search_term, game).await?;
    if results.is_empty() {
        return Ok(not_found("No results"));
    }

    Ok(Json(results).into_response())
}
