use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::api::state::AppState;
use crate::db::queries::{ratings, watchlist};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct WatchlistRequest {
    pub id: String,
}

/// Add a ticker to the watchlist after validating it against the
/// ratings table; watching an unrated instrument would produce a dead
/// row in the enriched view.
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WatchlistRequest>,
) -> Result<Response, ApiError> {
    debug!(ticker = %request.id, "Watchlist add requested");

    if !ratings::rating_exists(&state.pool, &request.id).await? {
        return Err(ApiError::validation(
            "Ticker does not exist in ratings table",
        ));
    }

    watchlist::add_ticker(&state.pool, &request.id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": request.id }))).into_response())
}

pub async fn delete_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if watchlist::remove_ticker(&state.pool, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Ticker {id} is not on the watchlist"
        )))
    }
}
