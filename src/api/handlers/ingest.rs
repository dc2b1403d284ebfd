//! Ingestion endpoints. Each one runs a pipeline job to completion and
//! answers with the standard envelope; failures surface through
//! `ApiError` with the feed's error taxonomy.

use axum::{extract::State, http::StatusCode, response::Response};
use chrono::Utc;
use std::sync::Arc;

use crate::api::response::json_response;
use crate::api::state::AppState;
use crate::error::ApiError;
use crate::ingest::ratings::{self, RatingsIngestOutcome};
use crate::ingest::{instruments, volumes};

pub async fn update_instruments(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let today = Utc::now().date_naive();
    let summary = instruments::ingest_instruments(&state.pool, &state.fetcher, today).await?;
    Ok(json_response(
        format!(
            "Instrument file uploaded. {} duplicates removed.",
            summary.duplicates_removed
        ),
        "success",
        StatusCode::OK,
    ))
}

pub async fn update_monthly_volumes(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let today = Utc::now().date_naive();
    let summary = volumes::ingest_monthly(&state.pool, &state.fetcher, today).await?;
    Ok(json_response(
        format!(
            "File for {} uploaded. {} duplicates removed.",
            summary.period_label, summary.duplicates_removed
        ),
        "success",
        StatusCode::OK,
    ))
}

pub async fn update_weekly_volumes(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let today = Utc::now().date_naive();
    let summary = volumes::ingest_weekly(&state.pool, &state.fetcher, today).await?;
    Ok(json_response(
        format!("File for {} uploaded successfully.", summary.period_label),
        "success",
        StatusCode::OK,
    ))
}

pub async fn fetch_tradingview(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    match ratings::ingest_ratings(&state.pool, &state.storage).await? {
        RatingsIngestOutcome::Updated { .. } => Ok(json_response(
            "TradingView Updated",
            "success",
            StatusCode::OK,
        )),
        RatingsIngestOutcome::NothingNew => Ok(json_response(
            "New TradingView csv not found.",
            "success",
            StatusCode::NO_CONTENT,
        )),
    }
}

pub async fn download_no_metadata(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let ticker_count =
        ratings::export_missing_classification(&state.pool, &state.storage).await?;
    Ok(json_response(
        format!(
            "CSV file with {ticker_count} tickers has been uploaded to '{}'",
            state.storage.base_url()
        ),
        "success",
        StatusCode::OK,
    ))
}
