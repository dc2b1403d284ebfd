//! Manual trade entry and the portfolio read views.

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::response::nan_to_null;
use crate::api::state::AppState;
use crate::db::models::enrichment::CurrentInvestmentModel;
use crate::db::models::portfolio::BookModel;
use crate::db::queries::{enrichment, instruments, portfolio};
use crate::error::ApiError;
use crate::ledger::{self, PositionState, TradeError};

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub ticker: String,
    pub book: String,
    pub transaction_px: f64,
    pub qty: i64,
}

/// Apply one manual trade event to the (ticker, book) position
/// aggregate. The stored current price is display-only and is
/// overwritten with the transaction price on every trade.
pub async fn update_current_investment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TradeRequest>,
) -> Result<Response, ApiError> {
    if !instruments::etp_exists(&state.pool, &request.ticker).await? {
        return Err(ApiError::validation(format!(
            "Etp matching query does not exist: {}",
            request.ticker
        )));
    }
    if !portfolio::book_exists(&state.pool, &request.book).await? {
        return Err(ApiError::validation(format!(
            "Book matching query does not exist: {}",
            request.book
        )));
    }

    let existing = portfolio::get_position(&state.pool, &request.ticker, &request.book).await?;
    let prior = existing.as_ref().map(|p| PositionState {
        qty: p.qty,
        avg_px: p.avg_px,
    });

    let next = ledger::apply_trade(prior, request.qty, request.transaction_px).map_err(|e| {
        match e {
            TradeError::NoPosition => {
                ApiError::validation("Cannot sell a security you do not have a position in.")
            }
            TradeError::Oversell { current_qty } => ApiError::Validation {
                message: "Cannot sell more shares than you currently own.".to_string(),
                current_qty: Some(current_qty),
            },
        }
    })?;

    match &existing {
        Some(position) => {
            portfolio::update_position(
                &state.pool,
                position.id,
                next.qty,
                next.avg_px,
                request.transaction_px,
            )
            .await?
        }
        None => {
            portfolio::insert_position(
                &state.pool,
                &request.ticker,
                &request.book,
                next.qty,
                next.avg_px,
                request.transaction_px,
            )
            .await?
        }
    }

    info!(
        ticker = %request.ticker,
        book = %request.book,
        qty = request.qty,
        new_qty = next.qty,
        "Position updated"
    );

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Investment updated successfully" })),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct CurrentInvestmentResponse {
    pub id: i32,
    pub qty: i64,
    pub ticker: String,
    pub book: String,
    pub avg_px: f64,
    pub trading_currency: Option<String>,
    #[serde(serialize_with = "nan_to_null")]
    pub price: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub calculated_gbp_value: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub pct_chg: Option<f64>,
    pub technical_rating: Option<String>,
}

impl From<CurrentInvestmentModel> for CurrentInvestmentResponse {
    fn from(model: CurrentInvestmentModel) -> Self {
        Self {
            id: model.id,
            qty: model.qty,
            ticker: model.ticker,
            book: model.book,
            avg_px: model.avg_px,
            trading_currency: model.trading_currency,
            price: model.price,
            calculated_gbp_value: model.calculated_gbp_value,
            pct_chg: model.pct_chg,
            technical_rating: model.technical_rating,
        }
    }
}

pub async fn get_current_investments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CurrentInvestmentResponse>>, ApiError> {
    let rows = enrichment::fetch_current_investments(&state.pool).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookModel>>, ApiError> {
    let books = portfolio::get_all_books(&state.pool).await?;
    Ok(Json(books))
}
