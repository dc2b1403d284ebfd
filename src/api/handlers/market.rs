//! The consolidated watchlist view: every rated ticker enriched with
//! classification, volume statistics, trading currency and the two
//! membership flags.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::nan_to_null;
use crate::api::state::AppState;
use crate::db::models::enrichment::EnrichedRatingModel;
use crate::db::queries::enrichment::{self, MembershipSets};
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct EnrichedRatingResponse {
    /// The ticker, exposed as `id` for the frontend grid.
    pub id: String,
    pub description: String,
    pub technical_rating: String,
    pub oscillators_rating: String,
    pub moving_avg_rating: String,
    #[serde(serialize_with = "nan_to_null")]
    pub price: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub perf_weekly: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub perf_monthly: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub perf_3m: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub perf_ytd: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub perf_6m: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub vol_1w: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub vol_1m: Option<f64>,
    pub on_watchlist: bool,
    pub in_portfolio: bool,
    pub asset_class: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub objective: Option<String>,
    pub hedge_ccy: Option<String>,
    pub trading_currency: Option<String>,
    #[serde(serialize_with = "nan_to_null")]
    pub turnover_monthly: Option<f64>,
    pub num_trades_monthly: Option<i64>,
    #[serde(serialize_with = "nan_to_null")]
    pub volume_monthly: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub avg_trade_size_monthly: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub turnover_weekly: Option<f64>,
    pub num_trades_weekly: Option<i64>,
    #[serde(serialize_with = "nan_to_null")]
    pub avg_spread: Option<f64>,
    #[serde(serialize_with = "nan_to_null")]
    pub avg_trade_size_weekly: Option<f64>,
}

impl EnrichedRatingResponse {
    fn from_model(model: EnrichedRatingModel, memberships: &MembershipSets) -> Self {
        let on_watchlist = memberships.watchlist.contains(&model.ticker);
        let in_portfolio = memberships.portfolio.contains(&model.ticker);
        Self {
            id: model.ticker,
            description: model.description,
            technical_rating: model.technical_rating,
            oscillators_rating: model.oscillators_rating,
            moving_avg_rating: model.moving_avg_rating,
            price: model.price,
            perf_weekly: model.perf_weekly,
            perf_monthly: model.perf_monthly,
            perf_3m: model.perf_3m,
            perf_ytd: model.perf_ytd,
            perf_6m: model.perf_6m,
            vol_1w: model.vol_1w,
            vol_1m: model.vol_1m,
            on_watchlist,
            in_portfolio,
            asset_class: model.asset_class,
            country: model.country,
            region: model.region,
            sub_region: model.sub_region,
            objective: model.objective,
            hedge_ccy: model.hedge_ccy,
            trading_currency: model.trading_currency,
            turnover_monthly: model.turnover_monthly,
            num_trades_monthly: model.num_trades_monthly,
            volume_monthly: model.volume_monthly,
            avg_trade_size_monthly: model.avg_trade_size_monthly,
            turnover_weekly: model.turnover_weekly,
            num_trades_weekly: model.num_trades_weekly,
            avg_spread: model.avg_spread,
            avg_trade_size_weekly: model.avg_trade_size_weekly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_enriched_ratings(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<EnrichedRatingResponse>>, ApiError> {
    // Membership sets are computed once per request, not per row.
    let memberships = enrichment::load_membership_sets(&state.pool).await?;
    let rows = enrichment::fetch_enriched_ratings(&state.pool, page.limit, page.offset).await?;

    Ok(Json(
        rows.into_iter()
            .map(|model| EnrichedRatingResponse::from_model(model, &memberships))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(ticker: &str) -> EnrichedRatingModel {
        EnrichedRatingModel {
            ticker: ticker.to_string(),
            description: "desc".to_string(),
            technical_rating: "Buy".to_string(),
            oscillators_rating: "Neutral".to_string(),
            moving_avg_rating: "Buy".to_string(),
            price: Some(f64::NAN),
            perf_weekly: Some(1.0),
            perf_monthly: None,
            perf_3m: None,
            perf_ytd: None,
            perf_6m: None,
            vol_1w: None,
            vol_1m: None,
            asset_class: None,
            country: None,
            region: None,
            sub_region: None,
            objective: None,
            hedge_ccy: None,
            turnover_monthly: None,
            num_trades_monthly: None,
            volume_monthly: None,
            avg_trade_size_monthly: None,
            turnover_weekly: None,
            num_trades_weekly: None,
            avg_spread: None,
            avg_trade_size_weekly: None,
            trading_currency: None,
        }
    }

    #[test]
    fn membership_flags_come_from_the_precomputed_sets() {
        let mut memberships = MembershipSets::default();
        memberships.watchlist.insert("VWRL".to_string());
        memberships.portfolio.insert("VUSA".to_string());

        let watched = EnrichedRatingResponse::from_model(model("VWRL"), &memberships);
        assert!(watched.on_watchlist);
        assert!(!watched.in_portfolio);

        let held = EnrichedRatingResponse::from_model(model("VUSA"), &memberships);
        assert!(!held.on_watchlist);
        assert!(held.in_portfolio);
    }

    #[test]
    fn nan_price_serializes_as_null() {
        let response = EnrichedRatingResponse::from_model(model("VWRL"), &MembershipSets::default());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["price"].is_null());
        assert_eq!(json["perf_weekly"], 1.0);
        assert_eq!(json["id"], "VWRL");
    }
}
