use sqlx::FromRow;

/// One denormalized row of the consolidated watchlist view: the ratings
/// snapshot left-correlated with classification, volume statistics and
/// trading currency. Membership flags are attached later from the
/// per-request membership sets.
#[derive(Debug, Clone, FromRow)]
pub struct EnrichedRatingModel {
    pub ticker: String,
    pub description: String,
    pub technical_rating: String,
    pub oscillators_rating: String,
    pub moving_avg_rating: String,
    pub price: Option<f64>,
    pub perf_weekly: Option<f64>,
    pub perf_monthly: Option<f64>,
    pub perf_3m: Option<f64>,
    pub perf_ytd: Option<f64>,
    pub perf_6m: Option<f64>,
    pub vol_1w: Option<f64>,
    pub vol_1m: Option<f64>,
    pub asset_class: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub objective: Option<String>,
    pub hedge_ccy: Option<String>,
    pub turnover_monthly: Option<f64>,
    pub num_trades_monthly: Option<i64>,
    pub volume_monthly: Option<f64>,
    pub avg_trade_size_monthly: Option<f64>,
    pub turnover_weekly: Option<f64>,
    pub num_trades_weekly: Option<i64>,
    pub avg_spread: Option<f64>,
    pub avg_trade_size_weekly: Option<f64>,
    pub trading_currency: Option<String>,
}

/// One open position annotated for display.
#[derive(Debug, Clone, FromRow)]
pub struct CurrentInvestmentModel {
    pub id: i32,
    pub ticker: String,
    pub book: String,
    pub qty: i64,
    pub avg_px: f64,
    pub trading_currency: Option<String>,
    pub price: Option<f64>,
    pub calculated_gbp_value: Option<f64>,
    pub pct_chg: Option<f64>,
    pub technical_rating: Option<String>,
}
