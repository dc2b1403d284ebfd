use sqlx::PgPool;
use std::collections::HashSet;

use crate::db::models::enrichment::{CurrentInvestmentModel, EnrichedRatingModel};

/// Precomputed membership sets attached once per enrichment request,
/// instead of a per-row lookup against the watchlist and positions
/// tables.
#[derive(Debug, Default)]
pub struct MembershipSets {
    pub watchlist: HashSet<String>,
    pub portfolio: HashSet<String>,
}

pub async fn load_membership_sets(pool: &PgPool) -> Result<MembershipSets, sqlx::Error> {
    Ok(MembershipSets {
        watchlist: super::watchlist::tickers(pool).await?,
        portfolio: super::portfolio::position_tickers(pool).await?,
    })
}

/// One row per ratings ticker, left-correlated against classification,
/// the latest volume snapshots, and a trading currency that prefers the
/// ETP table and falls back to equities. Deterministic ordering by
/// asset class, region, country, objective.
pub async fn fetch_enriched_ratings(
    pool: &PgPool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<EnrichedRatingModel>, sqlx::Error> {
    sqlx::query_as::<_, EnrichedRatingModel>(
        r#"
        SELECT
            r.ticker,
            r.description,
            r.technical_rating,
            r.oscillators_rating,
            r.moving_avg_rating,
            r.price,
            r.perf_weekly,
            r.perf_monthly,
            r.perf_3m,
            r.perf_ytd,
            r.perf_6m,
            r.vol_1w,
            r.vol_1m,
            mm.asset_class,
            mm.country,
            mm.region,
            mm.sub_region,
            mm.objective,
            mm.hedge_ccy,
            mv.gbp_turnover     AS turnover_monthly,
            mv.number_of_trades AS num_trades_monthly,
            mv.volume           AS volume_monthly,
            mv.avg_trade_size   AS avg_trade_size_monthly,
            wv.gbp_turnover     AS turnover_weekly,
            wv.number_of_trades AS num_trades_weekly,
            wv.avg_spread,
            wv.avg_trade_size   AS avg_trade_size_weekly,
            COALESCE(e.trading_currency, q.trading_currency) AS trading_currency
        FROM ratings r
        LEFT JOIN manual_meta mm     ON mm.ticker = r.ticker
        LEFT JOIN monthly_volumes mv ON mv.ticker = r.ticker
        LEFT JOIN weekly_volumes wv  ON wv.ticker = r.ticker
        LEFT JOIN etps e             ON e.ticker = r.ticker
        LEFT JOIN equities q         ON q.ticker = r.ticker
        ORDER BY mm.asset_class ASC, mm.region ASC, mm.country ASC, mm.objective ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset.unwrap_or(0))
    .fetch_all(pool)
    .await
}

/// Open positions annotated for display: trading currency (ETP first,
/// equity fallback), latest rating price, GBP value via the currency
/// multiplier, percentage change against the average entry price, and
/// the technical rating string.
pub async fn fetch_current_investments(
    pool: &PgPool,
) -> Result<Vec<CurrentInvestmentModel>, sqlx::Error> {
    sqlx::query_as::<_, CurrentInvestmentModel>(
        r#"
        SELECT
            p.id,
            p.ticker,
            p.book,
            p.qty,
            p.avg_px,
            COALESCE(e.trading_currency, q.trading_currency) AS trading_currency,
            ROUND(r.price::numeric, 2)::float8 AS price,
            ROUND((p.qty * r.price * c.gbp_value)::numeric)::float8 AS calculated_gbp_value,
            ROUND(((r.price / NULLIF(p.avg_px, 0) - 1) * 100)::numeric, 1)::float8 AS pct_chg,
            r.technical_rating
        FROM positions p
        LEFT JOIN etps e     ON e.ticker = p.ticker
        LEFT JOIN equities q ON q.ticker = p.ticker
        LEFT JOIN ratings r  ON r.ticker = p.ticker
        LEFT JOIN currencies c
            ON c.name = COALESCE(e.trading_currency, q.trading_currency)
        WHERE p.qty > 0
        ORDER BY p.ticker, p.book
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Tickers rated and traded this month but missing analyst
/// classification; exported as CSV for the analyst to fill in.
pub async fn missing_classification(pool: &PgPool) -> Result<Vec<(String, String)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT r.ticker, r.description
        FROM ratings r
        WHERE r.ticker NOT IN (SELECT ticker FROM manual_meta)
          AND r.ticker IN (SELECT ticker FROM monthly_volumes)
        ORDER BY r.ticker
        "#,
    )
    .fetch_all(pool)
    .await
}
