use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashSet;

use crate::db::models::ratings::NewRatingModel;

/// Which of the incoming tickers already have a ratings row; drives the
/// update-vs-insert partition of the upsert.
pub async fn existing_tickers(
    tx: &mut Transaction<'_, Postgres>,
    tickers: &[String],
) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT ticker FROM ratings WHERE ticker = ANY($1)")
        .bind(tickers)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(|(ticker,)| ticker).collect())
}

pub async fn insert_rating(
    tx: &mut Transaction<'_, Postgres>,
    rating: &NewRatingModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO ratings (
            ticker, description, technical_rating, oscillators_rating,
            moving_avg_rating, price, perf_weekly, perf_monthly, perf_3m,
            perf_ytd, perf_6m, vol_1w, vol_1m
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (ticker) DO NOTHING
        "#,
    )
    .bind(&rating.ticker)
    .bind(&rating.description)
    .bind(&rating.technical_rating)
    .bind(&rating.oscillators_rating)
    .bind(&rating.moving_avg_rating)
    .bind(rating.price)
    .bind(rating.perf_weekly)
    .bind(rating.perf_monthly)
    .bind(rating.perf_3m)
    .bind(rating.perf_ytd)
    .bind(rating.perf_6m)
    .bind(rating.vol_1w)
    .bind(rating.vol_1m)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Field-by-field update of an existing row. The ticker is the
/// immutable key and is never update-eligible.
pub async fn update_rating(
    tx: &mut Transaction<'_, Postgres>,
    rating: &NewRatingModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE ratings SET
            description = $2,
            technical_rating = $3,
            oscillators_rating = $4,
            moving_avg_rating = $5,
            price = $6,
            perf_weekly = $7,
            perf_monthly = $8,
            perf_3m = $9,
            perf_ytd = $10,
            perf_6m = $11,
            vol_1w = $12,
            vol_1m = $13,
            last_updated = NOW()
        WHERE ticker = $1
        "#,
    )
    .bind(&rating.ticker)
    .bind(&rating.description)
    .bind(&rating.technical_rating)
    .bind(&rating.oscillators_rating)
    .bind(&rating.moving_avg_rating)
    .bind(rating.price)
    .bind(rating.perf_weekly)
    .bind(rating.perf_monthly)
    .bind(rating.perf_3m)
    .bind(rating.perf_ytd)
    .bind(rating.perf_6m)
    .bind(rating.vol_1w)
    .bind(rating.vol_1m)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Used by the watchlist create path to validate incoming tickers.
pub async fn rating_exists(pool: &PgPool, ticker: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ratings WHERE ticker = $1)")
        .bind(ticker)
        .fetch_one(pool)
        .await
}
