use sqlx::PgPool;
use std::collections::HashSet;

/// Add a ticker; returns false when it was already present.
pub async fn add_ticker(pool: &PgPool, ticker: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("INSERT INTO watchlist (ticker) VALUES ($1) ON CONFLICT (ticker) DO NOTHING")
            .bind(ticker)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a ticker; returns false when it was not on the list.
pub async fn remove_ticker(pool: &PgPool, ticker: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM watchlist WHERE ticker = $1")
        .bind(ticker)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn tickers(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT ticker FROM watchlist")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(ticker,)| ticker).collect())
}
