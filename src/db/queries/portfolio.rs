use sqlx::PgPool;
use std::collections::HashSet;

use crate::db::models::portfolio::{BookModel, PositionModel};

// ===================== Books and currencies =====================

pub async fn upsert_book(pool: &PgPool, name: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO books (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn upsert_currency(pool: &PgPool, name: &str, gbp_value: f64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO currencies (name, gbp_value)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET gbp_value = EXCLUDED.gbp_value
        "#,
    )
    .bind(name)
    .bind(gbp_value)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_all_books(pool: &PgPool) -> Result<Vec<BookModel>, sqlx::Error> {
    sqlx::query_as::<_, BookModel>("SELECT name, last_updated FROM books ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn book_exists(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE name = $1)")
        .bind(name)
        .fetch_one(pool)
        .await
}

// ===================== Positions =====================

pub async fn get_position(
    pool: &PgPool,
    ticker: &str,
    book: &str,
) -> Result<Option<PositionModel>, sqlx::Error> {
    sqlx::query_as::<_, PositionModel>("SELECT * FROM positions WHERE ticker = $1 AND book = $2")
        .bind(ticker)
        .bind(book)
        .fetch_optional(pool)
        .await
}

pub async fn insert_position(
    pool: &PgPool,
    ticker: &str,
    book: &str,
    qty: i64,
    avg_px: f64,
    current_px: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO positions (ticker, book, qty, avg_px, current_px)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(ticker)
    .bind(book)
    .bind(qty)
    .bind(avg_px)
    .bind(current_px)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_position(
    pool: &PgPool,
    id: i32,
    qty: i64,
    avg_px: f64,
    current_px: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE positions
        SET qty = $2, avg_px = $3, current_px = $4, last_updated = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(qty)
    .bind(avg_px)
    .bind(current_px)
    .execute(pool)
    .await?;
    Ok(())
}

/// Every ticker with a position row, for the in_portfolio membership flag.
pub async fn position_tickers(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT ticker FROM positions")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(ticker,)| ticker).collect())
}
