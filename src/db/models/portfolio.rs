use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookModel {
    pub name: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PositionModel {
    pub id: i32,
    pub ticker: String,
    pub book: String,
    pub qty: i64,
    pub avg_px: f64,
    pub current_px: f64,
    pub last_updated: DateTime<Utc>,
}
