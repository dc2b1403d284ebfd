//! Ratings feed ingestion. Unlike the exchange feeds this is an upsert:
//! watchlist and position rows reference these tickers, so existing
//! rows are updated in place and rows absent from the new CSV survive.

use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{info, instrument};

use crate::constants;
use crate::db::models::ratings::NewRatingModel;
use crate::db::queries::{enrichment, lock, ratings as queries};
use crate::error::IngestError;
use crate::sheets::csvfile;
use crate::storage::ObjectStore;

#[derive(Debug)]
pub enum RatingsIngestOutcome {
    Updated { inserted: usize, updated: usize },
    NothingNew,
}

#[instrument(skip(pool, storage))]
pub async fn ingest_ratings(
    pool: &PgPool,
    storage: &ObjectStore,
) -> Result<RatingsIngestOutcome, IngestError> {
    let bytes = storage.get(constants::RATINGS_OBJECT_KEY).await?;
    let table = csvfile::parse_ratings_csv(&bytes)?;
    if table.is_empty() {
        return Ok(RatingsIngestOutcome::NothingNew);
    }

    let models: Vec<NewRatingModel> = table.rows.iter().map(NewRatingModel::from_record).collect();
    let tickers: Vec<String> = models.iter().map(|m| m.ticker.clone()).collect();

    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_RATINGS).await?;

    let existing = queries::existing_tickers(&mut tx, &tickers).await?;
    let (new_rows, update_rows) = split_new_existing(models, &existing);

    for rating in &new_rows {
        queries::insert_rating(&mut tx, rating).await?;
    }
    for rating in &update_rows {
        queries::update_rating(&mut tx, rating).await?;
    }
    tx.commit().await?;

    info!(
        inserted = new_rows.len(),
        updated = update_rows.len(),
        "Ratings upsert complete"
    );

    Ok(RatingsIngestOutcome::Updated {
        inserted: new_rows.len(),
        updated: update_rows.len(),
    })
}

/// Partition incoming rows by whether their key is already present.
fn split_new_existing(
    models: Vec<NewRatingModel>,
    existing: &HashSet<String>,
) -> (Vec<NewRatingModel>, Vec<NewRatingModel>) {
    models
        .into_iter()
        .partition(|m| !existing.contains(&m.ticker))
}

/// Export tickers that are rated and traded this month but have no
/// analyst classification, as a two-column CSV pushed back to the
/// bucket. Returns the ticker count.
#[instrument(skip(pool, storage))]
pub async fn export_missing_classification(
    pool: &PgPool,
    storage: &ObjectStore,
) -> Result<usize, IngestError> {
    let rows = enrichment::missing_classification(pool).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Ticker", "Description"])
        .map_err(|e| IngestError::Parse(format!("Failed to build CSV: {e}")))?;
    for (ticker, description) in &rows {
        writer
            .write_record([ticker, description])
            .map_err(|e| IngestError::Parse(format!("Failed to build CSV: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| IngestError::Parse(format!("Failed to build CSV: {e}")))?;

    storage
        .put(constants::NO_METADATA_OBJECT_KEY, "text/csv", bytes)
        .await?;

    info!(ticker_count = rows.len(), "Missing-classification CSV uploaded");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{Cell, Record};

    fn model(ticker: &str) -> NewRatingModel {
        let mut record = Record::new();
        record.insert("ticker", Cell::Text(ticker.to_string()));
        record.insert("description", Cell::Text("desc".to_string()));
        NewRatingModel::from_record(&record)
    }

    #[test]
    fn partition_respects_existing_keys() {
        let existing: HashSet<String> = ["VWRL".to_string()].into_iter().collect();
        let (new_rows, update_rows) =
            split_new_existing(vec![model("VWRL"), model("VUSA")], &existing);
        assert_eq!(update_rows.len(), 1);
        assert_eq!(update_rows[0].ticker, "VWRL");
        assert_eq!(new_rows.len(), 1);
        assert_eq!(new_rows[0].ticker, "VUSA");
    }

    #[test]
    fn empty_existing_set_inserts_everything() {
        let (new_rows, update_rows) =
            split_new_existing(vec![model("VWRL"), model("VUSA")], &HashSet::new());
        assert_eq!(new_rows.len(), 2);
        assert!(update_rows.is_empty());
    }
}
