//! Volume ingestion. Monthly runs pair two workbooks (equity summary
//! plus ETP-by-security) under one period label; weekly runs a single
//! workbook. Both are wholesale replacements with no history retained.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::db::models::volumes::{NewMonthlyVolumeModel, NewWeeklyVolumeModel};
use crate::db::queries::{lock, volumes as queries};
use crate::error::IngestError;
use crate::fetch::SpreadsheetFetcher;
use crate::sheets::{workbook, FeedKind, SheetTable};

#[derive(Debug)]
pub struct VolumeIngestSummary {
    pub period_label: String,
    pub rows: usize,
    pub duplicates_removed: usize,
    pub dropped_incomplete: usize,
}

#[instrument(skip(pool, fetcher))]
pub async fn ingest_monthly(
    pool: &PgPool,
    fetcher: &SpreadsheetFetcher,
    today: NaiveDate,
) -> Result<VolumeIngestSummary, IngestError> {
    let equity_fetched = fetcher.fetch_monthly_equity(today).await?;
    let equity_table = workbook::parse_sheet(&equity_fetched.bytes, FeedKind::MonthlyEquityVolume)?;
    if equity_table.is_empty() {
        return Err(IngestError::Empty(
            "Equity Monthly Volume dataframe is empty.".to_string(),
        ));
    }

    // The ETP workbook is named after whichever month actually resolved.
    let etp_fetched = fetcher.fetch_monthly_etp(&equity_fetched.period_label).await?;
    let etp_table = workbook::parse_sheet(&etp_fetched.bytes, FeedKind::MonthlyEtpVolume)?;
    if etp_table.is_empty() {
        return Err(IngestError::Empty(
            "Monthly dataframe is empty.".to_string(),
        ));
    }

    // ETP rows ahead of equity rows; the first occurrence of a shared
    // ticker wins the dedup.
    let mut records = etp_table.rows;
    records.extend(equity_table.rows);
    let combined = SheetTable::dedup_by_ticker(records);
    let duplicates_removed = equity_table.duplicates_removed
        + etp_table.duplicates_removed
        + combined.duplicates_removed;

    let mut rows = Vec::with_capacity(combined.len());
    let mut dropped_incomplete = 0;
    for record in &combined.rows {
        match NewMonthlyVolumeModel::from_record(record) {
            Some(model) => rows.push(model),
            None => dropped_incomplete += 1,
        }
    }
    if rows.is_empty() {
        return Err(IngestError::Empty(
            "Monthly dataframe is empty.".to_string(),
        ));
    }
    if dropped_incomplete > 0 {
        warn!(dropped_incomplete, "Monthly rows without a trade count dropped");
    }

    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_MONTHLY_VOLUMES).await?;
    let removed = queries::delete_all_monthly(&mut tx).await?;
    for row in &rows {
        queries::insert_monthly(&mut tx, row).await?;
    }
    tx.commit().await?;

    info!(
        period = %equity_fetched.period_label,
        replaced = removed,
        inserted = rows.len(),
        duplicates_removed,
        "Monthly volume table replaced"
    );

    Ok(VolumeIngestSummary {
        period_label: equity_fetched.period_label,
        rows: rows.len(),
        duplicates_removed,
        dropped_incomplete,
    })
}

#[instrument(skip(pool, fetcher))]
pub async fn ingest_weekly(
    pool: &PgPool,
    fetcher: &SpreadsheetFetcher,
    today: NaiveDate,
) -> Result<VolumeIngestSummary, IngestError> {
    let fetched = fetcher.fetch_weekly(today).await?;
    let table = workbook::parse_sheet(&fetched.bytes, FeedKind::WeeklyVolume)?;

    // Rows missing any critical statistic are dropped, not nulled.
    let mut rows = Vec::with_capacity(table.len());
    let mut dropped_incomplete = 0;
    for record in &table.rows {
        match NewWeeklyVolumeModel::from_record(record) {
            Some(model) => rows.push(model),
            None => dropped_incomplete += 1,
        }
    }
    if rows.is_empty() {
        return Err(IngestError::Empty(
            "Equity Weekly Volume dataframe is empty.".to_string(),
        ));
    }
    if dropped_incomplete > 0 {
        info!(dropped_incomplete, "Weekly rows with empty critical fields dropped");
    }

    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_WEEKLY_VOLUMES).await?;
    let removed = queries::delete_all_weekly(&mut tx).await?;
    for row in &rows {
        queries::insert_weekly(&mut tx, row).await?;
    }
    tx.commit().await?;

    info!(
        period = %fetched.period_label,
        replaced = removed,
        inserted = rows.len(),
        duplicates_removed = table.duplicates_removed,
        "Weekly volume table replaced"
    );

    Ok(VolumeIngestSummary {
        period_label: fetched.period_label,
        rows: rows.len(),
        duplicates_removed: table.duplicates_removed,
        dropped_incomplete,
    })
}
