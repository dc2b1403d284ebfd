//! Instrument list ingestion: one workbook, five sheets, three tables.
//! Equities and bonds are wholesale-replaced; the ETP table is cleared
//! once per run and accumulates the ETF, ETC and ETN sheets.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::db::models::instruments::{NewBondModel, NewEquityModel, NewEtpModel};
use crate::db::queries::{instruments as queries, lock};
use crate::error::IngestError;
use crate::fetch::SpreadsheetFetcher;
use crate::sheets::{workbook, FeedKind, SheetTable};

#[derive(Debug)]
pub struct InstrumentIngestSummary {
    pub equities: usize,
    pub bonds: usize,
    pub etps: usize,
    pub duplicates_removed: usize,
}

#[instrument(skip(pool, fetcher))]
pub async fn ingest_instruments(
    pool: &PgPool,
    fetcher: &SpreadsheetFetcher,
    today: NaiveDate,
) -> Result<InstrumentIngestSummary, IngestError> {
    let fetched = fetcher.fetch_instruments(today).await?;

    // Parse every sheet before touching the database so a source
    // template change aborts the run with the tables untouched.
    let equity_table = workbook::parse_sheet(&fetched.bytes, FeedKind::EquityInstruments)?;
    let bond_table = workbook::parse_sheet(&fetched.bytes, FeedKind::BondInstruments)?;
    let etf_table = workbook::parse_sheet(&fetched.bytes, FeedKind::EtfInstruments)?;
    let etc_table = workbook::parse_sheet(&fetched.bytes, FeedKind::EtcInstruments)?;
    let etn_table = workbook::parse_sheet(&fetched.bytes, FeedKind::EtnInstruments)?;

    let mut duplicates_removed = equity_table.duplicates_removed
        + bond_table.duplicates_removed
        + etf_table.duplicates_removed
        + etc_table.duplicates_removed
        + etn_table.duplicates_removed;

    if equity_table.is_empty() || bond_table.is_empty() || etf_table.is_empty() {
        return Err(IngestError::Empty(
            "Instrument dataframe is empty.".to_string(),
        ));
    }

    let equities: Vec<NewEquityModel> = equity_table
        .rows
        .iter()
        .map(NewEquityModel::from_record)
        .collect();
    let bonds: Vec<NewBondModel> = bond_table
        .rows
        .iter()
        .map(NewBondModel::from_record)
        .collect();

    // The three ETP sheets share one table; a ticker appearing on two of
    // them would break the append, so dedup across them as well.
    let mut etp_records = etf_table.rows;
    etp_records.extend(etc_table.rows);
    etp_records.extend(etn_table.rows);
    let etp_table = SheetTable::dedup_by_ticker(etp_records);
    duplicates_removed += etp_table.duplicates_removed;
    let etps: Vec<NewEtpModel> = etp_table.rows.iter().map(NewEtpModel::from_record).collect();

    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_EQUITIES).await?;
    let removed = queries::delete_all_equities(&mut tx).await?;
    for equity in &equities {
        queries::insert_equity(&mut tx, equity).await?;
    }
    tx.commit().await?;
    info!(replaced = removed, inserted = equities.len(), "Equity table replaced");

    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_BONDS).await?;
    let removed = queries::delete_all_bonds(&mut tx).await?;
    for bond in &bonds {
        queries::insert_bond(&mut tx, bond).await?;
    }
    tx.commit().await?;
    info!(replaced = removed, inserted = bonds.len(), "Bond table replaced");

    // One transaction covers the whole ETP cycle: cleared for the first
    // sheet, appended for the rest.
    let mut tx = pool.begin().await?;
    lock::advisory_xact_lock(&mut tx, lock::LOCK_ETPS).await?;
    let removed = queries::delete_all_etps(&mut tx).await?;
    for etp in &etps {
        queries::insert_etp(&mut tx, etp).await?;
    }
    tx.commit().await?;
    info!(replaced = removed, inserted = etps.len(), "ETP table rebuilt from three sheets");

    info!(
        period = %fetched.period_label,
        duplicates_removed,
        "Instrument ingestion complete"
    );

    Ok(InstrumentIngestSummary {
        equities: equities.len(),
        bonds: bonds.len(),
        etps: etps.len(),
        duplicates_removed,
    })
}
