//! CSV reading for the ratings feed. Unlike the exchange workbooks the
//! analytics export keeps stable, exact-case headers, so no
//! normalization happens before the alias lookup.

use std::collections::HashMap;
use tracing::debug;

use super::spec::FeedKind;
use super::table::{self, Record, SheetTable};
use crate::error::IngestError;

pub fn parse_ratings_csv(bytes: &[u8]) -> Result<SheetTable, IngestError> {
    let spec = FeedKind::Ratings.spec();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Parse(format!("Failed to load CSV: {e}")))?
        .clone();

    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some((_, canonical)) = spec
            .header_aliases
            .iter()
            .find(|(alias, _)| *alias == header.trim())
        {
            columns.entry(*canonical).or_insert(idx);
        }
    }

    let missing: Vec<&str> = spec
        .header_aliases
        .iter()
        .filter(|(alias, canonical)| !columns.contains_key(*canonical) && !alias.is_empty())
        .map(|(alias, _)| *alias)
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::Parse(format!(
            "CSV columns do not match expected values; missing: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::Parse(format!("Failed to load CSV: {e}")))?;
        let mut record = Record::new();
        for (&canonical, &idx) in &columns {
            let raw = row.get(idx).unwrap_or("");
            record.insert(canonical, table::coerce_str(raw, spec.column_type(canonical)));
        }
        if record.is_empty() {
            continue;
        }
        records.push(record);
    }

    let table = SheetTable::dedup_by_ticker(records);
    debug!(
        rows = table.len(),
        duplicates_removed = table.duplicates_removed,
        "Ratings CSV parsed"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Ticker,Description,Technical Rating,Oscillators Rating,Moving Averages Rating,Price,Weekly Performance,Monthly Performance,3-Month Performance,YTD Performance,6-Month Performance,Volatility Month,Volatility Week";

    #[test]
    fn parses_well_formed_csv() {
        let csv = format!(
            "{HEADER}\nVWRL,Vanguard FTSE All-World,Buy,Neutral,Strong Buy,107.42,0.5,1.2,3.4,8.8,5.6,1.1,0.9\n"
        );
        let table = parse_ratings_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.text("ticker"), "VWRL");
        assert_eq!(row.text("technical_rating"), "Buy");
        assert_eq!(row.opt_f64("price"), Some(107.42));
        assert_eq!(row.opt_f64("vol_1w"), Some(1.1)); // "Volatility Month" column
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let csv = "Ticker,Description\nVWRL,Vanguard\n";
        let err = parse_ratings_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Price"), "got: {err}");
    }

    #[test]
    fn duplicate_tickers_collapse() {
        let csv = format!(
            "{HEADER}\nVWRL,a,Buy,b,c,1,,,,,,,\nVWRL,a,Sell,b,c,2,,,,,,,\nVUSA,a,Buy,b,c,3,,,,,,,\n"
        );
        let table = parse_ratings_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.duplicates_removed, 1);
        assert_eq!(table.rows[0].opt_f64("price"), Some(1.0));
    }

    #[test]
    fn blank_numerics_become_null() {
        let csv = format!("{HEADER}\nVWRL,a,Buy,b,c,,x,,,,,,\n");
        let table = parse_ratings_csv(csv.as_bytes()).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.opt_f64("price"), None);
        assert_eq!(row.opt_f64("perf_weekly"), None);
    }
}
