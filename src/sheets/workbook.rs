//! Workbook reading: locate a named sheet, normalize its header row,
//! rename columns to canonical names, coerce cell types and emit a
//! deduplicated table.

use calamine::{Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

use super::spec::{ColumnType, FeedKind, FeedSpec};
use super::table::{self, Cell, Record, SheetTable};
use crate::error::IngestError;

/// Parse the feed's sheet out of raw workbook bytes.
pub fn parse_sheet(bytes: &[u8], kind: FeedKind) -> Result<SheetTable, IngestError> {
    let spec = kind.spec();

    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| IngestError::Parse(format!("Error while reading workbook: {e}")))?;

    let range = workbook.worksheet_range(spec.sheet_name).map_err(|e| {
        IngestError::Parse(format!(
            "Sheet '{}' not found in workbook: {e}",
            spec.sheet_name
        ))
    })?;

    let table = table_from_rows(range.rows(), &spec)?;
    debug!(
        sheet = spec.sheet_name,
        rows = table.len(),
        duplicates_removed = table.duplicates_removed,
        "Sheet parsed"
    );
    Ok(table)
}

/// Core of the parser, split from the workbook plumbing so tests can
/// feed constructed rows.
pub fn table_from_rows<'a, I>(rows: I, spec: &FeedSpec) -> Result<SheetTable, IngestError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let mut rows = rows.skip(spec.skip_rows);

    let header_cells = rows
        .next()
        .ok_or_else(|| IngestError::Parse(format!("Sheet '{}' has no header row", spec.sheet_name)))?;
    let headers = normalize_headers(header_cells);

    // Map canonical column name to source column index via the alias map.
    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some((_, canonical)) = spec
            .header_aliases
            .iter()
            .find(|(alias, _)| *alias == header.as_str())
        {
            columns.entry(*canonical).or_insert(idx);
        }
    }

    let missing: Vec<&str> = spec
        .header_aliases
        .iter()
        .map(|(_, canonical)| *canonical)
        .filter(|canonical| !columns.contains_key(canonical))
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::Parse(format!(
            "Columns do not match expected values; missing after renaming: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for row in rows {
        let mut record = Record::new();
        for (&canonical, &idx) in &columns {
            let cell = coerce_cell(row.get(idx), spec.column_type(canonical));
            record.insert(canonical, cell);
        }
        if record.is_empty() {
            continue;
        }
        records.push(record);
    }

    Ok(SheetTable::dedup_by_ticker(records))
}

/// Lower-case and trim header names (the workbooks are inconsistent,
/// e.g. "Start Date" vs "Start date") and suffix repeated names with
/// ".1", ".2", … the way the source's tabular exports disambiguate
/// duplicate columns. The alias maps rely on those suffixes.
fn normalize_headers(cells: &[Data]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(cells.len());

    for cell in cells {
        let name = cell_str(cell).unwrap_or_default().trim().to_lowercase();
        let seen = counts.entry(name.clone()).or_insert(0);
        if *seen == 0 || name.is_empty() {
            headers.push(name.clone());
        } else {
            headers.push(format!("{}.{}", name, *seen));
        }
        *seen += 1;
    }

    headers
}

fn cell_str(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

/// Per-cell coercion. Numeric cells accept float or int data; strings
/// go through the shared string coercion. Dates additionally accept
/// Excel serials and datetime cells, with the perpetual sentinel
/// coercing to null.
fn coerce_cell(cell: Option<&Data>, ty: ColumnType) -> Cell {
    let Some(data) = cell else {
        return Cell::Null;
    };

    match (ty, data) {
        (_, Data::Empty) => Cell::Null,
        (ColumnType::Float, Data::Float(f)) if f.is_finite() => Cell::Float(*f),
        (ColumnType::Float, Data::Int(i)) => Cell::Float(*i as f64),
        (ColumnType::Integer, Data::Float(f)) if f.is_finite() => Cell::Int(*f as i64),
        (ColumnType::Integer, Data::Int(i)) => Cell::Int(*i),
        (ColumnType::Date, Data::Float(f)) => serial_date_cell(*f),
        (ColumnType::Date, Data::Int(i)) => serial_date_cell(*i as f64),
        (ColumnType::Date, Data::DateTime(dt)) => serial_date_cell(dt.as_f64()),
        (ty, data) => match cell_str(data) {
            Some(s) => table::coerce_str(&s, ty),
            None => Cell::Null,
        },
    }
}

fn serial_date_cell(serial: f64) -> Cell {
    match table::excel_serial_to_date(serial) {
        Some(d) if !table::is_perpetual(d) => Cell::Date(d),
        _ => Cell::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn monthly_etp_rows() -> Vec<Vec<Data>> {
        // Six leading banner rows, then a header row with the repeated
        // column names the real export carries.
        let mut rows: Vec<Vec<Data>> = (0..6).map(|_| vec![text("banner")]).collect();
        let mut header = vec![text("TIDM"), text("ISIN")];
        for _ in 0..4 {
            header.push(text("Value of trades (£)"));
            header.push(text("Number of trades"));
        }
        header.push(text("Value of trades (£)"));
        header.push(text("Number of trades"));
        header.push(text("Volume"));
        rows.push(header);

        let mut data = vec![text("AAA"), text("GB0000000001")];
        for i in 0..4 {
            data.push(Data::Float(i as f64));
            data.push(Data::Float(i as f64));
        }
        data.push(Data::Float(125000.5)); // the ".4" occurrence
        data.push(Data::Float(250.0));
        data.push(Data::Float(99.0));
        rows.push(data);
        rows
    }

    #[test]
    fn repeated_headers_resolve_via_suffixes() {
        let rows = monthly_etp_rows();
        let spec = FeedKind::MonthlyEtpVolume.spec();
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &spec).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.opt_f64("gbp_turnover"), Some(125000.5));
        assert_eq!(row.opt_i64("number_of_trades"), Some(250));
        assert_eq!(row.opt_f64("volume"), Some(99.0));
    }

    #[test]
    fn missing_column_is_a_parse_error_naming_it() {
        let rows: Vec<Vec<Data>> = vec![
            vec![text("TIDM"), text("ISIN")], // no turnover/trades columns
        ];
        let mut spec = FeedKind::MonthlyEquityVolume.spec();
        spec.skip_rows = 0;
        let err = table_from_rows(rows.iter().map(|r| r.as_slice()), &spec).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gbp_turnover"), "got: {msg}");
    }

    #[test]
    fn duplicate_tickers_are_dropped_with_count() {
        let rows: Vec<Vec<Data>> = vec![
            vec![
                text("TIDM"),
                text("ISIN"),
                text("Value traded (£)"),
                text("Trades"),
                text("Volume"),
            ],
            vec![text("AAA"), text("x"), Data::Float(1.0), Data::Float(2.0), Data::Float(3.0)],
            vec![text("BBB"), text("x"), Data::Float(1.0), Data::Float(2.0), Data::Float(3.0)],
            vec![text("AAA"), text("x"), Data::Float(9.0), Data::Float(9.0), Data::Float(9.0)],
        ];
        let mut spec = FeedKind::MonthlyEquityVolume.spec();
        spec.skip_rows = 0;
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &spec).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.duplicates_removed, 1);
        // first occurrence wins
        assert_eq!(table.rows[0].opt_f64("gbp_turnover"), Some(1.0));
    }

    #[test]
    fn date_cells_accept_serials_strings_and_sentinel() {
        let rows: Vec<Vec<Data>> = vec![
            vec![text("TIDM"), text("Start Date"), text("Maturity Date")],
            vec![text("AAA"), Data::Float(43951.0), text("31/12/9999")],
            vec![text("BBB"), text("15/06/2021"), text("01/03/2030")],
        ];
        let spec = FeedSpec {
            sheet_name: "t",
            skip_rows: 0,
            header_aliases: &[
                ("tidm", "ticker"),
                ("start date", "start_date"),
                ("maturity date", "maturity_date"),
            ],
            column_types: &[
                ("start_date", ColumnType::Date),
                ("maturity_date", ColumnType::Date),
            ],
        };
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &spec).unwrap();
        assert_eq!(
            table.rows[0].opt_date("start_date"),
            NaiveDate::from_ymd_opt(2020, 4, 30)
        );
        assert_eq!(table.rows[0].opt_date("maturity_date"), None);
        assert_eq!(
            table.rows[1].opt_date("start_date"),
            NaiveDate::from_ymd_opt(2021, 6, 15)
        );
    }

    #[test]
    fn unparseable_numeric_strings_coerce_to_null() {
        let rows: Vec<Vec<Data>> = vec![
            vec![
                text("TIDM"),
                text("ISIN"),
                text("Value traded (£)"),
                text("Trades"),
                text("Volume"),
            ],
            vec![text("AAA"), text("x"), text("-"), text("n/a"), Data::Float(5.0)],
        ];
        let mut spec = FeedKind::MonthlyEquityVolume.spec();
        spec.skip_rows = 0;
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &spec).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.opt_f64("gbp_turnover"), None);
        assert_eq!(row.opt_i64("number_of_trades"), None);
        assert_eq!(row.opt_f64("volume"), Some(5.0));
    }
}
