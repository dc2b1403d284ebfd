//! Canonical in-memory table produced by the workbook and CSV parsers.

use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};

use super::spec::ColumnType;

/// Pandas-style sentinel for perpetual bonds (31/12/9999); any date in
/// year 9999 coerces to null.
const MAX_REAL_YEAR: i32 = 9998;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Float(f64),
    Int(i64),
    Date(NaiveDate),
    Null,
}

/// One parsed row keyed by canonical column name.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<&'static str, Cell>);

impl Record {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: &'static str, cell: Cell) {
        self.0.insert(key, cell);
    }

    pub fn get(&self, key: &str) -> &Cell {
        self.0.get(key).unwrap_or(&Cell::Null)
    }

    /// Text rendering of a cell; null becomes the empty string.
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Cell::Text(s) => s.clone(),
            Cell::Float(f) => format!("{f}"),
            Cell::Int(i) => format!("{i}"),
            Cell::Date(d) => d.to_string(),
            Cell::Null => String::new(),
        }
    }

    pub fn opt_text(&self, key: &str) -> Option<String> {
        let s = self.text(key);
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    pub fn opt_f64(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Cell::Float(f) => Some(*f),
            Cell::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn opt_date(&self, key: &str) -> Option<NaiveDate> {
        match self.get(key) {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|c| matches!(c, Cell::Null))
    }
}

/// Parsed sheet after renaming, coercion and deduplication.
#[derive(Debug)]
pub struct SheetTable {
    pub rows: Vec<Record>,
    pub duplicates_removed: usize,
}

impl SheetTable {
    /// Drop repeat tickers, first occurrence winning, and report how
    /// many rows were removed. Rows without a ticker are discarded
    /// quietly; sheets commonly trail off into empty or footnote rows.
    pub fn dedup_by_ticker(records: Vec<Record>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());
        let mut duplicates_removed = 0;

        for record in records {
            let ticker = record.text("ticker");
            if ticker.is_empty() {
                continue;
            }
            if seen.insert(ticker) {
                rows.push(record);
            } else {
                duplicates_removed += 1;
            }
        }

        SheetTable {
            rows,
            duplicates_removed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Coerce a raw string to the requested column type. Unparseable
/// numerics and dates become null rather than raising; the perpetual
/// date sentinel also becomes null.
pub fn coerce_str(raw: &str, ty: ColumnType) -> Cell {
    let s = raw.trim();
    if s.is_empty() {
        return Cell::Null;
    }

    match ty {
        ColumnType::Text => Cell::Text(s.to_string()),
        ColumnType::Float => match parse_number(s) {
            Some(f) => Cell::Float(f),
            None => Cell::Null,
        },
        ColumnType::Integer => match parse_number(s) {
            Some(f) => Cell::Int(f as i64),
            None => Cell::Null,
        },
        ColumnType::Date => match parse_day_first_date(s) {
            Some(d) if d.year() <= MAX_REAL_YEAR => Cell::Date(d),
            _ => Cell::Null,
        },
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f),
        _ => None,
    }
}

/// Day-first date parsing, with ISO accepted as a fallback.
pub fn parse_day_first_date(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%d %B %Y"];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Excel serial date conversion using the 1899-12-30 base.
pub fn excel_serial_to_date(v: f64) -> Option<NaiveDate> {
    if !v.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(v.floor() as i64))
}

/// Sentinel check shared by the cell and string coercion paths.
pub fn is_perpetual(date: NaiveDate) -> bool {
    date.year() > MAX_REAL_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_ticker(ticker: &str) -> Record {
        let mut r = Record::new();
        r.insert("ticker", Cell::Text(ticker.to_string()));
        r
    }

    #[test]
    fn dedup_keeps_first_occurrence_and_counts_removed() {
        let rows = vec![
            record_with_ticker("AAA"),
            record_with_ticker("BBB"),
            record_with_ticker("AAA"),
        ];
        let table = SheetTable::dedup_by_ticker(rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table.duplicates_removed, 1);
        assert_eq!(table.rows[0].text("ticker"), "AAA");
    }

    #[test]
    fn dedup_discards_rows_without_ticker() {
        let rows = vec![record_with_ticker("AAA"), Record::new()];
        let table = SheetTable::dedup_by_ticker(rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.duplicates_removed, 0);
    }

    #[test]
    fn unparseable_numbers_become_null() {
        assert_eq!(coerce_str("-", ColumnType::Float), Cell::Null);
        assert_eq!(coerce_str("n/a", ColumnType::Integer), Cell::Null);
        assert_eq!(
            coerce_str("1,234.5", ColumnType::Float),
            Cell::Float(1234.5)
        );
        assert_eq!(coerce_str("42", ColumnType::Integer), Cell::Int(42));
    }

    #[test]
    fn dates_parse_day_first() {
        assert_eq!(
            coerce_str("31/12/2049", ColumnType::Date),
            Cell::Date(NaiveDate::from_ymd_opt(2049, 12, 31).unwrap())
        );
        assert_eq!(
            coerce_str("05/09/2025", ColumnType::Date),
            Cell::Date(NaiveDate::from_ymd_opt(2025, 9, 5).unwrap())
        );
    }

    #[test]
    fn perpetual_sentinel_becomes_null() {
        assert_eq!(coerce_str("31/12/9999", ColumnType::Date), Cell::Null);
    }

    #[test]
    fn excel_serial_round_trip() {
        // 2020-04-30 is serial 43951
        assert_eq!(
            excel_serial_to_date(43951.0),
            NaiveDate::from_ymd_opt(2020, 4, 30)
        );
    }
}
