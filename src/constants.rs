use chrono::NaiveDate;

// ===================== Instrument list workbook =====================

/// Number of spreadsheet rows before the table header row.
pub const INSTRUMENT_SKIP_ROWS: usize = 8;

/// Publication date of the first instrument workbook on the exchange
/// server; the URL suffix is the month count from here to today.
pub const INSTRUMENT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2020, 4, 30) {
    Some(d) => d,
    None => panic!("invalid instrument epoch"),
};

pub const INSTRUMENT_BASE_URL: &str =
    "https://docs.londonstockexchange.com/sites/default/files/reports/Instrument%20list_";

pub const INSTRUMENT_SHEET_EQUITY: &str = "1.1 Shares";
pub const INSTRUMENT_SHEET_BONDS: &str = "2.1 Bonds";
pub const INSTRUMENT_SHEET_ETFS: &str = "1.3 ETFs";
pub const INSTRUMENT_SHEET_ETCS: &str = "2.2 ETCs";
pub const INSTRUMENT_SHEET_ETNS: &str = "2.3 ETNs";

// ===================== Monthly volume workbooks =====================

pub const MONTHLY_EQUITY_SHEET: &str = "Trading Summary Factsheet";
pub const MONTHLY_ETP_SHEET: &str = "ETFs & ETPs Trading by Security";
pub const MONTHLY_EQUITY_SKIP_ROWS: usize = 6;
pub const MONTHLY_ETP_SKIP_ROWS: usize = 6;
pub const MONTHLY_EQUITY_BASE_URL: &str =
    "https://docs.londonstockexchange.com/sites/default/files/reports/Trading%20statistics%20";
pub const MONTHLY_ETP_BASE_URL: &str = "https://docs.londonstockexchange.com/sites/default/files/reports/ETF%20and%20ETP%20Monthly%20trading%20data%20by%20security%20";

// ===================== Weekly volume workbook =====================

pub const WEEKLY_SHEET: &str = "ETFs";
pub const WEEKLY_SKIP_ROWS: usize = 5;
pub const WEEKLY_BASE_URL: &str = "https://docs.londonstockexchange.com/sites/default/files/reports/ETF%20and%20ETP%20weekly%20statistics%20-%20week%20ending%20";

// ===================== Ratings feed (object storage) =====================

/// Bucket key the analytics export is dropped at by the upload side.
pub const RATINGS_OBJECT_KEY: &str = "tradingview/tradingview.csv";

/// Bucket key the missing-classification export is written back to.
pub const NO_METADATA_OBJECT_KEY: &str = "tradingview/not_in_manualmeta.csv";
