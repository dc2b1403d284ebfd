//! Per-feed parsing configuration.
//!
//! Each ingested sheet is described by a typed `FeedSpec` selected through
//! the closed `FeedKind` enumeration: which sheet to read, how many
//! leading rows to skip, how source headers rename to canonical columns,
//! and which coercion each canonical column gets.

use crate::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    EquityInstruments,
    BondInstruments,
    EtfInstruments,
    EtcInstruments,
    EtnInstruments,
    MonthlyEquityVolume,
    MonthlyEtpVolume,
    WeeklyVolume,
    Ratings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Float,
    Integer,
    Date,
}

/// Parsing configuration for one feed.
pub struct FeedSpec {
    /// Worksheet to read; unused for the CSV ratings feed.
    pub sheet_name: &'static str,
    /// Leading non-data rows before the header row.
    pub skip_rows: usize,
    /// Source header (after normalization) to canonical column name.
    /// Every canonical name listed here must be present after renaming.
    pub header_aliases: &'static [(&'static str, &'static str)],
    /// Canonical column to coercion; unlisted columns stay text.
    pub column_types: &'static [(&'static str, ColumnType)],
}

impl FeedSpec {
    pub fn column_type(&self, canonical: &str) -> ColumnType {
        self.column_types
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, ty)| *ty)
            .unwrap_or(ColumnType::Text)
    }
}

const EQUITY_INSTRUMENT_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("issuer name", "issuer_name"),
    ("instrument name", "instrument_name"),
    ("isin", "isin"),
    ("mifir identifier code", "mifir_identifier_code"),
    ("icb industry", "icb_industry"),
    ("icb super-sector name", "icb_super_sector"),
    ("start date", "start_date"),
    ("country of incorporation", "country_of_incorporation"),
    ("trading currency", "trading_currency"),
    ("security mkt cap (in £m)", "mkt_cap_mm"),
    ("lse market", "lse_market"),
    ("fca listing category", "fca_listing_category"),
    ("market segment code", "market_segment_code"),
    ("market sector code", "market_sector_code"),
];

const BOND_INSTRUMENT_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("issuer name", "issuer_name"),
    ("instrument name", "instrument_name"),
    ("isin", "isin"),
    ("mifir identifier code", "mifir_identifier_code"),
    ("mifir sub-class code", "mifir_sub_class_code"),
    ("mifir sub-class name", "mifir_sub_class_name"),
    ("start date", "start_date"),
    ("maturity date", "maturity_date"),
    ("coupon interest rate", "coupon_interest_rate"),
    ("country of incorporation", "country_of_incorporation"),
    ("trading currency", "trading_currency"),
    ("lse market", "lse_market"),
    ("fca listing category", "fca_listing_category"),
    ("market segment code", "market_segment_code"),
    ("market sector code", "market_sector_code"),
];

const ETP_INSTRUMENT_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("issuer name", "issuer_name"),
    ("instrument name", "instrument_name"),
    ("isin", "isin"),
    ("mifir identifier code", "mifir_identifier_code"),
    ("start date", "start_date"),
    ("country of incorporation", "country_of_incorporation"),
    ("trading currency", "trading_currency"),
    ("lse market", "lse_market"),
    ("fca listing category", "fca_listing_category"),
    ("market segment code", "market_segment_code"),
    ("market sector code", "market_sector_code"),
];

const INSTRUMENT_TYPES: &[(&str, ColumnType)] = &[
    ("start_date", ColumnType::Date),
    ("maturity_date", ColumnType::Date),
    ("mkt_cap_mm", ColumnType::Float),
    ("coupon_interest_rate", ColumnType::Float),
];

const MONTHLY_EQUITY_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("isin", "isin"),
    ("value traded (£)", "gbp_turnover"),
    ("trades", "number_of_trades"),
    ("volume", "volume"),
];

// The ETP sheet repeats several header names; ".4" selects the fifth
// occurrence the way the source's tabular exports disambiguate them.
const MONTHLY_ETP_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("isin", "isin"),
    ("value of trades (£).4", "gbp_turnover"),
    ("number of trades.4", "number_of_trades"),
    ("volume", "volume"),
];

const MONTHLY_TYPES: &[(&str, ColumnType)] = &[
    ("gbp_turnover", ColumnType::Float),
    ("number_of_trades", ColumnType::Integer),
    ("volume", ColumnType::Float),
];

const WEEKLY_ALIASES: &[(&str, &str)] = &[
    ("tidm", "ticker"),
    ("isin", "isin"),
    ("number of trades", "number_of_trades"),
    ("gbp turnover", "gbp_turnover"),
    ("average trade size", "avg_trade_size"),
    ("time weighted spread (bps)", "avg_spread"),
];

const WEEKLY_TYPES: &[(&str, ColumnType)] = &[
    ("gbp_turnover", ColumnType::Float),
    ("number_of_trades", ColumnType::Integer),
    ("avg_trade_size", ColumnType::Float),
    ("avg_spread", ColumnType::Float),
];

// The ratings CSV keeps its original header casing.
const RATINGS_ALIASES: &[(&str, &str)] = &[
    ("Ticker", "ticker"),
    ("Description", "description"),
    ("Technical Rating", "technical_rating"),
    ("Oscillators Rating", "oscillators_rating"),
    ("Moving Averages Rating", "moving_avg_rating"),
    ("Price", "price"),
    ("Weekly Performance", "perf_weekly"),
    ("Monthly Performance", "perf_monthly"),
    ("3-Month Performance", "perf_3m"),
    ("YTD Performance", "perf_ytd"),
    ("6-Month Performance", "perf_6m"),
    ("Volatility Month", "vol_1w"),
    ("Volatility Week", "vol_1m"),
];

const RATINGS_TYPES: &[(&str, ColumnType)] = &[
    ("price", ColumnType::Float),
    ("perf_weekly", ColumnType::Float),
    ("perf_monthly", ColumnType::Float),
    ("perf_3m", ColumnType::Float),
    ("perf_ytd", ColumnType::Float),
    ("perf_6m", ColumnType::Float),
    ("vol_1w", ColumnType::Float),
    ("vol_1m", ColumnType::Float),
];

impl FeedKind {
    pub fn spec(&self) -> FeedSpec {
        match self {
            FeedKind::EquityInstruments => FeedSpec {
                sheet_name: constants::INSTRUMENT_SHEET_EQUITY,
                skip_rows: constants::INSTRUMENT_SKIP_ROWS,
                header_aliases: EQUITY_INSTRUMENT_ALIASES,
                column_types: INSTRUMENT_TYPES,
            },
            FeedKind::BondInstruments => FeedSpec {
                sheet_name: constants::INSTRUMENT_SHEET_BONDS,
                skip_rows: constants::INSTRUMENT_SKIP_ROWS,
                header_aliases: BOND_INSTRUMENT_ALIASES,
                column_types: INSTRUMENT_TYPES,
            },
            FeedKind::EtfInstruments => FeedSpec {
                sheet_name: constants::INSTRUMENT_SHEET_ETFS,
                skip_rows: constants::INSTRUMENT_SKIP_ROWS,
                header_aliases: ETP_INSTRUMENT_ALIASES,
                column_types: INSTRUMENT_TYPES,
            },
            FeedKind::EtcInstruments => FeedSpec {
                sheet_name: constants::INSTRUMENT_SHEET_ETCS,
                skip_rows: constants::INSTRUMENT_SKIP_ROWS,
                header_aliases: ETP_INSTRUMENT_ALIASES,
                column_types: INSTRUMENT_TYPES,
            },
            FeedKind::EtnInstruments => FeedSpec {
                sheet_name: constants::INSTRUMENT_SHEET_ETNS,
                skip_rows: constants::INSTRUMENT_SKIP_ROWS,
                header_aliases: ETP_INSTRUMENT_ALIASES,
                column_types: INSTRUMENT_TYPES,
            },
            FeedKind::MonthlyEquityVolume => FeedSpec {
                sheet_name: constants::MONTHLY_EQUITY_SHEET,
                skip_rows: constants::MONTHLY_EQUITY_SKIP_ROWS,
                header_aliases: MONTHLY_EQUITY_ALIASES,
                column_types: MONTHLY_TYPES,
            },
            FeedKind::MonthlyEtpVolume => FeedSpec {
                sheet_name: constants::MONTHLY_ETP_SHEET,
                skip_rows: constants::MONTHLY_ETP_SKIP_ROWS,
                header_aliases: MONTHLY_ETP_ALIASES,
                column_types: MONTHLY_TYPES,
            },
            FeedKind::WeeklyVolume => FeedSpec {
                sheet_name: constants::WEEKLY_SHEET,
                skip_rows: constants::WEEKLY_SKIP_ROWS,
                header_aliases: WEEKLY_ALIASES,
                column_types: WEEKLY_TYPES,
            },
            FeedKind::Ratings => FeedSpec {
                sheet_name: "",
                skip_rows: 0,
                header_aliases: RATINGS_ALIASES,
                column_types: RATINGS_TYPES,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_typed_column_is_an_alias_target() {
        for kind in [
            FeedKind::EquityInstruments,
            FeedKind::BondInstruments,
            FeedKind::EtfInstruments,
            FeedKind::MonthlyEquityVolume,
            FeedKind::MonthlyEtpVolume,
            FeedKind::WeeklyVolume,
            FeedKind::Ratings,
        ] {
            let spec = kind.spec();
            for (name, _) in spec.column_types {
                assert!(
                    spec.header_aliases.iter().any(|(_, c)| c == name),
                    "{kind:?} types a column {name} that no alias produces"
                );
            }
        }
    }

    #[test]
    fn etp_sheets_share_the_etp_alias_map() {
        let etf = FeedKind::EtfInstruments.spec();
        let etc = FeedKind::EtcInstruments.spec();
        let etn = FeedKind::EtnInstruments.spec();
        assert_eq!(etf.header_aliases.len(), etc.header_aliases.len());
        assert_eq!(etc.header_aliases.len(), etn.header_aliases.len());
        assert_ne!(etf.sheet_name, etc.sheet_name);
        assert_ne!(etc.sheet_name, etn.sheet_name);
    }

    #[test]
    fn untyped_columns_default_to_text() {
        let spec = FeedKind::WeeklyVolume.spec();
        assert_eq!(spec.column_type("ticker"), ColumnType::Text);
        assert_eq!(spec.column_type("avg_spread"), ColumnType::Float);
    }
}
