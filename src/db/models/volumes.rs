use crate::sheets::Record;

/// New monthly volume row. The average trade size is derived here from
/// turnover over trade count once column names are normalised.
#[derive(Debug, Clone)]
pub struct NewMonthlyVolumeModel {
    pub ticker: String,
    pub isin: String,
    pub gbp_turnover: Option<f64>,
    pub number_of_trades: i64,
    pub volume: Option<f64>,
    pub avg_trade_size: Option<f64>,
}

impl NewMonthlyVolumeModel {
    /// Returns `None` when the trade count is blank; such rows cannot be
    /// stored and are dropped by the caller.
    pub fn from_record(record: &Record) -> Option<Self> {
        let number_of_trades = record.opt_i64("number_of_trades")?;
        let gbp_turnover = record.opt_f64("gbp_turnover");
        let avg_trade_size = match (gbp_turnover, number_of_trades) {
            (Some(turnover), trades) if trades != 0 => Some(turnover / trades as f64),
            _ => None,
        };

        Some(Self {
            ticker: record.text("ticker"),
            isin: record.text("isin"),
            gbp_turnover,
            number_of_trades,
            volume: record.opt_f64("volume"),
            avg_trade_size,
        })
    }
}

/// New weekly volume row. All four statistics are critical; a row
/// missing any of them is dropped before insert.
#[derive(Debug, Clone)]
pub struct NewWeeklyVolumeModel {
    pub ticker: String,
    pub isin: String,
    pub gbp_turnover: f64,
    pub number_of_trades: i64,
    pub avg_spread: f64,
    pub avg_trade_size: f64,
}

impl NewWeeklyVolumeModel {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            ticker: record.text("ticker"),
            isin: record.text("isin"),
            gbp_turnover: record.opt_f64("gbp_turnover")?,
            number_of_trades: record.opt_i64("number_of_trades")?,
            avg_spread: record.opt_f64("avg_spread")?,
            avg_trade_size: record.opt_f64("avg_trade_size")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::Cell;

    fn record(fields: &[(&'static str, Cell)]) -> Record {
        let mut r = Record::new();
        for (k, v) in fields {
            r.insert(k, v.clone());
        }
        r
    }

    #[test]
    fn monthly_avg_trade_size_is_derived() {
        let r = record(&[
            ("ticker", Cell::Text("AAA".into())),
            ("isin", Cell::Text("GB00".into())),
            ("gbp_turnover", Cell::Float(1000.0)),
            ("number_of_trades", Cell::Int(4)),
        ]);
        let m = NewMonthlyVolumeModel::from_record(&r).unwrap();
        assert_eq!(m.avg_trade_size, Some(250.0));
        assert_eq!(m.volume, None);
    }

    #[test]
    fn monthly_row_without_trade_count_is_dropped() {
        let r = record(&[
            ("ticker", Cell::Text("AAA".into())),
            ("gbp_turnover", Cell::Float(1000.0)),
        ]);
        assert!(NewMonthlyVolumeModel::from_record(&r).is_none());
    }

    #[test]
    fn weekly_row_missing_any_critical_field_is_dropped() {
        let r = record(&[
            ("ticker", Cell::Text("AAA".into())),
            ("isin", Cell::Text("GB00".into())),
            ("gbp_turnover", Cell::Float(10.0)),
            ("number_of_trades", Cell::Int(2)),
            ("avg_trade_size", Cell::Float(5.0)),
            // avg_spread missing
        ]);
        assert!(NewWeeklyVolumeModel::from_record(&r).is_none());
    }
}
