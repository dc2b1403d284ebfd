use crate::sheets::Record;

/// New or replacement ratings row from the analytics CSV.
#[derive(Debug, Clone)]
pub struct NewRatingModel {
    pub ticker: String,
    pub description: String,
    pub technical_rating: String,
    pub oscillators_rating: String,
    pub moving_avg_rating: String,
    pub price: Option<f64>,
    pub perf_weekly: Option<f64>,
    pub perf_monthly: Option<f64>,
    pub perf_3m: Option<f64>,
    pub perf_ytd: Option<f64>,
    pub perf_6m: Option<f64>,
    pub vol_1w: Option<f64>,
    pub vol_1m: Option<f64>,
}

impl NewRatingModel {
    pub fn from_record(record: &Record) -> Self {
        Self {
            ticker: record.text("ticker"),
            description: record.text("description"),
            technical_rating: record.text("technical_rating"),
            oscillators_rating: record.text("oscillators_rating"),
            moving_avg_rating: record.text("moving_avg_rating"),
            price: record.opt_f64("price"),
            perf_weekly: record.opt_f64("perf_weekly"),
            perf_monthly: record.opt_f64("perf_monthly"),
            perf_3m: record.opt_f64("perf_3m"),
            perf_ytd: record.opt_f64("perf_ytd"),
            perf_6m: record.opt_f64("perf_6m"),
            vol_1w: record.opt_f64("vol_1w"),
            vol_1m: record.opt_f64("vol_1m"),
        }
    }
}
