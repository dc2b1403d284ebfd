use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::period;
use crate::config::Config;
use crate::constants;
use crate::error::{Feed, IngestError};

/// Raw workbook bytes plus the period label that was actually fetched.
#[derive(Debug)]
pub struct FetchedSheet {
    pub bytes: Vec<u8>,
    pub period_label: String,
}

/// Resolves publication URLs for a report period and downloads them,
/// falling back at most once to the prior period per feed.
#[derive(Clone)]
pub struct SpreadsheetFetcher {
    client: Client,
    instrument_base_url: String,
    monthly_equity_base_url: String,
    monthly_etp_base_url: String,
    weekly_base_url: String,
}

impl SpreadsheetFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            client: config.http_client.clone(),
            instrument_base_url: config.instrument_base_url.clone(),
            monthly_equity_base_url: config.monthly_equity_base_url.clone(),
            monthly_etp_base_url: config.monthly_etp_base_url.clone(),
            weekly_base_url: config.weekly_base_url.clone(),
        }
    }

    /// GET one URL, separating "document missing" (`Ok(None)`) from
    /// transport problems and non-404 server errors.
    async fn try_get(&self, feed: Feed, url: &str) -> Result<Option<Vec<u8>>, IngestError> {
        debug!(url, "Fetching workbook");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IngestError::Fetch {
                feed,
                status: None,
                message: e.to_string(),
            })?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !res.status().is_success() {
            return Err(IngestError::Fetch {
                feed,
                status: Some(res.status().as_u16()),
                message: format!("Server response code: {}", res.status().as_u16()),
            });
        }

        let bytes = res.bytes().await.map_err(|e| IngestError::Fetch {
            feed,
            status: None,
            message: e.to_string(),
        })?;
        Ok(Some(bytes.to_vec()))
    }

    /// Instrument workbook. The URL suffix is the month count from the
    /// epoch of the first publication to today; a 404 retries once with
    /// the suffix decremented.
    #[instrument(skip(self))]
    pub async fn fetch_instruments(&self, today: NaiveDate) -> Result<FetchedSheet, IngestError> {
        let months = period::months_between(constants::INSTRUMENT_EPOCH, today);

        for suffix in [months, months - 1] {
            let url = format!("{}{}.xlsx", self.instrument_base_url, suffix);
            if let Some(bytes) = self.try_get(Feed::Instruments, &url).await? {
                info!(suffix, "Instrument workbook fetched");
                return Ok(FetchedSheet {
                    bytes,
                    period_label: suffix.to_string(),
                });
            }
            warn!(suffix, "Instrument workbook not found, stepping back one month");
        }

        Err(IngestError::Fetch {
            feed: Feed::Instruments,
            status: Some(404),
            message: "Instrument workbook not found for the current or previous month."
                .to_string(),
        })
    }

    /// Monthly equity statistics workbook for the previous calendar
    /// month, falling back to the month before that.
    #[instrument(skip(self))]
    pub async fn fetch_monthly_equity(
        &self,
        today: NaiveDate,
    ) -> Result<FetchedSheet, IngestError> {
        let last_month = period::previous_month_end(today);
        let month_before = period::previous_month_end(last_month);

        for month in [last_month, month_before] {
            let label = period::month_label(month);
            let url = format!(
                "{}{}.xlsx",
                self.monthly_equity_base_url,
                period::url_encode_label(&label)
            );
            if let Some(bytes) = self.try_get(Feed::MonthlyVolumes, &url).await? {
                info!(period = %label, "Monthly equity volume workbook fetched");
                return Ok(FetchedSheet {
                    bytes,
                    period_label: label,
                });
            }
            warn!(period = %label, "Monthly equity volume workbook not found");
        }

        Err(IngestError::Fetch {
            feed: Feed::MonthlyVolumes,
            status: Some(404),
            message: "Failed to fetch data for both months.".to_string(),
        })
    }

    /// Paired ETP statistics workbook; reuses the period label of
    /// whichever month the equity fetch landed on. No further fallback.
    #[instrument(skip(self))]
    pub async fn fetch_monthly_etp(&self, period_label: &str) -> Result<FetchedSheet, IngestError> {
        let url = format!(
            "{}{}.xlsx",
            self.monthly_etp_base_url,
            period::url_encode_label(period_label)
        );
        match self.try_get(Feed::MonthlyVolumes, &url).await? {
            Some(bytes) => {
                info!(period = %period_label, "Monthly ETP volume workbook fetched");
                Ok(FetchedSheet {
                    bytes,
                    period_label: period_label.to_string(),
                })
            }
            None => Err(IngestError::Fetch {
                feed: Feed::MonthlyVolumes,
                status: Some(404),
                message: format!("ETP monthly workbook for {period_label} not found."),
            }),
        }
    }

    /// Weekly statistics workbook for the most recent Friday on or
    /// before today; a 404 retries with the Friday one week earlier.
    #[instrument(skip(self))]
    pub async fn fetch_weekly(&self, today: NaiveDate) -> Result<FetchedSheet, IngestError> {
        for weeks_ago in [0, 1] {
            let friday = period::previous_friday(today, weeks_ago);
            let label = period::weekly_label(friday);
            let url = format!(
                "{}{}.xlsx",
                self.weekly_base_url,
                period::url_encode_label(&label)
            );
            if let Some(bytes) = self.try_get(Feed::WeeklyVolumes, &url).await? {
                info!(period = %label, "Weekly volume workbook fetched");
                return Ok(FetchedSheet {
                    bytes,
                    period_label: label,
                });
            }
            warn!(period = %label, "Weekly volume workbook not found, trying previous week");
        }

        Err(IngestError::Fetch {
            feed: Feed::WeeklyVolumes,
            status: Some(404),
            message: "Weekly workbook not found for the last two Fridays.".to_string(),
        })
    }
}
