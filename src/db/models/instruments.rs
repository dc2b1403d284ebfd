use chrono::NaiveDate;

use crate::sheets::Record;

/// New equity row built from one parsed sheet row.
#[derive(Debug, Clone)]
pub struct NewEquityModel {
    pub ticker: String,
    pub issuer_name: String,
    pub instrument_name: String,
    pub isin: String,
    pub mifir_identifier_code: String,
    pub icb_industry: String,
    pub icb_super_sector: String,
    pub start_date: Option<NaiveDate>,
    pub country_of_incorporation: String,
    pub trading_currency: String,
    pub mkt_cap_mm: Option<f64>,
    pub lse_market: String,
    pub fca_listing_category: Option<String>,
    pub market_segment_code: String,
    pub market_sector_code: String,
}

impl NewEquityModel {
    pub fn from_record(record: &Record) -> Self {
        Self {
            ticker: record.text("ticker"),
            issuer_name: record.text("issuer_name"),
            instrument_name: record.text("instrument_name"),
            isin: record.text("isin"),
            mifir_identifier_code: record.text("mifir_identifier_code"),
            icb_industry: record.text("icb_industry"),
            icb_super_sector: record.text("icb_super_sector"),
            start_date: record.opt_date("start_date"),
            country_of_incorporation: record.text("country_of_incorporation"),
            trading_currency: record.text("trading_currency"),
            mkt_cap_mm: record.opt_f64("mkt_cap_mm"),
            lse_market: record.text("lse_market"),
            fca_listing_category: record.opt_text("fca_listing_category"),
            market_segment_code: record.text("market_segment_code"),
            market_sector_code: record.text("market_sector_code"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBondModel {
    pub ticker: String,
    pub issuer_name: String,
    pub instrument_name: String,
    pub isin: String,
    pub mifir_identifier_code: String,
    pub mifir_sub_class_code: String,
    pub mifir_sub_class_name: String,
    pub start_date: Option<NaiveDate>,
    /// Null for perpetual bonds (sentinel date in the source).
    pub maturity_date: Option<NaiveDate>,
    pub coupon_interest_rate: Option<f64>,
    pub country_of_incorporation: String,
    pub trading_currency: String,
    pub lse_market: String,
    pub fca_listing_category: Option<String>,
    pub market_segment_code: String,
    pub market_sector_code: String,
}

impl NewBondModel {
    pub fn from_record(record: &Record) -> Self {
        Self {
            ticker: record.text("ticker"),
            issuer_name: record.text("issuer_name"),
            instrument_name: record.text("instrument_name"),
            isin: record.text("isin"),
            mifir_identifier_code: record.text("mifir_identifier_code"),
            mifir_sub_class_code: record.text("mifir_sub_class_code"),
            mifir_sub_class_name: record.text("mifir_sub_class_name"),
            start_date: record.opt_date("start_date"),
            maturity_date: record.opt_date("maturity_date"),
            coupon_interest_rate: record.opt_f64("coupon_interest_rate"),
            country_of_incorporation: record.text("country_of_incorporation"),
            trading_currency: record.text("trading_currency"),
            lse_market: record.text("lse_market"),
            fca_listing_category: record.opt_text("fca_listing_category"),
            market_segment_code: record.text("market_segment_code"),
            market_sector_code: record.text("market_sector_code"),
        }
    }
}

/// Shared by the ETF, ETC and ETN sheets, which all land in one table.
#[derive(Debug, Clone)]
pub struct NewEtpModel {
    pub ticker: String,
    pub issuer_name: String,
    pub instrument_name: String,
    pub isin: String,
    pub mifir_identifier_code: String,
    pub start_date: Option<NaiveDate>,
    pub country_of_incorporation: String,
    pub trading_currency: String,
    pub lse_market: String,
    pub fca_listing_category: Option<String>,
    pub market_segment_code: String,
    pub market_sector_code: String,
}

impl NewEtpModel {
    pub fn from_record(record: &Record) -> Self {
        Self {
            ticker: record.text("ticker"),
            issuer_name: record.text("issuer_name"),
            instrument_name: record.text("instrument_name"),
            isin: record.text("isin"),
            mifir_identifier_code: record.text("mifir_identifier_code"),
            start_date: record.opt_date("start_date"),
            country_of_incorporation: record.text("country_of_incorporation"),
            trading_currency: record.text("trading_currency"),
            lse_market: record.text("lse_market"),
            fca_listing_category: record.opt_text("fca_listing_category"),
            market_segment_code: record.text("market_segment_code"),
            market_sector_code: record.text("market_sector_code"),
        }
    }
}
