use dotenvy::dotenv;
use reqwest::Client;
use std::env;
use std::time::Duration;

use crate::constants;

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub http_client: Client,
    pub instrument_base_url: String,
    pub monthly_equity_base_url: String,
    pub monthly_etp_base_url: String,
    pub weekly_base_url: String,
    pub storage_base_url: String,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("Missing DATABASE_URL");
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        // Feed URLs default to the exchange's publication paths but stay
        // overridable so a fixture server can stand in for them.
        let instrument_base_url = env::var("INSTRUMENT_BASE_URL")
            .unwrap_or_else(|_| constants::INSTRUMENT_BASE_URL.to_string());
        let monthly_equity_base_url = env::var("MONTHLY_EQUITY_BASE_URL")
            .unwrap_or_else(|_| constants::MONTHLY_EQUITY_BASE_URL.to_string());
        let monthly_etp_base_url = env::var("MONTHLY_ETP_BASE_URL")
            .unwrap_or_else(|_| constants::MONTHLY_ETP_BASE_URL.to_string());
        let weekly_base_url =
            env::var("WEEKLY_BASE_URL").unwrap_or_else(|_| constants::WEEKLY_BASE_URL.to_string());
        let storage_base_url = env::var("STORAGE_BASE_URL").expect("Missing STORAGE_BASE_URL");

        let timeout_secs: u64 = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Config {
            database_url,
            listen_addr,
            http_client,
            instrument_base_url,
            monthly_equity_base_url,
            monthly_etp_base_url,
            weekly_base_url,
            storage_base_url,
        }
    }
}
