//! Rebuilds the reference tables from operator CSV files: geography
//! hierarchy top-down (regions, sub-regions, countries), then the
//! manual classification sheet, then the fixed book and currency sets.
//!
//! CSV files are read from REFERENCE_DATA_DIR (default "data"):
//! region.csv, sub_region.csv, country.csv, objectives.csv.

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::info;

use lse_portfolio_tracker::config::Config;
use lse_portfolio_tracker::db;
use lse_portfolio_tracker::ingest::reference;
use lse_portfolio_tracker::logging;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    logging::init_logging();

    let cfg = Config::load();
    let pool = db::connection::create_pool(&cfg).await?;
    db::schema::init_schema(&pool).await?;
    info!("Database pool created and schema initialized");

    let data_dir = PathBuf::from(env::var("REFERENCE_DATA_DIR").unwrap_or_else(|_| "data".to_string()));

    // The hierarchy loads top-down so each level can resolve its parent
    let regions = reference::load_regions(&pool, &data_dir.join("region.csv")).await?;
    println!("Successfully inserted {regions} regions.");

    let sub_regions = reference::load_sub_regions(&pool, &data_dir.join("sub_region.csv")).await?;
    println!("Successfully inserted {sub_regions} sub regions.");

    let countries = reference::load_countries(&pool, &data_dir.join("country.csv")).await?;
    println!("Successfully inserted {countries} countries.");

    let objectives = reference::load_manual_meta(&pool, &data_dir.join("objectives.csv")).await?;
    println!("Successfully inserted {objectives} objectives.");

    reference::seed_books_and_currencies(&pool).await?;
    println!("Finished populating currency and book tables.");

    Ok(())
}
