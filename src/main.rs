use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use lse_portfolio_tracker::api::{routes, state::AppState};
use lse_portfolio_tracker::config::Config;
use lse_portfolio_tracker::db;
use lse_portfolio_tracker::fetch::SpreadsheetFetcher;
use lse_portfolio_tracker::logging;
use lse_portfolio_tracker::storage::ObjectStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    logging::init_logging();

    // Load configuration (shared HTTP client included)
    let cfg = Config::load();
    info!(listen_addr = %cfg.listen_addr, "Configuration loaded and logging initialized");

    // Database pool, with the schema ensured at startup
    let pool = db::connection::create_pool(&cfg).await?;
    db::schema::init_schema(&pool).await?;
    info!("Database pool created and schema initialized");

    let state = Arc::new(AppState {
        fetcher: SpreadsheetFetcher::new(&cfg),
        storage: ObjectStore::new(&cfg),
        pool,
    });

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!(addr = %cfg.listen_addr, "Starting server");
    axum::serve(listener, app).await?;

    Ok(())
}
