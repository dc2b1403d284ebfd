use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{handlers, state::AppState};

/// Create the main application router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Ingestion endpoints, triggered manually or by a scheduler
        .route(
            "/investment/update-instruments",
            get(handlers::ingest::update_instruments),
        )
        .route(
            "/investment/update-monthly",
            get(handlers::ingest::update_monthly_volumes),
        )
        .route(
            "/investment/update-weekly",
            get(handlers::ingest::update_weekly_volumes),
        )
        .route(
            "/investment/fetch-tradingview",
            get(handlers::ingest::fetch_tradingview),
        )
        .route(
            "/investment/download-no-metadata",
            get(handlers::ingest::download_no_metadata),
        )
        // Consolidated watchlist view
        .route(
            "/investment/tradingview",
            get(handlers::market::list_enriched_ratings),
        )
        // Watchlist membership
        .route(
            "/investment/add-to-watchlist",
            post(handlers::watchlist::add_to_watchlist),
        )
        .route(
            "/investment/delete-from-watchlist/:id",
            delete(handlers::watchlist::delete_from_watchlist),
        )
        // Portfolio
        .route(
            "/investment/get-current-investments",
            get(handlers::portfolio::get_current_investments),
        )
        .route("/investment/get-books", get(handlers::portfolio::get_books))
        .route(
            "/investment/update-current-investments",
            put(handlers::portfolio::update_current_investment),
        )
        // Shared state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
