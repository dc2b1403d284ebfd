use sqlx::PgPool;

use crate::fetch::SpreadsheetFetcher;
use crate::storage::ObjectStore;

/// Shared application state handed to every handler.
pub struct AppState {
    pub pool: PgPool,
    pub fetcher: SpreadsheetFetcher,
    pub storage: ObjectStore,
}
