use sqlx::{Postgres, Transaction};

// Advisory lock keys, one per wholesale-replaced table. Two overlapping
// ingestion calls for the same feed serialize on these instead of
// interleaving the delete+insert pair.
pub const LOCK_EQUITIES: i64 = 1;
pub const LOCK_BONDS: i64 = 2;
pub const LOCK_ETPS: i64 = 3;
pub const LOCK_MONTHLY_VOLUMES: i64 = 4;
pub const LOCK_WEEKLY_VOLUMES: i64 = 5;
pub const LOCK_RATINGS: i64 = 6;

/// Take a transaction-scoped advisory lock; released automatically on
/// commit or rollback.
pub async fn advisory_xact_lock(
    tx: &mut Transaction<'_, Postgres>,
    key: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
