use sqlx::{Postgres, Transaction};

use crate::db::models::volumes::{NewMonthlyVolumeModel, NewWeeklyVolumeModel};

pub async fn delete_all_monthly(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM monthly_volumes")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert_monthly(
    tx: &mut Transaction<'_, Postgres>,
    volume: &NewMonthlyVolumeModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO monthly_volumes (
            ticker, isin, gbp_turnover, number_of_trades, volume, avg_trade_size
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&volume.ticker)
    .bind(&volume.isin)
    .bind(volume.gbp_turnover)
    .bind(volume.number_of_trades)
    .bind(volume.volume)
    .bind(volume.avg_trade_size)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_all_weekly(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM weekly_volumes")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert_weekly(
    tx: &mut Transaction<'_, Postgres>,
    volume: &NewWeeklyVolumeModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO weekly_volumes (
            ticker, isin, gbp_turnover, number_of_trades, avg_spread, avg_trade_size
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&volume.ticker)
    .bind(&volume.isin)
    .bind(volume.gbp_turnover)
    .bind(volume.number_of_trades)
    .bind(volume.avg_spread)
    .bind(volume.avg_trade_size)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
