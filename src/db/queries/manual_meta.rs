use sqlx::{Postgres, Transaction};

use crate::db::models::manual_meta::NewManualMetaModel;

pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM manual_meta")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    meta: &NewManualMetaModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO manual_meta (
            ticker, asset_class, country, region, sub_region, objective,
            emerging_mkt, leverage_typ, hedge_ccy, single_stock
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (ticker) DO NOTHING
        "#,
    )
    .bind(&meta.ticker)
    .bind(&meta.asset_class)
    .bind(&meta.country)
    .bind(&meta.region)
    .bind(&meta.sub_region)
    .bind(&meta.objective)
    .bind(meta.emerging_mkt)
    .bind(&meta.leverage_typ)
    .bind(&meta.hedge_ccy)
    .bind(meta.single_stock)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
