use sqlx::{PgPool, Postgres, Transaction};

use crate::db::models::instruments::{NewBondModel, NewEquityModel, NewEtpModel};

pub async fn delete_all_equities(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM equities").execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

pub async fn insert_equity(
    tx: &mut Transaction<'_, Postgres>,
    equity: &NewEquityModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO equities (
            ticker, issuer_name, instrument_name, isin, mifir_identifier_code,
            icb_industry, icb_super_sector, start_date, country_of_incorporation,
            trading_currency, mkt_cap_mm, lse_market, fca_listing_category,
            market_segment_code, market_sector_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(&equity.ticker)
    .bind(&equity.issuer_name)
    .bind(&equity.instrument_name)
    .bind(&equity.isin)
    .bind(&equity.mifir_identifier_code)
    .bind(&equity.icb_industry)
    .bind(&equity.icb_super_sector)
    .bind(equity.start_date)
    .bind(&equity.country_of_incorporation)
    .bind(&equity.trading_currency)
    .bind(equity.mkt_cap_mm)
    .bind(&equity.lse_market)
    .bind(&equity.fca_listing_category)
    .bind(&equity.market_segment_code)
    .bind(&equity.market_sector_code)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_all_bonds(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bonds").execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

pub async fn insert_bond(
    tx: &mut Transaction<'_, Postgres>,
    bond: &NewBondModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO bonds (
            ticker, issuer_name, instrument_name, isin, mifir_identifier_code,
            mifir_sub_class_code, mifir_sub_class_name, start_date, maturity_date,
            coupon_interest_rate, country_of_incorporation, trading_currency,
            lse_market, fca_listing_category, market_segment_code, market_sector_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(&bond.ticker)
    .bind(&bond.issuer_name)
    .bind(&bond.instrument_name)
    .bind(&bond.isin)
    .bind(&bond.mifir_identifier_code)
    .bind(&bond.mifir_sub_class_code)
    .bind(&bond.mifir_sub_class_name)
    .bind(bond.start_date)
    .bind(bond.maturity_date)
    .bind(bond.coupon_interest_rate)
    .bind(&bond.country_of_incorporation)
    .bind(&bond.trading_currency)
    .bind(&bond.lse_market)
    .bind(&bond.fca_listing_category)
    .bind(&bond.market_segment_code)
    .bind(&bond.market_sector_code)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_all_etps(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM etps").execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

pub async fn insert_etp(
    tx: &mut Transaction<'_, Postgres>,
    etp: &NewEtpModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO etps (
            ticker, issuer_name, instrument_name, isin, mifir_identifier_code,
            start_date, country_of_incorporation, trading_currency, lse_market,
            fca_listing_category, market_segment_code, market_sector_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(&etp.ticker)
    .bind(&etp.issuer_name)
    .bind(&etp.instrument_name)
    .bind(&etp.isin)
    .bind(&etp.mifir_identifier_code)
    .bind(etp.start_date)
    .bind(&etp.country_of_incorporation)
    .bind(&etp.trading_currency)
    .bind(&etp.lse_market)
    .bind(&etp.fca_listing_category)
    .bind(&etp.market_segment_code)
    .bind(&etp.market_sector_code)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Used by the position ledger to validate trade tickers.
pub async fn etp_exists(pool: &PgPool, ticker: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM etps WHERE ticker = $1)")
        .bind(ticker)
        .fetch_one(pool)
        .await
}
