use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashSet;

use crate::db::models::geography::{NewCountryModel, NewRegionModel, NewSubRegionModel};

// Deleting a level cascades down the hierarchy, so rebuilds run
// top-down: regions, then sub-regions, then countries.

pub async fn delete_all_regions(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM regions").execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

pub async fn insert_region(
    tx: &mut Transaction<'_, Postgres>,
    region: &NewRegionModel,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO regions (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(&region.name)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn delete_all_sub_regions(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sub_regions")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert_sub_region(
    tx: &mut Transaction<'_, Postgres>,
    sub_region: &NewSubRegionModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sub_regions (name, region) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
    )
    .bind(&sub_region.name)
    .bind(&sub_region.region)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_all_countries(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM countries")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert_country(
    tx: &mut Transaction<'_, Postgres>,
    country: &NewCountryModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO countries (name, alpha_2, sub_region)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(&country.name)
    .bind(&country.alpha_2)
    .bind(&country.sub_region)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn region_names(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM regions")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn sub_region_names(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM sub_regions")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn country_names(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM countries")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}
