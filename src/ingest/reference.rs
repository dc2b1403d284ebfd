//! Reference-data loaders: the geography hierarchy and the analyst
//! classification sheet come from operator-maintained CSV files, and
//! the small book/currency sets are seeded in code. Missing parent
//! lookups degrade to null references; this is the one documented place
//! where bad data is absorbed instead of failing the row.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument};

use crate::db::models::geography::{NewCountryModel, NewRegionModel, NewSubRegionModel};
use crate::db::models::manual_meta::NewManualMetaModel;
use crate::db::queries::{geography, manual_meta, portfolio};
use crate::error::IngestError;

pub const BOOKS: [&str; 3] = ["ISA", "SIPP", "Trading"];

/// Currency codes with their GBP conversion multiplier.
pub const CURRENCIES: [(&str, f64); 3] = [("EUR", 1.0), ("USD", 1.0), ("GBX", 0.1)];

#[derive(Debug, Deserialize)]
struct RegionRow {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubRegionRow {
    name: Option<String>,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    name: Option<String>,
    alpha_2: Option<String>,
    sub_region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveRow {
    ticker: Option<String>,
    asset_class: Option<String>,
    country: Option<String>,
    region: Option<String>,
    sub_region: Option<String>,
    objective: Option<String>,
    emerging_mkt: Option<String>,
    leverage_typ: Option<String>,
    hedge_ccy: Option<String>,
    single_stock: Option<String>,
}

#[instrument(skip(pool))]
pub async fn load_regions(pool: &PgPool, path: &Path) -> Result<usize, IngestError> {
    let rows: Vec<RegionRow> = read_csv(path)?;

    let mut tx = pool.begin().await?;
    geography::delete_all_regions(&mut tx).await?;
    let mut count = 0;
    for row in rows {
        if let Some(name) = opt(row.name) {
            geography::insert_region(&mut tx, &NewRegionModel { name }).await?;
            count += 1;
        }
    }
    tx.commit().await?;

    info!(count, "Region table rebuilt");
    Ok(count)
}

#[instrument(skip(pool))]
pub async fn load_sub_regions(pool: &PgPool, path: &Path) -> Result<usize, IngestError> {
    let known_regions = geography::region_names(pool).await?;
    let rows: Vec<SubRegionRow> = read_csv(path)?;

    let mut tx = pool.begin().await?;
    geography::delete_all_sub_regions(&mut tx).await?;
    let mut count = 0;
    for row in rows {
        let Some(name) = opt(row.name) else { continue };
        let region = resolve_parent(opt(row.region), &known_regions);
        geography::insert_sub_region(&mut tx, &NewSubRegionModel { name, region }).await?;
        count += 1;
    }
    tx.commit().await?;

    info!(count, "Sub-region table rebuilt");
    Ok(count)
}

#[instrument(skip(pool))]
pub async fn load_countries(pool: &PgPool, path: &Path) -> Result<usize, IngestError> {
    let known_sub_regions = geography::sub_region_names(pool).await?;
    let rows: Vec<CountryRow> = read_csv(path)?;

    let mut tx = pool.begin().await?;
    geography::delete_all_countries(&mut tx).await?;
    let mut count = 0;
    for row in rows {
        let Some(name) = opt(row.name) else { continue };
        let Some(alpha_2) = opt(row.alpha_2) else { continue };
        let sub_region = resolve_parent(opt(row.sub_region), &known_sub_regions);
        geography::insert_country(
            &mut tx,
            &NewCountryModel {
                name,
                alpha_2,
                sub_region,
            },
        )
        .await?;
        count += 1;
    }
    tx.commit().await?;

    info!(count, "Country table rebuilt");
    Ok(count)
}

#[instrument(skip(pool))]
pub async fn load_manual_meta(pool: &PgPool, path: &Path) -> Result<usize, IngestError> {
    let known_regions = geography::region_names(pool).await?;
    let known_sub_regions = geography::sub_region_names(pool).await?;
    let known_countries = geography::country_names(pool).await?;
    let rows: Vec<ObjectiveRow> = read_csv(path)?;

    let mut tx = pool.begin().await?;
    manual_meta::delete_all(&mut tx).await?;
    let mut count = 0;
    for row in rows {
        let Some(ticker) = opt(row.ticker) else { continue };
        // A blank region means globally diversified
        let region_name = opt(row.region).unwrap_or_else(|| "Global".to_string());

        let model = NewManualMetaModel {
            ticker,
            asset_class: opt(row.asset_class).unwrap_or_default(),
            country: resolve_parent(opt(row.country), &known_countries),
            region: resolve_parent(Some(region_name), &known_regions),
            sub_region: resolve_parent(opt(row.sub_region), &known_sub_regions),
            objective: opt(row.objective).unwrap_or_default(),
            emerging_mkt: parse_bool(row.emerging_mkt.as_deref()),
            leverage_typ: opt(row.leverage_typ),
            hedge_ccy: opt(row.hedge_ccy),
            single_stock: parse_bool(row.single_stock.as_deref()),
        }
        .normalized();

        manual_meta::insert(&mut tx, &model).await?;
        count += 1;
    }
    tx.commit().await?;

    info!(count, "Manual classification table rebuilt");
    Ok(count)
}

#[instrument(skip(pool))]
pub async fn seed_books_and_currencies(pool: &PgPool) -> Result<(), IngestError> {
    for name in BOOKS {
        portfolio::upsert_book(pool, name).await?;
    }
    for (name, gbp_value) in CURRENCIES {
        portfolio::upsert_currency(pool, name, gbp_value).await?;
    }
    info!("Books and currencies seeded");
    Ok(())
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| IngestError::Parse(format!("Failed to read {}: {e}", path.display())))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| IngestError::Parse(format!("Failed to parse {}: {e}", path.display())))
}

/// Treat blank and NA markers as absent.
fn opt(value: Option<String>) -> Option<String> {
    let v = value?.trim().to_string();
    match v.as_str() {
        "" | "NA" | "N/A" => None,
        _ => Some(v),
    }
}

/// Keep a parent reference only when the parent actually exists; the
/// row is still created, just with a null reference.
fn resolve_parent(name: Option<String>, known: &HashSet<String>) -> Option<String> {
    name.filter(|n| known.contains(n))
}

fn parse_bool(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("true") | Some("1") | Some("yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_falls_back_to_null_reference() {
        let known: HashSet<String> = ["Europe".to_string()].into_iter().collect();
        assert_eq!(
            resolve_parent(Some("Atlantis".to_string()), &known),
            None
        );
        assert_eq!(
            resolve_parent(Some("Europe".to_string()), &known),
            Some("Europe".to_string())
        );
    }

    #[test]
    fn na_markers_read_as_absent() {
        assert_eq!(opt(Some("NA".to_string())), None);
        assert_eq!(opt(Some("  ".to_string())), None);
        assert_eq!(opt(Some("Asia".to_string())), Some("Asia".to_string()));
        assert_eq!(opt(None), None);
    }

    #[test]
    fn python_style_booleans_parse() {
        assert!(parse_bool(Some("True")));
        assert!(parse_bool(Some("true")));
        assert!(!parse_bool(Some("False")));
        assert!(!parse_bool(None));
    }
}
