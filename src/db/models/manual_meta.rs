/// Analyst-curated classification for one ticker. Geography references
/// are nullable; unmatched names degrade to null at load time.
#[derive(Debug, Clone)]
pub struct NewManualMetaModel {
    pub ticker: String,
    pub asset_class: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub objective: String,
    pub emerging_mkt: bool,
    pub leverage_typ: Option<String>,
    pub hedge_ccy: Option<String>,
    pub single_stock: bool,
}

impl NewManualMetaModel {
    /// A "Global" region has no meaningful sub-region or country; both
    /// are cleared here so every write path enforces it.
    pub fn normalized(mut self) -> Self {
        if self.region.as_deref() == Some("Global") {
            self.sub_region = None;
            self.country = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewManualMetaModel {
        NewManualMetaModel {
            ticker: "VWRL".to_string(),
            asset_class: "Equity".to_string(),
            country: Some("United Kingdom".to_string()),
            region: Some("Global".to_string()),
            sub_region: Some("Northern Europe".to_string()),
            objective: "Core".to_string(),
            emerging_mkt: false,
            leverage_typ: None,
            hedge_ccy: None,
            single_stock: false,
        }
    }

    #[test]
    fn global_region_clears_country_and_sub_region() {
        let m = sample().normalized();
        assert_eq!(m.region.as_deref(), Some("Global"));
        assert_eq!(m.country, None);
        assert_eq!(m.sub_region, None);
    }

    #[test]
    fn non_global_region_keeps_geography() {
        let mut m = sample();
        m.region = Some("Europe".to_string());
        let m = m.normalized();
        assert_eq!(m.country.as_deref(), Some("United Kingdom"));
        assert_eq!(m.sub_region.as_deref(), Some("Northern Europe"));
    }
}
