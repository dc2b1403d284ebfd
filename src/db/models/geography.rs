/// Reference geography rows loaded from operator CSVs. Parent
/// references are resolved against the already-loaded level and fall
/// back to null when the source data is incomplete.

#[derive(Debug, Clone)]
pub struct NewRegionModel {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewSubRegionModel {
    pub name: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCountryModel {
    pub name: String,
    pub alpha_2: String,
    pub sub_region: Option<String>,
}
