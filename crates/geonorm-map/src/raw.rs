//! Unvalidated mapper document as it arrives on disk.
//!
//! Role fields are kept as free strings here so validation can report
//! every unknown value instead of failing at the first one during
//! deserialization.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMapper {
    #[serde(default)]
    pub geo: Vec<RawGeoAnnotation>,
    #[serde(default)]
    pub date: Vec<RawDateAnnotation>,
    #[serde(default)]
    pub feature: Vec<RawFeatureAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGeoAnnotation {
    pub name: String,
    pub geo_type: String,
    #[serde(default)]
    pub primary_geo: bool,
    #[serde(default)]
    pub is_geo_pair: Option<String>,
    #[serde(default)]
    pub coord_format: Option<String>,
    #[serde(default)]
    pub qualifies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDateAnnotation {
    pub name: String,
    pub date_type: String,
    #[serde(default)]
    pub primary_date: bool,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub qualifies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFeatureAnnotation {
    pub name: String,
    pub feature_type: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub qualifies: Vec<String>,
}
