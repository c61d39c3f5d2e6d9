//! Validated column annotations and the mapper schema.
//!
//! A mapper document annotates each column of an input table with a
//! semantic role. The raw document is parsed and validated by
//! `geonorm-map`; the types here are the validated result consumed by
//! the rest of the pipeline.

use serde::{Deserialize, Serialize};

/// Semantic role of a geographic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoRole {
    Latitude,
    Longitude,
    /// A single column encoding both coordinates, e.g. `"12.5,-8.0"`.
    Coordinates,
    Country,
    Admin1,
    Admin2,
    Admin3,
    Iso2,
    Iso3,
}

impl GeoRole {
    /// Roles resolved by place-name lookup rather than geometry.
    pub fn is_place_name(self) -> bool {
        matches!(
            self,
            Self::Country | Self::Admin1 | Self::Admin2 | Self::Admin3 | Self::Iso2 | Self::Iso3
        )
    }
}

/// Parse pattern for a combined coordinate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordFormat {
    /// Decimal `"lat,lon"`.
    LatLon,
    /// Decimal `"lon,lat"`.
    LonLat,
    /// Sign- or hemisphere-qualified degree-minute-second pairs.
    Dms,
}

/// Kind of a date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    /// Formatted date string parsed with the annotation's `time_format`.
    Date,
    /// Already an epoch timestamp (seconds or milliseconds).
    Epoch,
    Year,
    Month,
    Day,
}

/// Value kind of a feature column. Routes the record to the numeric or
/// string output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Numeric,
    Str,
}

/// Annotation for a geographic column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAnnotation {
    /// Source column name.
    pub name: String,
    pub role: GeoRole,
    /// Marks the column(s) that drive geo-resolution.
    pub primary_geo: bool,
    /// For latitude/longitude columns: name of the paired column.
    pub is_geo_pair: Option<String>,
    /// For a coordinates column: how to split the value.
    pub coord_format: Option<CoordFormat>,
    /// Feature columns this column qualifies.
    pub qualifies: Vec<String>,
}

/// Annotation for a date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAnnotation {
    pub name: String,
    pub kind: DateKind,
    /// Marks the column supplying the output timestamp.
    pub primary_date: bool,
    /// strftime-style format, required when `kind` is [`DateKind::Date`].
    pub time_format: Option<String>,
    pub qualifies: Vec<String>,
}

/// Annotation for a feature (value-carrying) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAnnotation {
    pub name: String,
    pub value_kind: ValueKind,
    /// Output feature name override; defaults to the column name.
    pub display_name: Option<String>,
    pub units: Option<String>,
    pub qualifies: Vec<String>,
}

impl FeatureAnnotation {
    /// Name under which this feature appears in the output.
    pub fn output_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Validated mapping description of one input table.
///
/// Invariant (enforced by the interpreter in `geonorm-map`): the set of
/// roles marked `primary_geo` matches exactly one resolution strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperSchema {
    pub geo: Vec<GeoAnnotation>,
    pub date: Vec<DateAnnotation>,
    pub feature: Vec<FeatureAnnotation>,
}

impl MapperSchema {
    /// Geo annotations marked `primary_geo`, in schema order.
    pub fn primary_geo(&self) -> impl Iterator<Item = &GeoAnnotation> {
        self.geo.iter().filter(|g| g.primary_geo)
    }

    /// The first primary geo annotation with the given role.
    pub fn primary_geo_with_role(&self, role: GeoRole) -> Option<&GeoAnnotation> {
        self.primary_geo().find(|g| g.role == role)
    }

    /// The date annotation that supplies the output timestamp.
    ///
    /// Prefers an explicit `primary_date` column; falls back to the
    /// first date-kind column so a single un-flagged date column still
    /// produces timestamps.
    pub fn timestamp_source(&self) -> Option<&DateAnnotation> {
        self.date
            .iter()
            .find(|d| d.primary_date)
            .or_else(|| {
                self.date
                    .iter()
                    .find(|d| matches!(d.kind, DateKind::Date | DateKind::Epoch))
            })
    }

    /// Columns qualifying the named feature, in schema order
    /// (geo annotations first, then date, then feature).
    pub fn qualifiers_for(&self, feature_name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for g in &self.geo {
            if g.qualifies.iter().any(|q| q == feature_name) {
                out.push(g.name.as_str());
            }
        }
        for d in &self.date {
            if d.qualifies.iter().any(|q| q == feature_name) {
                out.push(d.name.as_str());
            }
        }
        for f in &self.feature {
            if f.qualifies.iter().any(|q| q == feature_name) {
                out.push(f.name.as_str());
            }
        }
        out
    }

    /// Feature columns that carry values (i.e. do not merely qualify
    /// another feature), in schema order.
    pub fn value_features(&self) -> impl Iterator<Item = &FeatureAnnotation> {
        self.feature.iter().filter(|f| f.qualifies.is_empty())
    }
}
