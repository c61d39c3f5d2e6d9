//! Mapper schema parsing and exhaustive validation.
//!
//! Validation does not stop at the first problem: every per-column
//! violation is accumulated so the user sees the full list in one pass.

use thiserror::Error;

use geonorm_model::{
    CoordFormat, DateAnnotation, DateKind, FeatureAnnotation, GeoAnnotation, GeoRole, MapperSchema,
    ValueKind,
};

use crate::raw::RawMapper;

/// A single structural problem in the mapper document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("column '{column}': unknown geo_type '{value}'")]
    UnknownGeoRole { column: String, value: String },
    #[error("column '{column}': unknown date_type '{value}'")]
    UnknownDateKind { column: String, value: String },
    #[error("column '{column}': unknown feature_type '{value}'")]
    UnknownValueKind { column: String, value: String },
    #[error("column '{column}': unknown coord_format '{value}'")]
    UnknownCoordFormat { column: String, value: String },
    #[error("column '{column}' is annotated but not present in the table")]
    ColumnNotInTable { column: String },
    #[error("column '{column}' is annotated more than once")]
    DuplicateAnnotation { column: String },
    #[error("column '{column}': coord_format is only valid on a coordinates column")]
    CoordFormatOnNonCoordinates { column: String },
    #[error("column '{column}': primary coordinates column requires a coord_format")]
    MissingCoordFormat { column: String },
    #[error("column '{column}': primary {role} requires is_geo_pair naming its partner")]
    MissingGeoPair { column: String, role: String },
    #[error("column '{column}': is_geo_pair references '{pair}', which is not a {expected} column")]
    BadGeoPair {
        column: String,
        pair: String,
        expected: String,
    },
    #[error("column '{column}': date_type 'date' requires a time_format")]
    MissingTimeFormat { column: String },
    #[error("column '{column}': qualifies references '{target}', which is not a feature column")]
    QualifiesUnknownFeature { column: String, target: String },
}

/// Fatal configuration error: the mapper document is structurally
/// invalid. Carries every violation found.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("mapper document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{}", render_violations(.0))]
    Invalid(Vec<SchemaViolation>),
}

fn render_violations(violations: &[SchemaViolation]) -> String {
    let mut message = format!(
        "mapper schema validation failed with {} violation(s):",
        violations.len()
    );
    for violation in violations {
        message.push_str("\n  - ");
        message.push_str(&violation.to_string());
    }
    message
}

impl SchemaError {
    /// The accumulated violations, empty for parse errors.
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            Self::Parse(_) => &[],
            Self::Invalid(violations) => violations,
        }
    }
}

fn parse_geo_role(value: &str) -> Option<GeoRole> {
    // Accepts both the compact names and the legacy display vocabulary.
    match value.trim().to_lowercase().as_str() {
        "latitude" => Some(GeoRole::Latitude),
        "longitude" => Some(GeoRole::Longitude),
        "coordinates" => Some(GeoRole::Coordinates),
        "country" => Some(GeoRole::Country),
        "admin1" | "state/territory" => Some(GeoRole::Admin1),
        "admin2" | "county/district" => Some(GeoRole::Admin2),
        "admin3" | "municipality/town" => Some(GeoRole::Admin3),
        "iso2" => Some(GeoRole::Iso2),
        "iso3" => Some(GeoRole::Iso3),
        _ => None,
    }
}

fn parse_date_kind(value: &str) -> Option<DateKind> {
    match value.trim().to_lowercase().as_str() {
        "date" => Some(DateKind::Date),
        "epoch" => Some(DateKind::Epoch),
        "year" => Some(DateKind::Year),
        "month" => Some(DateKind::Month),
        "day" => Some(DateKind::Day),
        _ => None,
    }
}

fn parse_value_kind(value: &str) -> Option<ValueKind> {
    match value.trim().to_lowercase().as_str() {
        "int" | "float" | "numeric" => Some(ValueKind::Numeric),
        "str" | "string" | "boolean" | "binary" => Some(ValueKind::Str),
        _ => None,
    }
}

fn parse_coord_format(value: &str) -> Option<CoordFormat> {
    match value.trim().to_lowercase().as_str() {
        "latlon" => Some(CoordFormat::LatLon),
        "lonlat" => Some(CoordFormat::LonLat),
        "dms" => Some(CoordFormat::Dms),
        _ => None,
    }
}

/// Parse and validate a raw mapper document against the table headers.
///
/// # Errors
///
/// [`SchemaError::Parse`] when the document is not valid JSON;
/// [`SchemaError::Invalid`] with the full violation list otherwise.
pub fn interpret(raw_json: &str, headers: &[String]) -> Result<MapperSchema, SchemaError> {
    let raw: RawMapper = serde_json::from_str(raw_json)?;
    interpret_raw(&raw, headers)
}

/// Validate an already-deserialized raw document.
pub fn interpret_raw(raw: &RawMapper, headers: &[String]) -> Result<MapperSchema, SchemaError> {
    let mut violations = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let feature_names: Vec<&str> = raw.feature.iter().map(|f| f.name.as_str()).collect();

    let mut geo = Vec::with_capacity(raw.geo.len());
    for ann in &raw.geo {
        check_column(headers, &ann.name, &mut violations);
        check_duplicate(&mut seen, &ann.name, &mut violations);
        check_qualifies(&feature_names, &ann.name, &ann.qualifies, &mut violations);

        let Some(role) = parse_geo_role(&ann.geo_type) else {
            violations.push(SchemaViolation::UnknownGeoRole {
                column: ann.name.clone(),
                value: ann.geo_type.clone(),
            });
            continue;
        };

        let mut coord_format = None;
        if let Some(format) = &ann.coord_format {
            if role != GeoRole::Coordinates {
                violations.push(SchemaViolation::CoordFormatOnNonCoordinates {
                    column: ann.name.clone(),
                });
            } else if let Some(parsed) = parse_coord_format(format) {
                coord_format = Some(parsed);
            } else {
                violations.push(SchemaViolation::UnknownCoordFormat {
                    column: ann.name.clone(),
                    value: format.clone(),
                });
            }
        }
        if role == GeoRole::Coordinates && ann.primary_geo && coord_format.is_none() {
            violations.push(SchemaViolation::MissingCoordFormat {
                column: ann.name.clone(),
            });
        }

        geo.push(GeoAnnotation {
            name: ann.name.clone(),
            role,
            primary_geo: ann.primary_geo,
            is_geo_pair: ann.is_geo_pair.clone(),
            coord_format,
            qualifies: ann.qualifies.clone(),
        });
    }

    validate_geo_pairs(&geo, &mut violations);

    let mut date = Vec::with_capacity(raw.date.len());
    for ann in &raw.date {
        check_column(headers, &ann.name, &mut violations);
        check_duplicate(&mut seen, &ann.name, &mut violations);
        check_qualifies(&feature_names, &ann.name, &ann.qualifies, &mut violations);

        let Some(kind) = parse_date_kind(&ann.date_type) else {
            violations.push(SchemaViolation::UnknownDateKind {
                column: ann.name.clone(),
                value: ann.date_type.clone(),
            });
            continue;
        };
        if kind == DateKind::Date && ann.time_format.is_none() {
            violations.push(SchemaViolation::MissingTimeFormat {
                column: ann.name.clone(),
            });
        }

        date.push(DateAnnotation {
            name: ann.name.clone(),
            kind,
            primary_date: ann.primary_date,
            time_format: ann.time_format.clone(),
            qualifies: ann.qualifies.clone(),
        });
    }

    let mut feature = Vec::with_capacity(raw.feature.len());
    for ann in &raw.feature {
        check_column(headers, &ann.name, &mut violations);
        check_duplicate(&mut seen, &ann.name, &mut violations);
        check_qualifies(&feature_names, &ann.name, &ann.qualifies, &mut violations);

        let Some(value_kind) = parse_value_kind(&ann.feature_type) else {
            violations.push(SchemaViolation::UnknownValueKind {
                column: ann.name.clone(),
                value: ann.feature_type.clone(),
            });
            continue;
        };

        feature.push(FeatureAnnotation {
            name: ann.name.clone(),
            value_kind,
            display_name: ann.display_name.clone(),
            units: ann.units.clone(),
            qualifies: ann.qualifies.clone(),
        });
    }

    if violations.is_empty() {
        Ok(MapperSchema { geo, date, feature })
    } else {
        Err(SchemaError::Invalid(violations))
    }
}

fn check_column(headers: &[String], name: &str, violations: &mut Vec<SchemaViolation>) {
    if !headers.iter().any(|h| h == name) {
        violations.push(SchemaViolation::ColumnNotInTable {
            column: name.to_string(),
        });
    }
}

fn check_duplicate(seen: &mut Vec<String>, name: &str, violations: &mut Vec<SchemaViolation>) {
    if seen.iter().any(|s| s == name) {
        violations.push(SchemaViolation::DuplicateAnnotation {
            column: name.to_string(),
        });
    } else {
        seen.push(name.to_string());
    }
}

fn check_qualifies(
    feature_names: &[&str],
    column: &str,
    qualifies: &[String],
    violations: &mut Vec<SchemaViolation>,
) {
    for target in qualifies {
        if !feature_names.contains(&target.as_str()) {
            violations.push(SchemaViolation::QualifiesUnknownFeature {
                column: column.to_string(),
                target: target.clone(),
            });
        }
    }
}

/// A primary latitude/longitude must name its partner, and the partner
/// must exist with the opposite role.
fn validate_geo_pairs(geo: &[GeoAnnotation], violations: &mut Vec<SchemaViolation>) {
    for ann in geo.iter().filter(|g| g.primary_geo) {
        let (role_name, partner_role) = match ann.role {
            GeoRole::Latitude => ("latitude", GeoRole::Longitude),
            GeoRole::Longitude => ("longitude", GeoRole::Latitude),
            _ => continue,
        };
        let Some(pair) = &ann.is_geo_pair else {
            violations.push(SchemaViolation::MissingGeoPair {
                column: ann.name.clone(),
                role: role_name.to_string(),
            });
            continue;
        };
        let partner_ok = geo.iter().any(|g| &g.name == pair && g.role == partner_role);
        if !partner_ok {
            violations.push(SchemaViolation::BadGeoPair {
                column: ann.name.clone(),
                pair: pair.clone(),
                expected: match partner_role {
                    GeoRole::Latitude => "latitude".to_string(),
                    _ => "longitude".to_string(),
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn valid_latlon_schema_parses() {
        let doc = r#"{
            "geo": [
                {"name": "lat", "geo_type": "latitude", "primary_geo": true, "is_geo_pair": "lon"},
                {"name": "lon", "geo_type": "longitude", "primary_geo": true, "is_geo_pair": "lat"}
            ],
            "date": [
                {"name": "date", "date_type": "date", "primary_date": true, "time_format": "%Y-%m-%d"}
            ],
            "feature": [
                {"name": "rainfall", "feature_type": "float", "units": "mm"}
            ]
        }"#;
        let schema = interpret(doc, &headers(&["lat", "lon", "date", "rainfall"])).unwrap();
        assert_eq!(schema.geo.len(), 2);
        assert_eq!(schema.feature[0].value_kind, ValueKind::Numeric);
        assert_eq!(schema.feature[0].units.as_deref(), Some("mm"));
    }

    #[test]
    fn violations_accumulate_across_columns() {
        let doc = r#"{
            "geo": [
                {"name": "place", "geo_type": "galaxy", "primary_geo": true},
                {"name": "ghost", "geo_type": "country"}
            ],
            "date": [
                {"name": "when", "date_type": "date"}
            ],
            "feature": [
                {"name": "score", "feature_type": "complex"}
            ]
        }"#;
        let err = interpret(doc, &headers(&["place", "when", "score"])).unwrap_err();
        let violations = err.violations();
        // One pass reports all four problems: unknown role, missing
        // column, missing time_format, unknown value kind.
        assert_eq!(violations.len(), 4);
        assert!(violations.iter().any(|v| matches!(
            v,
            SchemaViolation::UnknownGeoRole { column, .. } if column == "place"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            SchemaViolation::ColumnNotInTable { column } if column == "ghost"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            SchemaViolation::MissingTimeFormat { column } if column == "when"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            SchemaViolation::UnknownValueKind { column, .. } if column == "score"
        )));
    }

    #[test]
    fn primary_latitude_requires_mutual_pair() {
        let doc = r#"{
            "geo": [
                {"name": "lat", "geo_type": "latitude", "primary_geo": true}
            ],
            "feature": [{"name": "v", "feature_type": "float"}]
        }"#;
        let err = interpret(doc, &headers(&["lat", "v"])).unwrap_err();
        assert!(err.violations().iter().any(|v| matches!(
            v,
            SchemaViolation::MissingGeoPair { column, .. } if column == "lat"
        )));
    }

    #[test]
    fn coord_format_rejected_outside_coordinates() {
        let doc = r#"{
            "geo": [
                {"name": "country", "geo_type": "country", "primary_geo": true, "coord_format": "latlon"}
            ],
            "feature": [{"name": "v", "feature_type": "float"}]
        }"#;
        let err = interpret(doc, &headers(&["country", "v"])).unwrap_err();
        assert!(err.violations().iter().any(|v| matches!(
            v,
            SchemaViolation::CoordFormatOnNonCoordinates { .. }
        )));
    }

    #[test]
    fn primary_coordinates_requires_format() {
        let doc = r#"{
            "geo": [
                {"name": "coords", "geo_type": "coordinates", "primary_geo": true}
            ],
            "feature": [{"name": "v", "feature_type": "float"}]
        }"#;
        let err = interpret(doc, &headers(&["coords", "v"])).unwrap_err();
        assert!(err.violations().iter().any(|v| matches!(
            v,
            SchemaViolation::MissingCoordFormat { .. }
        )));
    }

    #[test]
    fn qualifies_must_reference_feature() {
        let doc = r#"{
            "geo": [
                {"name": "region", "geo_type": "admin1", "qualifies": ["missing"]}
            ],
            "feature": [{"name": "v", "feature_type": "float"}]
        }"#;
        let err = interpret(doc, &headers(&["region", "v"])).unwrap_err();
        assert!(err.violations().iter().any(|v| matches!(
            v,
            SchemaViolation::QualifiesUnknownFeature { target, .. } if target == "missing"
        )));
    }

    #[test]
    fn legacy_role_vocabulary_accepted() {
        let doc = r#"{
            "geo": [
                {"name": "state", "geo_type": "state/territory", "primary_geo": true},
                {"name": "nation", "geo_type": "country", "primary_geo": true}
            ],
            "feature": [{"name": "v", "feature_type": "int"}]
        }"#;
        let schema = interpret(doc, &headers(&["state", "nation", "v"])).unwrap();
        assert_eq!(schema.geo[0].role, GeoRole::Admin1);
    }

    #[test]
    fn rendered_error_lists_every_violation() {
        let doc = r#"{
            "geo": [
                {"name": "place", "geo_type": "galaxy", "primary_geo": true}
            ],
            "feature": [{"name": "score", "feature_type": "complex"}]
        }"#;
        let err = interpret(doc, &headers(&["place", "score"])).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("2 violation(s)"), "{rendered}");
        assert!(rendered.contains("unknown geo_type 'galaxy'"), "{rendered}");
        assert!(
            rendered.contains("unknown feature_type 'complex'"),
            "{rendered}"
        );
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let err = interpret("{not json", &headers(&[])).unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
        assert!(err.violations().is_empty());
    }
}
