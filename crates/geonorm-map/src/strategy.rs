//! Geo-strategy selection.
//!
//! Inspects the `primary_geo` columns of a validated schema and picks
//! exactly one resolution strategy. When a schema plausibly matches
//! more than one, the most geometrically precise strategy wins:
//! lat/lon pair, then combined coordinate, then place names.

use thiserror::Error;

use geonorm_model::{CoordFormat, GeoRole, MapperSchema};

/// The geographic-identity strategy chosen for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoStrategy {
    /// Separate latitude and longitude columns, mutually paired.
    LatLonPair { lat_column: String, lon_column: String },
    /// A single column encoding both coordinates.
    Coordinate { column: String, format: CoordFormat },
    /// Country/admin/ISO name columns.
    PlaceName {
        iso2: Option<String>,
        iso3: Option<String>,
        country: Option<String>,
        admin1: Option<String>,
        admin2: Option<String>,
        admin3: Option<String>,
    },
}

/// No resolution strategy could be derived from the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("no primary_geo columns match a resolution strategy")]
    Ambiguous,
}

/// Pick the resolution strategy for a validated schema.
///
/// # Errors
///
/// [`StrategyError::Ambiguous`] when none of the three patterns match.
pub fn select_strategy(schema: &MapperSchema) -> Result<GeoStrategy, StrategyError> {
    // Precedence 1: paired latitude/longitude columns.
    let lat = schema.primary_geo_with_role(GeoRole::Latitude);
    let lon = schema.primary_geo_with_role(GeoRole::Longitude);
    if let (Some(lat), Some(lon)) = (lat, lon) {
        return Ok(GeoStrategy::LatLonPair {
            lat_column: lat.name.clone(),
            lon_column: lon.name.clone(),
        });
    }

    // Precedence 2: a combined coordinate column. The interpreter
    // guarantees a primary coordinates column carries a format.
    if let Some(coord) = schema.primary_geo_with_role(GeoRole::Coordinates) {
        if let Some(format) = coord.coord_format {
            return Ok(GeoStrategy::Coordinate {
                column: coord.name.clone(),
                format,
            });
        }
    }

    // Precedence 3: place-name columns.
    if schema.primary_geo().any(|g| g.role.is_place_name()) {
        let column = |role: GeoRole| {
            schema
                .primary_geo_with_role(role)
                .map(|g| g.name.clone())
        };
        return Ok(GeoStrategy::PlaceName {
            iso2: column(GeoRole::Iso2),
            iso3: column(GeoRole::Iso3),
            country: column(GeoRole::Country),
            admin1: column(GeoRole::Admin1),
            admin2: column(GeoRole::Admin2),
            admin3: column(GeoRole::Admin3),
        });
    }

    Err(StrategyError::Ambiguous)
}
