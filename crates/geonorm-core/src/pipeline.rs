//! The single-pass normalization pipeline.
//!
//! Fail-fast ordering: strategy errors surface before any row is
//! touched. Per-row problems never abort the batch; they degrade to
//! nulls and unresolved levels in the emitted records.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use geonorm_gazetteer::{Gazetteer, PlaceNameInput, Resolver, ResolverOptions};
use geonorm_map::{GeoStrategy, select_strategy};
use geonorm_model::{
    CanonicalRecord, MapperSchema, RawGeoValue, ResolvedGeo, RowResolution, Table,
};
use geonorm_transform::{expand, parse_coordinate, parse_lat_lon_pair, records_to_frame};

use crate::report::RunReport;

/// Output of one normalization pass: the two record streams plus run
/// accounting.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub numeric: Vec<CanonicalRecord>,
    pub text: Vec<CanonicalRecord>,
    pub report: RunReport,
}

impl Normalized {
    /// The numeric stream as a typed frame.
    pub fn numeric_frame(&self) -> Result<DataFrame> {
        Ok(records_to_frame(&self.numeric)?)
    }

    /// The string stream as a typed frame.
    pub fn text_frame(&self) -> Result<DataFrame> {
        Ok(records_to_frame(&self.text)?)
    }
}

/// Normalize one wide table into canonical long-format streams.
///
/// Rows are independent and processed in order against a shared
/// read-only gazetteer, so repeated runs over the same inputs produce
/// identical output.
pub fn normalize(
    table: &Table,
    schema: &MapperSchema,
    gazetteer: &Gazetteer,
    options: &ResolverOptions,
) -> Result<Normalized> {
    let strategy = select_strategy(schema)?;
    info!(?strategy, rows = table.row_count(), "normalizing table");

    let mut resolver = Resolver::new(gazetteer, *options);
    let mut resolutions = Vec::with_capacity(table.row_count());
    let mut unresolved_rows = 0usize;
    for row in 0..table.row_count() {
        let resolution = resolve_row(table, row, &strategy, &mut resolver);
        if resolution.geo.is_fully_unresolved() {
            unresolved_rows += 1;
        }
        resolutions.push(resolution);
    }
    if unresolved_rows > 0 {
        warn!(unresolved_rows, "rows with no resolved geography");
    }

    let streams = expand(table, schema, &resolutions);
    let report = RunReport {
        rows: table.row_count(),
        numeric_records: streams.numeric.len(),
        text_records: streams.text.len(),
        unresolved_rows,
    };
    info!(%report, "normalization complete");
    Ok(Normalized {
        numeric: streams.numeric,
        text: streams.text,
        report,
    })
}

fn resolve_row(
    table: &Table,
    row: usize,
    strategy: &GeoStrategy,
    resolver: &mut Resolver<'_>,
) -> RowResolution {
    match strategy {
        GeoStrategy::LatLonPair {
            lat_column,
            lon_column,
        } => {
            let raw = raw_values(table, row, [Some(lat_column), Some(lon_column)]);
            let lat_cell = cell(table, row, lat_column);
            let lon_cell = cell(table, row, lon_column);
            resolve_coordinates(parse_lat_lon_pair(lat_cell, lon_cell), raw, resolver)
        }
        GeoStrategy::Coordinate { column, format } => {
            let raw = raw_values(table, row, [Some(column), None]);
            let value = cell(table, row, column);
            resolve_coordinates(parse_coordinate(value, *format), raw, resolver)
        }
        GeoStrategy::PlaceName {
            iso2,
            iso3,
            country,
            admin1,
            admin2,
            admin3,
        } => {
            let columns = [iso2, iso3, country, admin1, admin2, admin3];
            let mut cells = columns.map(|column| {
                column.as_deref().map(|name| cell(table, row, name)).and_then(
                    |value| (!value.is_empty()).then(|| value.to_string()),
                )
            });
            let raw = columns
                .iter()
                .zip(&cells)
                .filter_map(|(column, value)| {
                    Some(RawGeoValue {
                        column: column.as_deref()?.to_string(),
                        value: value.clone()?,
                    })
                })
                .collect();
            let [iso2, iso3, country, admin1, admin2, admin3] =
                std::array::from_fn(|i| cells[i].take());
            let input = PlaceNameInput {
                iso2,
                iso3,
                country,
                admin1,
                admin2,
                admin3,
            };
            let mut geo = resolver.resolve_names(&input);
            geo.raw = raw;
            RowResolution {
                geo,
                latitude: None,
                longitude: None,
            }
        }
    }
}

fn resolve_coordinates(
    parsed: Option<(f64, f64)>,
    raw: Vec<RawGeoValue>,
    resolver: &mut Resolver<'_>,
) -> RowResolution {
    match parsed {
        Some((latitude, longitude)) => {
            let mut geo = resolver.resolve_point(latitude, longitude);
            geo.raw = raw;
            RowResolution {
                geo,
                latitude: Some(latitude),
                longitude: Some(longitude),
            }
        }
        None => RowResolution {
            geo: ResolvedGeo::unresolved(raw),
            latitude: None,
            longitude: None,
        },
    }
}

fn cell<'t>(table: &'t Table, row: usize, column: &str) -> &'t str {
    table
        .column_index(column)
        .map(|index| table.value(row, index))
        .unwrap_or("")
}

fn raw_values(table: &Table, row: usize, columns: [Option<&String>; 2]) -> Vec<RawGeoValue> {
    columns
        .into_iter()
        .flatten()
        .filter_map(|column| {
            let value = cell(table, row, column);
            (!value.is_empty()).then(|| RawGeoValue {
                column: column.clone(),
                value: value.to_string(),
            })
        })
        .collect()
}
