//! Canonical records to polars frames.

use polars::prelude::{DataFrame, NamedFrom, Series};

use geonorm_model::{CANONICAL_COLUMNS, CanonicalRecord, RecordValue};

use crate::error::TransformError;

/// Build a typed frame from one record stream.
///
/// Columns follow the canonical order, then one column per distinct
/// qualifier name in first-appearance order, null where a record's
/// feature does not carry it. The value column is Float64 for a numeric
/// stream and String otherwise; an empty stream builds as numeric.
pub fn records_to_frame(records: &[CanonicalRecord]) -> Result<DataFrame, TransformError> {
    let count = records.len();
    let mut timestamps: Vec<Option<i64>> = Vec::with_capacity(count);
    let mut countries: Vec<Option<String>> = Vec::with_capacity(count);
    let mut admin1s: Vec<Option<String>> = Vec::with_capacity(count);
    let mut admin2s: Vec<Option<String>> = Vec::with_capacity(count);
    let mut admin3s: Vec<Option<String>> = Vec::with_capacity(count);
    let mut lats: Vec<Option<f64>> = Vec::with_capacity(count);
    let mut lngs: Vec<Option<f64>> = Vec::with_capacity(count);
    let mut features: Vec<String> = Vec::with_capacity(count);
    let mut numeric_values: Vec<Option<f64>> = Vec::with_capacity(count);
    let mut text_values: Vec<Option<String>> = Vec::with_capacity(count);

    let mut qualifier_names: Vec<String> = Vec::new();
    for record in records {
        for (name, _) in &record.qualifiers {
            if !qualifier_names.iter().any(|n| n == name) {
                qualifier_names.push(name.clone());
            }
        }
    }
    let mut qualifier_values: Vec<Vec<Option<String>>> =
        vec![Vec::with_capacity(count); qualifier_names.len()];

    let is_numeric = records.first().is_none_or(|r| r.value.is_numeric());
    for record in records {
        timestamps.push(record.timestamp);
        countries.push(record.geo.country.clone());
        admin1s.push(record.geo.admin1.clone());
        admin2s.push(record.geo.admin2.clone());
        admin3s.push(record.geo.admin3.clone());
        lats.push(record.latitude);
        lngs.push(record.longitude);
        features.push(record.feature.clone());
        match &record.value {
            RecordValue::Numeric(value) => numeric_values.push(*value),
            RecordValue::Text(value) => text_values.push(value.clone()),
        }
        for (slot, name) in qualifier_names.iter().enumerate() {
            let value = record
                .qualifiers
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, v)| v.clone());
            qualifier_values[slot].push(value);
        }
    }

    let [timestamp_name, country_name, admin1_name, admin2_name, admin3_name, lat_name, lng_name, feature_name, value_name] =
        CANONICAL_COLUMNS;
    let mut columns = Vec::with_capacity(CANONICAL_COLUMNS.len() + qualifier_names.len());
    columns.push(Series::new(timestamp_name.into(), timestamps).into());
    columns.push(Series::new(country_name.into(), countries).into());
    columns.push(Series::new(admin1_name.into(), admin1s).into());
    columns.push(Series::new(admin2_name.into(), admin2s).into());
    columns.push(Series::new(admin3_name.into(), admin3s).into());
    columns.push(Series::new(lat_name.into(), lats).into());
    columns.push(Series::new(lng_name.into(), lngs).into());
    columns.push(Series::new(feature_name.into(), features).into());
    if is_numeric {
        columns.push(Series::new(value_name.into(), numeric_values).into());
    } else {
        columns.push(Series::new(value_name.into(), text_values).into());
    }
    for (name, values) in qualifier_names.iter().zip(qualifier_values) {
        columns.push(Series::new(name.as_str().into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}
