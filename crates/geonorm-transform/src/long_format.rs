//! Wide-to-long expansion into canonical records.
//!
//! Every (input row, feature column) pair produces exactly one record,
//! including rows whose geo never resolved and cells whose value failed
//! to parse. Stream lengths therefore stay auditable as
//! rows x features-of-kind.

use tracing::debug;

use geonorm_model::{
    CanonicalRecord, MapperSchema, RecordValue, RowResolution, Table, ValueKind,
};

use crate::datetime::parse_timestamp_ms;

/// The two output streams, split by value kind.
#[derive(Debug, Clone, Default)]
pub struct RecordStreams {
    pub numeric: Vec<CanonicalRecord>,
    pub text: Vec<CanonicalRecord>,
}

struct FeaturePlan<'s> {
    output_name: &'s str,
    value_kind: ValueKind,
    column: Option<usize>,
    /// (qualifier column name, column index), schema order.
    qualifiers: Vec<(&'s str, Option<usize>)>,
}

/// Expand a wide table into canonical records.
///
/// `resolutions` holds the per-row geo outcome, indexed like the rows;
/// a missing entry reads as fully unresolved.
pub fn expand(table: &Table, schema: &MapperSchema, resolutions: &[RowResolution]) -> RecordStreams {
    let timestamp_source = schema.timestamp_source();
    let timestamp_column =
        timestamp_source.and_then(|annotation| table.column_index(&annotation.name));

    let plans: Vec<FeaturePlan<'_>> = schema
        .value_features()
        .map(|annotation| FeaturePlan {
            output_name: annotation.output_name(),
            value_kind: annotation.value_kind,
            column: table.column_index(&annotation.name),
            qualifiers: schema
                .qualifiers_for(&annotation.name)
                .into_iter()
                .map(|name| (name, table.column_index(name)))
                .collect(),
        })
        .collect();

    let mut streams = RecordStreams::default();
    for row in 0..table.row_count() {
        let resolution = resolutions.get(row).cloned().unwrap_or_default();
        let timestamp = match (timestamp_source, timestamp_column) {
            (Some(annotation), Some(column)) => parse_timestamp_ms(
                table.value(row, column),
                annotation.kind,
                annotation.time_format.as_deref(),
            ),
            _ => None,
        };

        for plan in &plans {
            let cell = plan.column.map_or("", |column| table.value(row, column));
            let value = match plan.value_kind {
                ValueKind::Numeric => RecordValue::Numeric(cell.parse::<f64>().ok()),
                ValueKind::Str => {
                    RecordValue::Text((!cell.is_empty()).then(|| cell.to_string()))
                }
            };
            let qualifiers = plan
                .qualifiers
                .iter()
                .map(|(name, column)| {
                    let raw = column.map_or("", |c| table.value(row, c));
                    ((*name).to_string(), (!raw.is_empty()).then(|| raw.to_string()))
                })
                .collect();

            let record = CanonicalRecord {
                timestamp,
                geo: resolution.geo.clone(),
                latitude: resolution.latitude,
                longitude: resolution.longitude,
                feature: plan.output_name.to_string(),
                value,
                qualifiers,
            };
            match plan.value_kind {
                ValueKind::Numeric => streams.numeric.push(record),
                ValueKind::Str => streams.text.push(record),
            }
        }
    }
    debug!(
        rows = table.row_count(),
        numeric = streams.numeric.len(),
        text = streams.text.len(),
        "expanded wide table"
    );
    streams
}
