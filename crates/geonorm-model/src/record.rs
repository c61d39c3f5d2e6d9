//! The canonical long-format output row.

use serde::{Deserialize, Serialize};

use crate::geo::ResolvedGeo;

/// Canonical output column order, matching the downstream contract.
/// Qualifier columns are appended after these.
pub const CANONICAL_COLUMNS: [&str; 9] = [
    "timestamp", "country", "admin1", "admin2", "admin3", "lat", "lng", "feature", "value",
];

/// A feature value: numeric or string, never both. The inner `Option`
/// is `None` when the source cell was blank or failed to parse; the
/// record is still emitted so stream length stays auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordValue {
    Numeric(Option<f64>),
    Text(Option<String>),
}

impl RecordValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

/// One output row: the cross product of one input row and one feature
/// column. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Epoch milliseconds; `None` when the primary date was absent or
    /// failed to parse.
    pub timestamp: Option<i64>,
    pub geo: ResolvedGeo,
    /// Populated only under a coordinate-based strategy.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Output feature name.
    pub feature: String,
    pub value: RecordValue,
    /// Qualifier column values for this feature, in schema order.
    pub qualifiers: Vec<(String, Option<String>)>,
}
