//! Data model for the geonorm normalization engine.
//!
//! This crate defines the types shared across the pipeline:
//!
//! - **schema**: validated column annotations and the [`MapperSchema`]
//! - **table**: the in-memory tabular input representation
//! - **geo**: per-record resolution outcomes ([`ResolvedGeo`], [`MatchKind`])
//! - **record**: the canonical long-format output row ([`CanonicalRecord`])

pub mod geo;
pub mod record;
pub mod schema;
pub mod table;

pub use geo::{AdminLevel, MatchKind, RawGeoValue, ResolvedGeo, RowResolution};
pub use record::{CanonicalRecord, RecordValue, CANONICAL_COLUMNS};
pub use schema::{
    CoordFormat, DateAnnotation, DateKind, FeatureAnnotation, GeoAnnotation, GeoRole,
    MapperSchema, ValueKind,
};
pub use table::Table;
