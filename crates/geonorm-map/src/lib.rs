//! Mapper schema interpretation and geo-strategy selection.
//!
//! The mapper document is a JSON description of an input table's
//! columns (three annotation lists: `geo`, `date`, `feature`). This
//! crate parses it, validates it exhaustively against the table's
//! headers, and decides which geographic-identity strategy applies.

pub mod interpret;
pub mod raw;
pub mod strategy;

pub use interpret::{interpret, SchemaError, SchemaViolation};
pub use strategy::{select_strategy, GeoStrategy, StrategyError};
