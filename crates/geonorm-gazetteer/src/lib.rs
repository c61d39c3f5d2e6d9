//! Reference gazetteer and administrative-hierarchy resolver.
//!
//! The gazetteer is a GADM-style dataset of administrative units
//! (country, admin1, admin2, admin3) with country ISO codes and
//! optional geographic extents. It is loaded once at startup and shared
//! read-only; the [`Resolver`] built on top performs point containment
//! for coordinate data and exact-then-fuzzy name matching for
//! place-name data, memoizing repeated lookups within a run.

pub mod entry;
pub mod error;
pub mod gazetteer;
pub mod resolver;

pub use entry::{Extent, GazetteerEntry};
pub use error::GazetteerError;
pub use gazetteer::Gazetteer;
pub use resolver::{PlaceNameInput, Resolver, ResolverOptions};
