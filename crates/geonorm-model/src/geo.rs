//! Per-record geo-resolution outcomes.
//!
//! Resolution is strictly hierarchical: a level is populated only when
//! its parent resolved, and the per-level [`MatchKind`] lets consumers
//! tell an exact match from a fuzzy one and from a miss.

use serde::{Deserialize, Serialize};

/// How a single administrative level was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    #[default]
    Unresolved,
}

impl MatchKind {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// A raw geo input value retained for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGeoValue {
    pub column: String,
    pub value: String,
}

/// Resolved administrative tuple for one record.
///
/// Invariant: `admin1` is only populated when `country` resolved,
/// `admin2` only when `admin1` resolved, `admin3` only when `admin2`
/// resolved. Constructed level by level via [`ResolvedGeo::set_level`],
/// which refuses to skip a parent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedGeo {
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub country_match: MatchKind,
    pub admin1_match: MatchKind,
    pub admin2_match: MatchKind,
    pub admin3_match: MatchKind,
    /// Original inputs that drove resolution, for traceability.
    pub raw: Vec<RawGeoValue>,
}

/// Administrative hierarchy levels, top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLevel {
    Country,
    Admin1,
    Admin2,
    Admin3,
}

impl ResolvedGeo {
    /// A fully unresolved tuple carrying only the raw inputs.
    pub fn unresolved(raw: Vec<RawGeoValue>) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Populate one level. Returns `false` (and leaves the tuple
    /// untouched) when the parent level is unresolved.
    pub fn set_level(&mut self, level: AdminLevel, name: String, kind: MatchKind) -> bool {
        match level {
            AdminLevel::Country => {
                self.country = Some(name);
                self.country_match = kind;
            }
            AdminLevel::Admin1 => {
                if !self.country_match.is_resolved() {
                    return false;
                }
                self.admin1 = Some(name);
                self.admin1_match = kind;
            }
            AdminLevel::Admin2 => {
                if !self.admin1_match.is_resolved() {
                    return false;
                }
                self.admin2 = Some(name);
                self.admin2_match = kind;
            }
            AdminLevel::Admin3 => {
                if !self.admin2_match.is_resolved() {
                    return false;
                }
                self.admin3 = Some(name);
                self.admin3_match = kind;
            }
        }
        true
    }

    /// True when no level resolved at all.
    pub fn is_fully_unresolved(&self) -> bool {
        !self.country_match.is_resolved()
    }
}

/// Resolution outcome for one input row: the administrative tuple plus
/// the normalized coordinates when a coordinate strategy was in use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowResolution {
    pub geo: ResolvedGeo,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
