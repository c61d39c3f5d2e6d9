//! Hierarchical place-name and point resolution against a [`Gazetteer`].
//!
//! Place names resolve top-down: country first, then each admin level
//! scoped to its resolved parent. The country level matches by ISO code
//! or exact case-insensitive name only; admin levels try an exact
//! case-insensitive match before falling back to Levenshtein distance.
//! An unresolved level short-circuits everything below it.

use std::collections::HashMap;

use rapidfuzz::distance::levenshtein;
use tracing::debug;

use geonorm_model::{AdminLevel, MatchKind, ResolvedGeo};

use crate::entry::GazetteerEntry;
use crate::gazetteer::Gazetteer;

/// Tuning knobs for name resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverOptions {
    /// Reject fuzzy matches farther than this edit distance. `None`
    /// accepts the nearest candidate no matter how far.
    pub max_distance: Option<usize>,
}

/// Raw place-name inputs for one row, already trimmed by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceNameInput {
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
}

/// Memoizing resolver over a shared gazetteer.
///
/// Caches are keyed per (scope, input) so repeated values across rows,
/// the common case in long observational tables, resolve once.
#[derive(Debug)]
pub struct Resolver<'g> {
    gazetteer: &'g Gazetteer,
    options: ResolverOptions,
    name_cache: HashMap<(String, String), Option<(String, MatchKind)>>,
    point_cache: HashMap<(u64, u64), ResolvedGeo>,
}

impl<'g> Resolver<'g> {
    pub fn new(gazetteer: &'g Gazetteer, options: ResolverOptions) -> Self {
        Self {
            gazetteer,
            options,
            name_cache: HashMap::new(),
            point_cache: HashMap::new(),
        }
    }

    /// Resolve a coordinate to the administrative tuple whose extent
    /// contains it.
    ///
    /// Among containing entries the deepest level wins, ties broken by
    /// smaller extent area, then dataset order. Every populated level of
    /// the winning entry counts as an exact match. Points outside every
    /// extent come back fully unresolved.
    pub fn resolve_point(&mut self, latitude: f64, longitude: f64) -> ResolvedGeo {
        let key = (latitude.to_bits(), longitude.to_bits());
        if let Some(hit) = self.point_cache.get(&key) {
            return hit.clone();
        }

        let mut best: Option<(&GazetteerEntry, usize, f64)> = None;
        for entry in self.gazetteer.entries() {
            let Some(extent) = &entry.extent else {
                continue;
            };
            if !extent.contains(latitude, longitude) {
                continue;
            }
            let depth = entry.depth();
            let area = extent.area();
            let better = match &best {
                None => true,
                Some((_, best_depth, best_area)) => {
                    depth > *best_depth || (depth == *best_depth && area < *best_area)
                }
            };
            if better {
                best = Some((entry, depth, area));
            }
        }

        let mut geo = ResolvedGeo::default();
        if let Some((entry, _, _)) = best {
            geo.set_level(AdminLevel::Country, entry.country.clone(), MatchKind::Exact);
            for (level, name) in [
                (AdminLevel::Admin1, &entry.admin1),
                (AdminLevel::Admin2, &entry.admin2),
                (AdminLevel::Admin3, &entry.admin3),
            ] {
                if let Some(name) = name {
                    geo.set_level(level, name.clone(), MatchKind::Exact);
                }
            }
        }
        self.point_cache.insert(key, geo.clone());
        geo
    }

    /// Resolve place names top-down through the hierarchy.
    ///
    /// The country level is exact-only: an ISO code or an exact
    /// case-insensitive name, never a fuzzy match. Each admin level
    /// only attempts resolution once its parent resolved, so a miss at
    /// any level leaves everything below it unresolved.
    pub fn resolve_names(&mut self, input: &PlaceNameInput) -> ResolvedGeo {
        let gazetteer = self.gazetteer;
        let mut geo = ResolvedGeo::default();

        let country = self.resolve_country(input);
        let Some((country, kind)) = country else {
            return geo;
        };
        geo.set_level(AdminLevel::Country, country.clone(), kind);

        let Some((admin1, kind)) = input
            .admin1
            .as_deref()
            .and_then(|name| self.match_name(&country, name, gazetteer.admin1_candidates(&country)))
        else {
            return geo;
        };
        geo.set_level(AdminLevel::Admin1, admin1.clone(), kind);

        let Some((admin2, kind)) = input.admin2.as_deref().and_then(|name| {
            let scope = format!("{country}/{admin1}");
            self.match_name(&scope, name, gazetteer.admin2_candidates(&country, &admin1))
        }) else {
            return geo;
        };
        geo.set_level(AdminLevel::Admin2, admin2.clone(), kind);

        if let Some((admin3, kind)) = input.admin3.as_deref().and_then(|name| {
            let scope = format!("{country}/{admin1}/{admin2}");
            self.match_name(
                &scope,
                name,
                gazetteer.admin3_candidates(&country, &admin1, &admin2),
            )
        }) {
            geo.set_level(AdminLevel::Admin3, admin3, kind);
        }
        geo
    }

    fn resolve_country(&mut self, input: &PlaceNameInput) -> Option<(String, MatchKind)> {
        for code in [input.iso2.as_deref(), input.iso3.as_deref()]
            .into_iter()
            .flatten()
        {
            if let Some(country) = self.gazetteer.country_for_iso(code) {
                return Some((country.to_string(), MatchKind::Exact));
            }
        }
        input
            .country
            .as_deref()
            .and_then(|name| exact_match(name, self.gazetteer.countries()))
    }

    /// Exact case-insensitive match first, Levenshtein fallback second.
    /// Ties on distance keep the earliest candidate.
    fn match_name(
        &mut self,
        scope: &str,
        input: &str,
        candidates: &[String],
    ) -> Option<(String, MatchKind)> {
        let input = input.trim();
        if input.is_empty() || candidates.is_empty() {
            return None;
        }
        let lowered = input.to_lowercase();
        let key = (scope.to_string(), lowered.clone());
        if let Some(hit) = self.name_cache.get(&key) {
            return hit.clone();
        }

        let mut result = exact_match(input, candidates);

        if result.is_none() {
            let mut best: Option<(&String, usize)> = None;
            for candidate in candidates {
                let distance =
                    levenshtein::distance(lowered.chars(), candidate.to_lowercase().chars());
                if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                    best = Some((candidate, distance));
                }
            }
            result = best
                .filter(|(_, distance)| {
                    self.options
                        .max_distance
                        .is_none_or(|limit| *distance <= limit)
                })
                .map(|(candidate, distance)| {
                    debug!(input, matched = %candidate, distance, "fuzzy place-name match");
                    (candidate.clone(), MatchKind::Fuzzy)
                });
        }

        self.name_cache.insert(key, result.clone());
        result
    }
}

/// Exact case-insensitive lookup, candidate order preserved.
fn exact_match(input: &str, candidates: &[String]) -> Option<(String, MatchKind)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let lowered = input.to_lowercase();
    candidates
        .iter()
        .find(|candidate| candidate.to_lowercase() == lowered)
        .map(|candidate| (candidate.clone(), MatchKind::Exact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Extent;

    fn entry(
        country: &str,
        a1: Option<&str>,
        a2: Option<&str>,
        extent: Option<Extent>,
    ) -> GazetteerEntry {
        GazetteerEntry {
            country: country.to_string(),
            admin1: a1.map(String::from),
            admin2: a2.map(String::from),
            admin3: None,
            iso2: None,
            iso3: None,
            extent,
        }
    }

    #[test]
    fn point_prefers_deepest_then_smallest_extent() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry(
                "Mali",
                None,
                None,
                Some(Extent {
                    min_lon: -12.25,
                    min_lat: 10.14,
                    max_lon: 4.27,
                    max_lat: 25.0,
                }),
            ),
            entry(
                "Mali",
                Some("Kayes"),
                None,
                Some(Extent {
                    min_lon: -12.25,
                    min_lat: 12.0,
                    max_lon: -8.0,
                    max_lat: 15.5,
                }),
            ),
        ]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        let geo = resolver.resolve_point(13.0, -10.0);
        assert_eq!(geo.country.as_deref(), Some("Mali"));
        assert_eq!(geo.admin1.as_deref(), Some("Kayes"));

        let geo = resolver.resolve_point(20.0, 2.0);
        assert_eq!(geo.admin1, None);
        assert_eq!(geo.country.as_deref(), Some("Mali"));
    }

    #[test]
    fn point_outside_every_extent_is_unresolved() {
        let gazetteer = Gazetteer::from_entries(vec![entry(
            "Mali",
            None,
            None,
            Some(Extent {
                min_lon: -12.25,
                min_lat: 10.14,
                max_lon: 4.27,
                max_lat: 25.0,
            }),
        )]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        assert!(resolver.resolve_point(48.8, 2.3).is_fully_unresolved());
    }

    #[test]
    fn exact_match_wins_over_closer_fuzzy_candidate() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry("Mali", Some("Kayes"), None, None),
            entry("Mali", Some("Kaye"), None, None),
        ]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        let geo = resolver.resolve_names(&PlaceNameInput {
            country: Some("mali".to_string()),
            admin1: Some("KAYE".to_string()),
            ..PlaceNameInput::default()
        });
        assert_eq!(geo.admin1.as_deref(), Some("Kaye"));
        assert_eq!(geo.admin1_match, MatchKind::Exact);
    }

    #[test]
    fn distance_ties_keep_first_occurrence() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry("Mali", Some("Gao"), None, None),
            entry("Mali", Some("Gab"), None, None),
        ]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        let geo = resolver.resolve_names(&PlaceNameInput {
            country: Some("Mali".to_string()),
            admin1: Some("Gaz".to_string()),
            ..PlaceNameInput::default()
        });
        assert_eq!(geo.admin1.as_deref(), Some("Gao"));
        assert_eq!(geo.admin1_match, MatchKind::Fuzzy);
    }

    #[test]
    fn max_distance_rejects_far_matches() {
        let gazetteer = Gazetteer::from_entries(vec![entry("Mali", Some("Kayes"), None, None)]);
        let mut resolver = Resolver::new(
            &gazetteer,
            ResolverOptions {
                max_distance: Some(2),
            },
        );
        let geo = resolver.resolve_names(&PlaceNameInput {
            country: Some("Mali".to_string()),
            admin1: Some("Timbuktu".to_string()),
            ..PlaceNameInput::default()
        });
        assert_eq!(geo.admin1, None);
        assert_eq!(geo.admin1_match, MatchKind::Unresolved);
    }

    #[test]
    fn country_is_exact_only_even_without_distance_limit() {
        let gazetteer = Gazetteer::from_entries(vec![entry("Mali", Some("Kayes"), None, None)]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        let geo = resolver.resolve_names(&PlaceNameInput {
            country: Some("Mal".to_string()),
            admin1: Some("Kayes".to_string()),
            ..PlaceNameInput::default()
        });
        assert!(geo.is_fully_unresolved());
        assert_eq!(geo.country, None);
        assert_eq!(geo.admin1, None);
    }

    #[test]
    fn iso_code_bypasses_country_name() {
        let gazetteer = Gazetteer::from_entries(vec![GazetteerEntry {
            iso3: Some("MLI".to_string()),
            ..entry("Mali", None, None, None)
        }]);
        let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());
        let geo = resolver.resolve_names(&PlaceNameInput {
            iso3: Some("mli".to_string()),
            country: Some("completely wrong".to_string()),
            ..PlaceNameInput::default()
        });
        assert_eq!(geo.country.as_deref(), Some("Mali"));
        assert_eq!(geo.country_match, MatchKind::Exact);
    }
}
