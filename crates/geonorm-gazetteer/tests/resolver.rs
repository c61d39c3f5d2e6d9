//! End-to-end resolution against a CSV-loaded gazetteer.

use std::io::Write;

use geonorm_gazetteer::{Gazetteer, PlaceNameInput, Resolver, ResolverOptions};
use geonorm_model::MatchKind;

fn mali_gazetteer() -> Gazetteer {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "country,admin1,admin2,admin3,iso2,iso3,min_lon,min_lat,max_lon,max_lat"
    )
    .unwrap();
    writeln!(file, "Mali,,,,ML,MLI,-12.25,10.14,4.27,25.0").unwrap();
    writeln!(file, "Mali,Kayes,,,ML,MLI,-12.25,12.0,-8.0,15.5").unwrap();
    writeln!(file, "Mali,Kayes,Bafoulabé,,ML,MLI,-11.0,12.5,-9.5,14.0").unwrap();
    writeln!(file, "Mali,Sikasso,,,ML,MLI,-8.0,10.14,-4.0,12.5").unwrap();
    Gazetteer::load(file.path()).unwrap()
}

#[test]
fn point_inside_nested_extents_resolves_to_deepest() {
    let gazetteer = mali_gazetteer();
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let geo = resolver.resolve_point(13.0, -10.0);
    assert_eq!(geo.country.as_deref(), Some("Mali"));
    assert_eq!(geo.admin1.as_deref(), Some("Kayes"));
    assert_eq!(geo.admin2.as_deref(), Some("Bafoulabé"));
    assert_eq!(geo.admin2_match, MatchKind::Exact);
}

#[test]
fn exact_names_resolve_case_insensitively() {
    let gazetteer = mali_gazetteer();
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let geo = resolver.resolve_names(&PlaceNameInput {
        country: Some("MALI".to_string()),
        admin1: Some("kayes".to_string()),
        admin2: Some("bafoulabé".to_string()),
        ..PlaceNameInput::default()
    });
    assert_eq!(geo.country.as_deref(), Some("Mali"));
    assert_eq!(geo.admin1.as_deref(), Some("Kayes"));
    assert_eq!(geo.admin2.as_deref(), Some("Bafoulabé"));
    assert_eq!(geo.admin1_match, MatchKind::Exact);
}

#[test]
fn misspelled_admin1_falls_back_to_fuzzy() {
    let gazetteer = mali_gazetteer();
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let geo = resolver.resolve_names(&PlaceNameInput {
        country: Some("Mali".to_string()),
        admin1: Some("Kayess".to_string()),
        ..PlaceNameInput::default()
    });
    assert_eq!(geo.admin1.as_deref(), Some("Kayes"));
    assert_eq!(geo.admin1_match, MatchKind::Fuzzy);
}

#[test]
fn unknown_country_short_circuits_lower_levels() {
    let gazetteer = mali_gazetteer();
    // default options: admin fuzzy matching is unlimited, but the
    // country level never falls back to fuzzy
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let geo = resolver.resolve_names(&PlaceNameInput {
        country: Some("Atlantis".to_string()),
        admin1: Some("Kayes".to_string()),
        ..PlaceNameInput::default()
    });
    assert!(geo.is_fully_unresolved());
    assert_eq!(geo.admin1, None);
    assert_eq!(geo.admin1_match, MatchKind::Unresolved);
}

#[test]
fn missing_admin1_input_leaves_admin2_unresolved() {
    let gazetteer = mali_gazetteer();
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let geo = resolver.resolve_names(&PlaceNameInput {
        country: Some("Mali".to_string()),
        admin2: Some("Bafoulabé".to_string()),
        ..PlaceNameInput::default()
    });
    assert_eq!(geo.country.as_deref(), Some("Mali"));
    assert_eq!(geo.admin1, None);
    assert_eq!(geo.admin2, None);
}

#[test]
fn repeated_inputs_resolve_identically() {
    let gazetteer = mali_gazetteer();
    let mut resolver = Resolver::new(&gazetteer, ResolverOptions::default());

    let input = PlaceNameInput {
        country: Some("Mali".to_string()),
        admin1: Some("Sikaso".to_string()),
        ..PlaceNameInput::default()
    };
    let first = resolver.resolve_names(&input);
    let second = resolver.resolve_names(&input);
    assert_eq!(first, second);
    assert_eq!(first.admin1.as_deref(), Some("Sikasso"));
}
