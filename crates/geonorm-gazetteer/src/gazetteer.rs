//! The immutable gazetteer lookup structure.
//!
//! Built once per process from a CSV export of the administrative
//! hierarchy, then shared read-only. File order is the stable candidate
//! order used for fuzzy-match tie-breaking.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::entry::{Extent, GazetteerEntry};
use crate::error::GazetteerError;

/// Immutable administrative-hierarchy dataset with per-level candidate
/// lists and ISO code indexes.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    /// Distinct country names, first-occurrence order.
    countries: Vec<String>,
    iso2: HashMap<String, String>,
    iso3: HashMap<String, String>,
    admin1: HashMap<String, Vec<String>>,
    admin2: HashMap<(String, String), Vec<String>>,
    admin3: HashMap<(String, String, String), Vec<String>>,
}

impl Gazetteer {
    /// Build the lookup structure from entries in stable order.
    pub fn from_entries(entries: Vec<GazetteerEntry>) -> Self {
        let mut gazetteer = Self {
            entries: Vec::with_capacity(entries.len()),
            ..Self::default()
        };
        for entry in entries {
            gazetteer.index_entry(&entry);
            gazetteer.entries.push(entry);
        }
        gazetteer
    }

    fn index_entry(&mut self, entry: &GazetteerEntry) {
        if !self.countries.iter().any(|c| c == &entry.country) {
            self.countries.push(entry.country.clone());
        }
        if let Some(code) = &entry.iso2 {
            self.iso2
                .entry(code.to_uppercase())
                .or_insert_with(|| entry.country.clone());
        }
        if let Some(code) = &entry.iso3 {
            self.iso3
                .entry(code.to_uppercase())
                .or_insert_with(|| entry.country.clone());
        }
        if let Some(a1) = &entry.admin1 {
            push_unique(
                self.admin1.entry(entry.country.clone()).or_default(),
                a1,
            );
            if let Some(a2) = &entry.admin2 {
                push_unique(
                    self.admin2
                        .entry((entry.country.clone(), a1.clone()))
                        .or_default(),
                    a2,
                );
                if let Some(a3) = &entry.admin3 {
                    push_unique(
                        self.admin3
                            .entry((entry.country.clone(), a1.clone(), a2.clone()))
                            .or_default(),
                        a3,
                    );
                }
            }
        }
    }

    /// Load from a CSV file with columns `country, admin1, admin2,
    /// admin3, iso2, iso3, min_lon, min_lat, max_lon, max_lat` (all but
    /// `country` optional per record).
    ///
    /// # Errors
    ///
    /// Any failure here is fatal for the run: unreadable file, missing
    /// `country` column, malformed extent values, or an empty dataset.
    pub fn load(path: &Path) -> Result<Self, GazetteerError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| GazetteerError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| GazetteerError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let Some(country_idx) = column("country") else {
            return Err(GazetteerError::MissingColumn {
                path: path.to_path_buf(),
                column: "country".to_string(),
            });
        };
        let admin1_idx = column("admin1");
        let admin2_idx = column("admin2");
        let admin3_idx = column("admin3");
        let iso2_idx = column("iso2");
        let iso3_idx = column("iso3");
        let extent_idx = [
            column("min_lon"),
            column("min_lat"),
            column("max_lon"),
            column("max_lat"),
        ];

        let mut entries = Vec::new();
        for (number, record) in reader.records().enumerate() {
            let record = record.map_err(|source| GazetteerError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let field = |idx: Option<usize>| -> Option<String> {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
            };
            let Some(country) = field(Some(country_idx)) else {
                return Err(GazetteerError::Malformed {
                    path: path.to_path_buf(),
                    record: number + 1,
                    message: "empty country".to_string(),
                });
            };
            let extent = parse_extent(&record, extent_idx, path, number + 1)?;
            entries.push(GazetteerEntry {
                country,
                admin1: field(admin1_idx),
                admin2: field(admin2_idx),
                admin3: field(admin3_idx),
                iso2: field(iso2_idx),
                iso3: field(iso3_idx),
                extent,
            });
        }
        if entries.is_empty() {
            return Err(GazetteerError::Empty {
                path: path.to_path_buf(),
            });
        }
        info!(entries = entries.len(), path = %path.display(), "loaded gazetteer");
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    /// Distinct country names in stable (first-occurrence) order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Canonical country for an ISO2 or ISO3 code (case-insensitive).
    pub fn country_for_iso(&self, code: &str) -> Option<&str> {
        let code = code.trim().to_uppercase();
        match code.len() {
            2 => self.iso2.get(&code).map(String::as_str),
            3 => self.iso3.get(&code).map(String::as_str),
            _ => None,
        }
    }

    /// admin1 candidates within a country, stable order.
    pub fn admin1_candidates(&self, country: &str) -> &[String] {
        self.admin1.get(country).map_or(&[], Vec::as_slice)
    }

    /// admin2 candidates within a resolved admin1, stable order.
    pub fn admin2_candidates(&self, country: &str, admin1: &str) -> &[String] {
        self.admin2
            .get(&(country.to_string(), admin1.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// admin3 candidates within a resolved admin2, stable order.
    pub fn admin3_candidates(&self, country: &str, admin1: &str, admin2: &str) -> &[String] {
        self.admin3
            .get(&(country.to_string(), admin1.to_string(), admin2.to_string()))
            .map_or(&[], Vec::as_slice)
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn parse_extent(
    record: &csv::StringRecord,
    idx: [Option<usize>; 4],
    path: &Path,
    number: usize,
) -> Result<Option<Extent>, GazetteerError> {
    let mut values = [0.0f64; 4];
    let mut present = 0usize;
    for (slot, maybe_idx) in idx.iter().enumerate() {
        let raw = maybe_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(raw) = raw {
            values[slot] = raw.parse::<f64>().map_err(|_| GazetteerError::Malformed {
                path: path.to_path_buf(),
                record: number,
                message: format!("invalid extent value '{raw}'"),
            })?;
            present += 1;
        }
    }
    match present {
        0 => Ok(None),
        4 => Ok(Some(Extent {
            min_lon: values[0],
            min_lat: values[1],
            max_lon: values[2],
            max_lat: values[3],
        })),
        _ => Err(GazetteerError::Malformed {
            path: path.to_path_buf(),
            record: number,
            message: "partial extent; all four bounds are required".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(country: &str, a1: Option<&str>, a2: Option<&str>) -> GazetteerEntry {
        GazetteerEntry {
            country: country.to_string(),
            admin1: a1.map(String::from),
            admin2: a2.map(String::from),
            admin3: None,
            iso2: None,
            iso3: None,
            extent: None,
        }
    }

    #[test]
    fn candidates_keep_first_occurrence_order() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry("Mali", Some("Kayes"), Some("Bafoulabé")),
            entry("Mali", Some("Sikasso"), None),
            entry("Mali", Some("Kayes"), Some("Kita")),
        ]);
        assert_eq!(gazetteer.admin1_candidates("Mali"), ["Kayes", "Sikasso"]);
        assert_eq!(
            gazetteer.admin2_candidates("Mali", "Kayes"),
            ["Bafoulabé", "Kita"]
        );
        assert!(gazetteer.admin2_candidates("Mali", "Sikasso").is_empty());
    }

    #[test]
    fn iso_codes_resolve_case_insensitively() {
        let gazetteer = Gazetteer::from_entries(vec![GazetteerEntry {
            iso2: Some("ML".to_string()),
            iso3: Some("MLI".to_string()),
            ..entry("Mali", None, None)
        }]);
        assert_eq!(gazetteer.country_for_iso("ml"), Some("Mali"));
        assert_eq!(gazetteer.country_for_iso("mli"), Some("Mali"));
        assert_eq!(gazetteer.country_for_iso("XX"), None);
    }

    #[test]
    fn load_reads_csv_and_parses_extents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "country,admin1,admin2,admin3,iso2,iso3,min_lon,min_lat,max_lon,max_lat"
        )
        .unwrap();
        writeln!(file, "Mali,,,,ML,MLI,-12.25,10.14,4.27,25.0").unwrap();
        writeln!(file, "Mali,Kayes,,,ML,MLI,-12.25,12.0,-8.0,15.5").unwrap();
        let gazetteer = Gazetteer::load(file.path()).unwrap();
        assert_eq!(gazetteer.entries().len(), 2);
        assert_eq!(gazetteer.countries(), ["Mali"]);
        let extent = gazetteer.entries()[1].extent.unwrap();
        assert!(extent.contains(12.5, -8.0));
    }

    #[test]
    fn load_rejects_partial_extent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country,min_lon,min_lat,max_lon,max_lat").unwrap();
        writeln!(file, "Mali,-12.25,,,").unwrap();
        let err = Gazetteer::load(file.path()).unwrap_err();
        assert!(matches!(err, GazetteerError::Malformed { record: 1, .. }));
    }

    #[test]
    fn load_requires_country_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,iso2").unwrap();
        writeln!(file, "Mali,ML").unwrap();
        let err = Gazetteer::load(file.path()).unwrap_err();
        assert!(matches!(err, GazetteerError::MissingColumn { .. }));
    }

    #[test]
    fn load_rejects_empty_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country").unwrap();
        let err = Gazetteer::load(file.path()).unwrap_err();
        assert!(matches!(err, GazetteerError::Empty { .. }));
    }
}
