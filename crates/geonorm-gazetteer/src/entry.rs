//! Gazetteer entries and their geographic extents.

/// A lon/lat bounding rectangle used for point containment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    /// Whether the point lies inside the rectangle (boundary included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Rectangle area in square degrees; used to break containment ties
    /// in favor of the smaller unit.
    pub fn area(&self) -> f64 {
        (self.max_lon - self.min_lon) * (self.max_lat - self.min_lat)
    }
}

/// One administrative unit. Deeper levels are optional: a country-level
/// entry has no admin fields, an admin2-level entry has admin1 and
/// admin2 populated, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerEntry {
    pub country: String,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub extent: Option<Extent>,
}

impl GazetteerEntry {
    /// Depth of the deepest populated admin level (0 = country only).
    pub fn depth(&self) -> usize {
        if self.admin3.is_some() {
            3
        } else if self.admin2.is_some() {
            2
        } else if self.admin1.is_some() {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_contains_boundary() {
        let extent = Extent {
            min_lon: -10.0,
            min_lat: 10.0,
            max_lon: -4.0,
            max_lat: 17.0,
        };
        assert!(extent.contains(10.0, -10.0));
        assert!(extent.contains(12.5, -8.0));
        assert!(!extent.contains(9.9, -8.0));
        assert!(!extent.contains(12.5, -10.1));
    }

    #[test]
    fn depth_reflects_deepest_level() {
        let mut entry = GazetteerEntry {
            country: "Mali".to_string(),
            admin1: None,
            admin2: None,
            admin3: None,
            iso2: None,
            iso3: None,
            extent: None,
        };
        assert_eq!(entry.depth(), 0);
        entry.admin1 = Some("Kayes".to_string());
        assert_eq!(entry.depth(), 1);
        entry.admin2 = Some("Bafoulabé".to_string());
        assert_eq!(entry.depth(), 2);
    }
}
