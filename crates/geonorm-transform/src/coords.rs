//! Coordinate parsing and range validation.
//!
//! All parsing here is per-record and non-fatal: a cell that cannot be
//! parsed, or that falls outside the valid ranges, yields `None` and the
//! record continues through the pipeline without coordinates.

use geonorm_model::CoordFormat;

/// Parse separate latitude and longitude cells.
pub fn parse_lat_lon_pair(latitude: &str, longitude: &str) -> Option<(f64, f64)> {
    let lat = latitude.trim().parse::<f64>().ok()?;
    let lon = longitude.trim().parse::<f64>().ok()?;
    validate(lat, lon)
}

/// Parse a single combined coordinate cell per its declared format.
pub fn parse_coordinate(value: &str, format: CoordFormat) -> Option<(f64, f64)> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match format {
        CoordFormat::LatLon => {
            let (first, second) = split_pair(value)?;
            validate(first.trim().parse().ok()?, second.trim().parse().ok()?)
        }
        CoordFormat::LonLat => {
            let (first, second) = split_pair(value)?;
            validate(second.trim().parse().ok()?, first.trim().parse().ok()?)
        }
        CoordFormat::Dms => parse_dms_pair(value),
    }
}

fn validate(lat: f64, lon: f64) -> Option<(f64, f64)> {
    if lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
    {
        Some((lat, lon))
    } else {
        None
    }
}

fn split_pair(value: &str) -> Option<(&str, &str)> {
    if let Some((a, b)) = value.split_once(',') {
        return Some((a, b));
    }
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Parse a DMS pair such as `12°39'00"N 8°00'00"W`. Components may be
/// comma-separated, sign-qualified, or hemisphere-qualified; hemisphere
/// letters also fix which component is the latitude.
fn parse_dms_pair(value: &str) -> Option<(f64, f64)> {
    let (first_raw, second_raw) = split_dms(value)?;
    let first = parse_dms_component(first_raw)?;
    let second = parse_dms_component(second_raw)?;

    // E/W on the first component means longitude came first.
    let first_is_longitude = first_raw
        .trim()
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c.to_ascii_uppercase(), 'E' | 'W'));
    if first_is_longitude {
        validate(second, first)
    } else {
        validate(first, second)
    }
}

fn split_dms(value: &str) -> Option<(&str, &str)> {
    if let Some((a, b)) = value.split_once(',') {
        return Some((a, b));
    }
    // No comma: split after the first hemisphere letter followed by
    // whitespace, since DMS components themselves may contain spaces.
    let bytes = value.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if matches!(byte.to_ascii_uppercase(), b'N' | b'S' | b'E' | b'W')
            && bytes.get(index + 1).is_some_and(u8::is_ascii_whitespace)
        {
            return Some((&value[..=index], &value[index + 1..]));
        }
    }
    split_pair(value)
}

fn parse_dms_component(component: &str) -> Option<f64> {
    let mut component = component.trim();
    let mut sign = 1.0;
    if let Some(stripped) = component.strip_prefix('-') {
        sign = -1.0;
        component = stripped;
    } else if let Some(stripped) = component.strip_prefix('+') {
        component = stripped;
    }
    if let Some(last) = component.chars().next_back() {
        match last.to_ascii_uppercase() {
            'S' | 'W' => {
                sign = -sign;
                component = component[..component.len() - last.len_utf8()].trim_end();
            }
            'N' | 'E' => {
                component = component[..component.len() - last.len_utf8()].trim_end();
            }
            _ => {}
        }
    }

    let cleaned: String = component
        .chars()
        .map(|c| match c {
            '°' | '\'' | '"' | '′' | '″' => ' ',
            other => other,
        })
        .collect();
    let mut parts = cleaned.split_whitespace();
    let degrees: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0.0,
    };
    let seconds: f64 = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds)
    {
        return None;
    }
    Some(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
}
