//! Coordinate text parsing
//!
//! The coordinates span holds latitude, longitude, and the reference
//! system together in the shape `"<lat>,<lon> <crs>"`. Parsing is
//! all-or-nothing: any malformed input yields three absent values, never
//! a partial triple and never an error.

/// Parse `"<lat>,<lon> <crs>"` into its three components.
///
/// No range validation is performed; the values are stored as scraped.
pub fn parse_lat_lon_crs(text: Option<&str>) -> (Option<f64>, Option<f64>, Option<String>) {
    let Some(text) = text else {
        return (None, None, None);
    };

    // The CRS is the last space-delimited token; everything before it is
    // the comma-separated coordinate pair.
    let Some((coords, crs)) = text.trim().rsplit_once(' ') else {
        return (None, None, None);
    };
    let Some((lat, lon)) = coords.split_once(',') else {
        return (None, None, None);
    };

    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => (Some(lat), Some(lon), Some(crs.trim().to_string())),
        _ => (None, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_text() {
        assert_eq!(
            parse_lat_lon_crs(Some("35.123,-106.456 NAD83")),
            (Some(35.123), Some(-106.456), Some("NAD83".to_string()))
        );
    }

    #[test]
    fn absent_input_yields_all_absent() {
        assert_eq!(parse_lat_lon_crs(None), (None, None, None));
    }

    #[test]
    fn malformed_input_yields_all_absent() {
        assert_eq!(parse_lat_lon_crs(Some("garbage")), (None, None, None));
        assert_eq!(parse_lat_lon_crs(Some("")), (None, None, None));
        assert_eq!(parse_lat_lon_crs(Some("35.1 -106.4 NAD83")), (None, None, None));
        assert_eq!(parse_lat_lon_crs(Some("abc,def NAD83")), (None, None, None));
    }

    #[test]
    fn never_partial() {
        // Latitude parses, longitude does not: the whole triple is absent.
        let (lat, lon, crs) = parse_lat_lon_crs(Some("35.123,xyz NAD83"));
        assert!(lat.is_none() && lon.is_none() && crs.is_none());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            parse_lat_lon_crs(Some("  35.0, -106.0 NAD83  ")),
            (Some(35.0), Some(-106.0), Some("NAD83".to_string()))
        );
    }
}
