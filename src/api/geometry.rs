//! Polygon parsing and point containment
//!
//! The polygon endpoint takes a flat comma-separated list of lat/lon
//! values. Validation mirrors the query contract: values must be
//! numeric, paired, and at least three pairs. Containment is a ray cast
//! over the stored coordinate pairs.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolygonError {
    #[error("coordinates must be numeric values")]
    NonNumeric,
    #[error("must provide an even number of values for lat/lon pairs")]
    OddValueCount,
    #[error("polygon must have at least 3 coordinate pairs")]
    TooFewPoints,
}

/// Parse `"lat1,lon1,lat2,lon2,..."` into vertex pairs.
pub fn parse_polygon(coords: &str) -> Result<Vec<(f64, f64)>, PolygonError> {
    let values: Vec<f64> = coords
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| PolygonError::NonNumeric)?;

    if values.len() % 2 != 0 {
        return Err(PolygonError::OddValueCount);
    }

    let points: Vec<(f64, f64)> = values.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    if points.len() < 3 {
        return Err(PolygonError::TooFewPoints);
    }

    Ok(points)
}

/// Even-odd ray casting. Points exactly on an edge may fall either way;
/// the source data carries far more noise than that distinction.
pub fn point_in_polygon(point: (f64, f64), polygon: &[(f64, f64)]) -> bool {
    if polygon.is_empty() {
        return false;
    }

    let (px, py) = point;
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];

        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
    }

    #[test]
    fn parses_valid_polygon() {
        let polygon = parse_polygon("35.0,-106.0,36.0,-106.0,36.0,-105.0").unwrap();
        assert_eq!(polygon.len(), 3);
        assert_eq!(polygon[0], (35.0, -106.0));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_polygon("a,b,c,d,e,f"), Err(PolygonError::NonNumeric));
    }

    #[test]
    fn rejects_odd_value_count() {
        assert_eq!(
            parse_polygon("1.0,2.0,3.0,4.0,5.0"),
            Err(PolygonError::OddValueCount)
        );
    }

    #[test]
    fn rejects_too_few_points() {
        assert_eq!(
            parse_polygon("1.0,2.0,3.0,4.0"),
            Err(PolygonError::TooFewPoints)
        );
    }

    #[test]
    fn containment_inside_and_outside() {
        let square = unit_square();
        assert!(point_in_polygon((0.5, 0.5), &square));
        assert!(!point_in_polygon((1.5, 0.5), &square));
        assert!(!point_in_polygon((-0.1, 0.5), &square));
    }

    #[test]
    fn empty_polygon_contains_nothing() {
        assert!(!point_in_polygon((0.5, 0.5), &[]));
    }

    #[test]
    fn containment_concave_polygon() {
        // L-shape: the notch at the top right is outside.
        let l_shape = vec![
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ];
        assert!(point_in_polygon((0.5, 1.5), &l_shape));
        assert!(!point_in_polygon((1.5, 1.5), &l_shape));
    }
}
