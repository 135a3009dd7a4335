use serde_json::Value;

use crate::winding::{Winding, ensure_winding};

/// A province polygon as loaded from its data file: lon/lat rings with the
/// winding already repaired (outer counter-clockwise, holes clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    pub rings: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug)]
pub enum RegionFileError {
    Parse(serde_json::Error),
    NotAPolygon,
    InvalidCoordinates { reason: String },
}

impl std::fmt::Display for RegionFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionFileError::Parse(e) => write!(f, "JSON parse error: {e}"),
            RegionFileError::NotAPolygon => write!(f, "expected a polygon feature"),
            RegionFileError::InvalidCoordinates { reason } => {
                write!(f, "invalid coordinates: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionFileError {}

/// Parses a region file: a Feature, the first feature of a FeatureCollection,
/// or a bare Polygon geometry.
pub fn parse_region_polygon(payload: &str) -> Result<RegionPolygon, RegionFileError> {
    let value: Value = serde_json::from_str(payload).map_err(RegionFileError::Parse)?;
    let geometry = unwrap_geometry(&value)?;

    let obj = geometry.as_object().ok_or(RegionFileError::NotAPolygon)?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("Polygon") {
        return Err(RegionFileError::NotAPolygon);
    }

    let rings_val = obj
        .get("coordinates")
        .and_then(|v| v.as_array())
        .ok_or(RegionFileError::NotAPolygon)?;

    let mut rings = Vec::with_capacity(rings_val.len());
    for ring_val in rings_val {
        rings.push(parse_ring(ring_val)?);
    }
    if rings.is_empty() {
        return Err(RegionFileError::InvalidCoordinates {
            reason: "polygon has no rings".to_string(),
        });
    }

    // Repair winding for the fill rule: outer counter-clockwise, holes
    // clockwise.
    for (ring_index, ring) in rings.iter_mut().enumerate() {
        let want = if ring_index == 0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        };
        ensure_winding(ring, want);
    }

    Ok(RegionPolygon { rings })
}

fn unwrap_geometry(value: &Value) -> Result<&Value, RegionFileError> {
    let obj = value.as_object().ok_or(RegionFileError::NotAPolygon)?;
    match obj.get("type").and_then(|v| v.as_str()) {
        Some("FeatureCollection") => {
            let first = obj
                .get("features")
                .and_then(|v| v.as_array())
                .and_then(|features| features.first())
                .ok_or(RegionFileError::NotAPolygon)?;
            unwrap_geometry(first)
        }
        Some("Feature") => obj.get("geometry").ok_or(RegionFileError::NotAPolygon),
        Some(_) => Ok(value),
        None => Err(RegionFileError::NotAPolygon),
    }
}

fn parse_ring(value: &Value) -> Result<Vec<(f64, f64)>, RegionFileError> {
    let points_val = value
        .as_array()
        .ok_or_else(|| RegionFileError::InvalidCoordinates {
            reason: "ring must be an array".to_string(),
        })?;

    let mut points = Vec::with_capacity(points_val.len());
    for point_val in points_val {
        let arr = point_val
            .as_array()
            .ok_or_else(|| RegionFileError::InvalidCoordinates {
                reason: "vertex must be [lon, lat]".to_string(),
            })?;
        if arr.len() < 2 {
            return Err(RegionFileError::InvalidCoordinates {
                reason: "vertex must be [lon, lat]".to_string(),
            });
        }
        let lon = arr[0]
            .as_f64()
            .ok_or_else(|| RegionFileError::InvalidCoordinates {
                reason: "lon must be a number".to_string(),
            })?;
        let lat = arr[1]
            .as_f64()
            .ok_or_else(|| RegionFileError::InvalidCoordinates {
                reason: "lat must be a number".to_string(),
            })?;
        points.push((lon, lat));
    }

    if points.len() < 3 {
        return Err(RegionFileError::InvalidCoordinates {
            reason: "ring has fewer than 3 vertices".to_string(),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::{RegionFileError, parse_region_polygon};
    use crate::winding::{Winding, winding};
    use pretty_assertions::assert_eq;

    #[test]
    fn clockwise_outer_ring_is_reversed_on_load() {
        // Vertices listed clockwise in the lon/lat plane.
        let payload = r#"{
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-9.0, 43.0], [3.0, 43.0], [3.0, 36.0], [-9.0, 36.0], [-9.0, 43.0]]]
            }
        }"#;
        let polygon = parse_region_polygon(payload).expect("parse region");
        assert_eq!(winding(&polygon.rings[0]), Winding::CounterClockwise);
        assert_eq!(polygon.rings[0][0], (-9.0, 43.0));
        assert_eq!(polygon.rings[0][1], (-9.0, 36.0));
    }

    #[test]
    fn counter_clockwise_outer_ring_is_left_alone() {
        let payload = r#"{
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 3.0], [0.0, 0.0]]]
        }"#;
        let polygon = parse_region_polygon(payload).expect("parse region");
        assert_eq!(polygon.rings[0][1], (4.0, 0.0));
    }

    #[test]
    fn holes_are_repaired_to_clockwise() {
        let payload = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]]
            ]
        }"#;
        let polygon = parse_region_polygon(payload).expect("parse region");
        assert_eq!(winding(&polygon.rings[0]), Winding::CounterClockwise);
        assert_eq!(winding(&polygon.rings[1]), Winding::Clockwise);
    }

    #[test]
    fn takes_the_first_feature_of_a_collection() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0], [0.0, 0.0]]]
                }
            }]
        }"#;
        let polygon = parse_region_polygon(payload).expect("parse region");
        assert_eq!(polygon.rings.len(), 1);
    }

    #[test]
    fn non_polygon_geometry_is_rejected() {
        let payload = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert!(matches!(
            parse_region_polygon(payload),
            Err(RegionFileError::NotAPolygon)
        ));
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let payload = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}"#;
        assert!(matches!(
            parse_region_polygon(payload),
            Err(RegionFileError::InvalidCoordinates { .. })
        ));
    }
}
