use std::collections::BTreeMap;

use serde_json::Value;

/// Decoded topology resource: shared-boundary polygon geometry.
///
/// Arcs are decoded to absolute (lon, lat) pairs up front; objects keep arc
/// indices and are expanded to rings on demand. Negative arc indices follow
/// the usual convention: `-1 - i` names arc `i` traversed backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    arcs: Vec<Vec<(f64, f64)>>,
    objects: BTreeMap<String, TopoGeometry>,
}

#[derive(Debug, Clone, PartialEq)]
enum TopoGeometry {
    Polygon(Vec<Vec<i64>>),
    MultiPolygon(Vec<Vec<Vec<i64>>>),
    Collection(Vec<TopoGeometry>),
}

#[derive(Debug)]
pub enum TopologyError {
    Parse(serde_json::Error),
    NotATopology,
    InvalidTransform,
    InvalidArc { index: usize },
    InvalidGeometry { reason: String },
    UnknownObject { name: String },
    ArcIndexOutOfRange { index: i64 },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::Parse(e) => write!(f, "JSON parse error: {e}"),
            TopologyError::NotATopology => write!(f, "expected a Topology object"),
            TopologyError::InvalidTransform => write!(f, "invalid topology transform"),
            TopologyError::InvalidArc { index } => write!(f, "invalid arc at index {index}"),
            TopologyError::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            TopologyError::UnknownObject { name } => write!(f, "no such topology object: {name}"),
            TopologyError::ArcIndexOutOfRange { index } => {
                write!(f, "arc index out of range: {index}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

#[derive(Debug, Copy, Clone)]
struct TopoTransform {
    scale: [f64; 2],
    translate: [f64; 2],
}

impl Topology {
    pub fn parse(payload: &str) -> Result<Self, TopologyError> {
        let value: Value = serde_json::from_str(payload).map_err(TopologyError::Parse)?;
        let obj = value.as_object().ok_or(TopologyError::NotATopology)?;
        if obj.get("type").and_then(|v| v.as_str()) != Some("Topology") {
            return Err(TopologyError::NotATopology);
        }

        let transform = match obj.get("transform") {
            Some(t) => Some(parse_transform(t)?),
            None => None,
        };

        let arcs_val = obj
            .get("arcs")
            .and_then(|v| v.as_array())
            .ok_or(TopologyError::NotATopology)?;
        let arcs = decode_arcs(arcs_val, transform)?;

        let objects_val = obj
            .get("objects")
            .and_then(|v| v.as_object())
            .ok_or(TopologyError::NotATopology)?;
        let mut objects = BTreeMap::new();
        for (name, geom_val) in objects_val {
            objects.insert(name.clone(), parse_geometry(geom_val)?);
        }

        Ok(Self { arcs, objects })
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(|name| name.as_str())
    }

    /// Expands the named object into polygons (each a list of lon/lat rings).
    pub fn object_polygons(&self, name: &str) -> Result<Vec<Vec<Vec<(f64, f64)>>>, TopologyError> {
        let geometry = self
            .objects
            .get(name)
            .ok_or_else(|| TopologyError::UnknownObject {
                name: name.to_string(),
            })?;
        let mut polygons = Vec::new();
        self.collect_polygons(geometry, &mut polygons)?;
        Ok(polygons)
    }

    fn collect_polygons(
        &self,
        geometry: &TopoGeometry,
        out: &mut Vec<Vec<Vec<(f64, f64)>>>,
    ) -> Result<(), TopologyError> {
        match geometry {
            TopoGeometry::Polygon(rings) => out.push(self.resolve_rings(rings)?),
            TopoGeometry::MultiPolygon(polygons) => {
                for rings in polygons {
                    out.push(self.resolve_rings(rings)?);
                }
            }
            TopoGeometry::Collection(members) => {
                for member in members {
                    self.collect_polygons(member, out)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_rings(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<(f64, f64)>>, TopologyError> {
        rings.iter().map(|ring| self.resolve_ring(ring)).collect()
    }

    fn resolve_ring(&self, arc_refs: &[i64]) -> Result<Vec<(f64, f64)>, TopologyError> {
        let mut ring: Vec<(f64, f64)> = Vec::new();
        for &arc_ref in arc_refs {
            let (index, reversed) = if arc_ref >= 0 {
                (arc_ref as usize, false)
            } else {
                ((-1 - arc_ref) as usize, true)
            };
            let arc = self
                .arcs
                .get(index)
                .ok_or(TopologyError::ArcIndexOutOfRange { index: arc_ref })?;

            let points: Vec<(f64, f64)> = if reversed {
                arc.iter().rev().copied().collect()
            } else {
                arc.clone()
            };

            // Consecutive arcs share their join point.
            let skip = usize::from(!ring.is_empty());
            ring.extend(points.into_iter().skip(skip));
        }
        Ok(ring)
    }
}

fn parse_transform(value: &Value) -> Result<TopoTransform, TopologyError> {
    let obj = value.as_object().ok_or(TopologyError::InvalidTransform)?;
    let pair = |key: &str| -> Result<[f64; 2], TopologyError> {
        let arr = obj
            .get(key)
            .and_then(|v| v.as_array())
            .ok_or(TopologyError::InvalidTransform)?;
        if arr.len() != 2 {
            return Err(TopologyError::InvalidTransform);
        }
        let x = arr[0].as_f64().ok_or(TopologyError::InvalidTransform)?;
        let y = arr[1].as_f64().ok_or(TopologyError::InvalidTransform)?;
        Ok([x, y])
    };
    Ok(TopoTransform {
        scale: pair("scale")?,
        translate: pair("translate")?,
    })
}

fn decode_arcs(
    arcs_val: &[Value],
    transform: Option<TopoTransform>,
) -> Result<Vec<Vec<(f64, f64)>>, TopologyError> {
    let mut arcs = Vec::with_capacity(arcs_val.len());
    for (index, arc_val) in arcs_val.iter().enumerate() {
        let points_val = arc_val
            .as_array()
            .ok_or(TopologyError::InvalidArc { index })?;
        if points_val.len() < 2 {
            return Err(TopologyError::InvalidArc { index });
        }

        let mut points = Vec::with_capacity(points_val.len());
        match transform {
            // Quantized topology: positions are delta-encoded grid steps.
            Some(t) => {
                let mut qx = 0.0;
                let mut qy = 0.0;
                for point_val in points_val {
                    let (dx, dy) = coord_pair(point_val, index)?;
                    qx += dx;
                    qy += dy;
                    points.push((
                        qx * t.scale[0] + t.translate[0],
                        qy * t.scale[1] + t.translate[1],
                    ));
                }
            }
            None => {
                for point_val in points_val {
                    points.push(coord_pair(point_val, index)?);
                }
            }
        }
        arcs.push(points);
    }
    Ok(arcs)
}

fn coord_pair(value: &Value, arc_index: usize) -> Result<(f64, f64), TopologyError> {
    let arr = value.as_array().ok_or(TopologyError::InvalidArc {
        index: arc_index,
    })?;
    if arr.len() < 2 {
        return Err(TopologyError::InvalidArc { index: arc_index });
    }
    let x = arr[0].as_f64().ok_or(TopologyError::InvalidArc {
        index: arc_index,
    })?;
    let y = arr[1].as_f64().ok_or(TopologyError::InvalidArc {
        index: arc_index,
    })?;
    Ok((x, y))
}

fn parse_geometry(value: &Value) -> Result<TopoGeometry, TopologyError> {
    let obj = value.as_object().ok_or_else(|| TopologyError::InvalidGeometry {
        reason: "geometry must be an object".to_string(),
    })?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| TopologyError::InvalidGeometry {
            reason: "geometry missing type".to_string(),
        })?;

    match ty {
        "GeometryCollection" => {
            let members_val = obj
                .get("geometries")
                .and_then(|v| v.as_array())
                .ok_or_else(|| TopologyError::InvalidGeometry {
                    reason: "GeometryCollection missing geometries".to_string(),
                })?;
            let mut members = Vec::with_capacity(members_val.len());
            for member in members_val {
                members.push(parse_geometry(member)?);
            }
            Ok(TopoGeometry::Collection(members))
        }
        "Polygon" => Ok(TopoGeometry::Polygon(parse_arc_rings(obj.get("arcs"))?)),
        "MultiPolygon" => {
            let polys_val = obj
                .get("arcs")
                .and_then(|v| v.as_array())
                .ok_or_else(|| TopologyError::InvalidGeometry {
                    reason: "MultiPolygon missing arcs".to_string(),
                })?;
            let mut polygons = Vec::with_capacity(polys_val.len());
            for poly in polys_val {
                polygons.push(parse_arc_rings(Some(poly))?);
            }
            Ok(TopoGeometry::MultiPolygon(polygons))
        }
        other => Err(TopologyError::InvalidGeometry {
            reason: format!("unsupported geometry type: {other}"),
        }),
    }
}

fn parse_arc_rings(value: Option<&Value>) -> Result<Vec<Vec<i64>>, TopologyError> {
    let rings_val = value
        .and_then(|v| v.as_array())
        .ok_or_else(|| TopologyError::InvalidGeometry {
            reason: "polygon arcs must be an array of rings".to_string(),
        })?;
    let mut rings = Vec::with_capacity(rings_val.len());
    for ring_val in rings_val {
        let refs_val = ring_val
            .as_array()
            .ok_or_else(|| TopologyError::InvalidGeometry {
                reason: "ring must be an array of arc indices".to_string(),
            })?;
        let mut refs = Vec::with_capacity(refs_val.len());
        for r in refs_val {
            refs.push(
                r.as_i64()
                    .ok_or_else(|| TopologyError::InvalidGeometry {
                        reason: "arc index must be an integer".to_string(),
                    })?,
            );
        }
        rings.push(refs);
    }
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use super::{Topology, TopologyError};
    use pretty_assertions::assert_eq;

    fn square_topology() -> Topology {
        // Two arcs splitting a unit square: (0,0)->(1,0)->(1,1) and
        // (1,1)->(0,1)->(0,0), quantized at 0.5 with zero offset.
        let payload = r#"{
            "type": "Topology",
            "transform": {"scale": [0.5, 0.5], "translate": [0.0, 0.0]},
            "arcs": [
                [[0, 0], [2, 0], [0, 2]],
                [[2, 2], [-2, 0], [0, -2]]
            ],
            "objects": {
                "land": {"type": "Polygon", "arcs": [[0, 1]]},
                "groups": {
                    "type": "GeometryCollection",
                    "geometries": [{"type": "MultiPolygon", "arcs": [[[-2, -1]]]}]
                }
            }
        }"#;
        Topology::parse(payload).expect("parse topology")
    }

    #[test]
    fn delta_decoding_is_cumulative() {
        let topo = square_topology();
        let rings = topo.object_polygons("land").expect("land polygons");
        assert_eq!(
            rings,
            vec![vec![vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0),
            ]]]
        );
    }

    #[test]
    fn negative_arc_indices_reverse_traversal() {
        let topo = square_topology();
        let rings = topo.object_polygons("groups").expect("group polygons");
        assert_eq!(
            rings,
            vec![vec![vec![
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (0.0, 0.0),
            ]]]
        );
    }

    #[test]
    fn unknown_object_is_an_error() {
        let topo = square_topology();
        assert!(matches!(
            topo.object_polygons("ocean"),
            Err(TopologyError::UnknownObject { .. })
        ));
    }

    #[test]
    fn non_topology_payload_is_rejected() {
        assert!(matches!(
            Topology::parse(r#"{"type": "FeatureCollection"}"#),
            Err(TopologyError::NotATopology)
        ));
    }

    #[test]
    fn parses_the_demo_basemap() {
        let payload = include_str!("../../apps/viewer/assets/land.json");
        let topo = Topology::parse(payload).expect("parse demo basemap");
        let polygons = topo.object_polygons("land").expect("land object");
        assert!(!polygons.is_empty());
    }
}
