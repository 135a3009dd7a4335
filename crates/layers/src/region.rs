use earcutr::earcut;
use foundation::math::{Vec2, ViewTransform};
use scene::{LayerKind, MapScene};

use crate::layer::Layer;

#[derive(Debug, Default, Copy, Clone)]
pub struct RegionLayer;

/// The visible highlighted region: outline rings plus a triangulated fill
/// (flat list, 3 vertices per triangle), both in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    pub name: String,
    pub transform: ViewTransform,
    pub outline: Vec<Vec<Vec2>>,
    pub fill_triangles: Vec<Vec2>,
}

impl RegionLayer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, scene: &MapScene, view: ViewTransform) -> Option<RegionSnapshot> {
        let region = scene.visible_region()?;
        Some(RegionSnapshot {
            name: region.name.clone(),
            transform: view,
            outline: region.rings.clone(),
            fill_triangles: triangulate_rings(&region.rings),
        })
    }
}

impl Layer for RegionLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Region
    }
}

fn triangulate_rings(rings: &[Vec<Vec2>]) -> Vec<Vec2> {
    let Some(outer) = rings.first() else {
        return Vec::new();
    };
    if outer.len() < 3 {
        return Vec::new();
    }

    // Flatten rings into the earcut input layout, dropping each ring's
    // closing duplicate vertex if present.
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (ring_index, ring) in rings.iter().enumerate() {
        let mut points = ring.clone();
        drop_closing_duplicate(&mut points);
        if points.len() < 3 {
            continue;
        }

        if ring_index > 0 {
            hole_indices.push(vertices.len());
        }

        for p in points {
            coords.push(p.x);
            coords.push(p.y);
            vertices.push(p);
        }
    }

    if vertices.len() < 3 {
        return Vec::new();
    }

    let indices = match earcut(&coords, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::with_capacity(indices.len());
    for index in indices {
        if let Some(v) = vertices.get(index) {
            out.push(*v);
        }
    }
    out
}

fn drop_closing_duplicate(points: &mut Vec<Vec2>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = *points.last().unwrap();
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            points.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RegionLayer;
    use foundation::Year;
    use foundation::math::{Vec2, ViewTransform};
    use scene::MapScene;
    use scene::components::Region;
    use scene::temporal::filter_by_year;

    fn quad_region() -> Region {
        Region::new(
            "Spain",
            vec![vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 0.0),
            ]],
            Some(Year(-197)),
        )
    }

    #[test]
    fn quad_fill_is_two_triangles() {
        let mut scene = MapScene::new();
        scene.replace_region(quad_region());

        let snapshot = RegionLayer::new()
            .extract(&scene, ViewTransform::identity())
            .expect("region snapshot");
        assert_eq!(snapshot.name, "Spain");
        assert_eq!(snapshot.fill_triangles.len(), 6);
    }

    #[test]
    fn filtered_out_region_yields_no_snapshot() {
        let mut scene = MapScene::new();
        scene.replace_region(quad_region());
        filter_by_year(&mut scene, Year(-300));

        assert!(
            RegionLayer::new()
                .extract(&scene, ViewTransform::identity())
                .is_none()
        );
    }
}
