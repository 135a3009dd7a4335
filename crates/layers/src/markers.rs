use foundation::math::{Vec2, ViewTransform};
use scene::components::{MarkerKind, Properties};
use scene::{LayerKind, MapScene};

use crate::layer::Layer;

/// Marker radius at zoom scale 1 (pixels).
pub const BASE_MARKER_RADIUS: f64 = 2.5;

#[derive(Debug, Default, Copy, Clone)]
pub struct MarkerLayer;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub position: Vec2,
    pub kind: MarkerKind,
    pub label: Properties,
}

/// Visible markers in canvas coordinates. The host applies `transform` to
/// the group; `radius` shrinks inversely with the zoom scale so markers keep
/// a constant apparent size.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSnapshot {
    pub transform: ViewTransform,
    pub radius: f64,
    pub points: Vec<MarkerPoint>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, scene: &MapScene, view: ViewTransform) -> MarkerSnapshot {
        let points = scene
            .visible_markers()
            .into_iter()
            .map(|marker| MarkerPoint {
                position: marker.position,
                kind: marker.kind,
                label: marker.label.clone(),
            })
            .collect();

        MarkerSnapshot {
            transform: view,
            radius: BASE_MARKER_RADIUS / view.scale,
            points,
        }
    }
}

impl Layer for MarkerLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Markers
    }
}

#[cfg(test)]
mod tests {
    use super::{BASE_MARKER_RADIUS, MarkerLayer};
    use foundation::Year;
    use foundation::math::{Vec2, ViewTransform};
    use scene::MapScene;
    use scene::components::{Marker, MarkerKind, Properties};

    fn scene_with_marker() -> MapScene {
        let mut scene = MapScene::new();
        scene.replace_markers(vec![Marker::new(
            MarkerKind::Battle,
            Vec2::new(500.0, 280.0),
            Year(-216),
            Properties::default(),
        )]);
        scene
    }

    #[test]
    fn radius_shrinks_inversely_with_zoom() {
        let scene = scene_with_marker();
        let layer = MarkerLayer::new();

        let at_1 = layer.extract(&scene, ViewTransform::identity());
        let at_4 = layer.extract(&scene, ViewTransform::new(4.0, Vec2::new(0.0, 0.0)));
        assert_eq!(at_1.radius, BASE_MARKER_RADIUS);
        assert_eq!(at_4.radius, BASE_MARKER_RADIUS / 4.0);
    }

    #[test]
    fn hidden_markers_are_not_extracted() {
        let mut scene = scene_with_marker();
        scene.set_marker_visibility(|_| false);

        let snapshot = MarkerLayer::new().extract(&scene, ViewTransform::identity());
        assert!(snapshot.points.is_empty());
    }
}
