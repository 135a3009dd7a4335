use foundation::math::{Vec2, ViewTransform};
use scene::{LayerKind, MapScene};

use crate::layer::Layer;

#[derive(Debug, Default, Copy, Clone)]
pub struct BasemapLayer;

/// Basemap outlines in canvas coordinates; the host applies `transform` to
/// the whole group, like every other layer snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BasemapSnapshot {
    pub transform: ViewTransform,
    pub outlines: Vec<Vec<Vec2>>,
}

impl BasemapLayer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, scene: &MapScene, view: ViewTransform) -> BasemapSnapshot {
        let mut outlines = Vec::new();
        for shape in scene.basemap() {
            for ring in &shape.rings {
                outlines.push(ring.clone());
            }
        }
        BasemapSnapshot {
            transform: view,
            outlines,
        }
    }
}

impl Layer for BasemapLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Basemap
    }
}
