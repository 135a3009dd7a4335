use crate::components::{BasemapShape, Marker, Region};
use crate::layer::LayerKind;

#[derive(Debug, Clone, PartialEq)]
struct MarkerSlot {
    marker: Marker,
    visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct RegionSlot {
    region: Region,
    visible: bool,
}

/// The layer store: three independent drawable layers, each clearable and
/// repopulatable on its own.
///
/// Visibility is per entity and is the temporal filter's only lever; clearing
/// or repopulating a layer resets its entities to visible.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapScene {
    basemap: Vec<BasemapShape>,
    markers: Vec<MarkerSlot>,
    region: Option<RegionSlot>,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, layer: LayerKind) {
        match layer {
            LayerKind::Basemap => self.basemap.clear(),
            LayerKind::Markers => self.markers.clear(),
            LayerKind::Region => self.region = None,
        }
    }

    pub fn set_basemap(&mut self, shapes: Vec<BasemapShape>) {
        self.basemap = shapes;
    }

    pub fn basemap(&self) -> &[BasemapShape] {
        &self.basemap
    }

    /// Replaces the whole marker layer. New markers start visible.
    pub fn replace_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers
            .into_iter()
            .map(|marker| MarkerSlot {
                marker,
                visible: true,
            })
            .collect();
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().map(|slot| &slot.marker)
    }

    pub fn visible_markers(&self) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|slot| slot.visible)
            .map(|slot| &slot.marker)
            .collect()
    }

    pub fn set_marker_visibility(&mut self, mut show: impl FnMut(&Marker) -> bool) {
        for slot in &mut self.markers {
            slot.visible = show(&slot.marker);
        }
    }

    /// Replaces the resident region. The new region starts visible.
    pub fn replace_region(&mut self, region: Region) {
        self.region = Some(RegionSlot {
            region,
            visible: true,
        });
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref().map(|slot| &slot.region)
    }

    pub fn visible_region(&self) -> Option<&Region> {
        self.region
            .as_ref()
            .filter(|slot| slot.visible)
            .map(|slot| &slot.region)
    }

    pub fn set_region_visible(&mut self, visible: bool) {
        if let Some(slot) = &mut self.region {
            slot.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapScene;
    use crate::components::{Marker, MarkerKind, Properties, Region};
    use crate::layer::LayerKind;
    use foundation::Year;
    use foundation::math::Vec2;

    fn marker(year: i32) -> Marker {
        Marker::new(
            MarkerKind::City,
            Vec2::new(0.0, 0.0),
            Year(year),
            Properties::default(),
        )
    }

    #[test]
    fn layers_clear_independently() {
        let mut scene = MapScene::new();
        scene.replace_markers(vec![marker(-100)]);
        scene.replace_region(Region::new("Spain", vec![], None));

        scene.clear(LayerKind::Markers);
        assert_eq!(scene.marker_count(), 0);
        assert!(scene.region().is_some());

        scene.clear(LayerKind::Region);
        assert!(scene.region().is_none());
    }

    #[test]
    fn replacing_markers_resets_visibility() {
        let mut scene = MapScene::new();
        scene.replace_markers(vec![marker(-100), marker(200)]);
        scene.set_marker_visibility(|_| false);
        assert!(scene.visible_markers().is_empty());

        scene.replace_markers(vec![marker(300)]);
        assert_eq!(scene.visible_markers().len(), 1);
    }

    #[test]
    fn hidden_region_is_filtered_from_visible_query() {
        let mut scene = MapScene::new();
        scene.replace_region(Region::new("Gaul", vec![], Some(Year(-51))));
        assert!(scene.visible_region().is_some());

        scene.set_region_visible(false);
        assert!(scene.visible_region().is_none());
        assert!(scene.region().is_some());
    }
}
