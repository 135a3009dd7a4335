use foundation::Year;
use foundation::math::Mercator;
use formats::point_table::{PointCategory, PointTable, parse_point_table};
use formats::region_file::{RegionPolygon, parse_region_polygon};
use formats::topology::Topology;
use formats::{basemap_from_polygons, markers_from_table, region_from_polygon};
use scene::MapScene;
use tracing::{debug, warn};

use crate::fetch::ResourceFetcher;

/// Topology resource holding the basemap, and the object to expand from it.
pub const BASEMAP_RESOURCE: &str = "land.json";
pub const BASEMAP_OBJECT: &str = "land";

pub fn table_resource(category: PointCategory) -> &'static str {
    match category {
        PointCategory::Cities => "cities.csv",
        PointCategory::Battles => "battles.csv",
    }
}

/// Ticket for one load. A completion is applied only while its ticket is
/// still current, so a superseded fetch can never overwrite newer state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub u64);

/// Fetches and parses resources, and applies them to the scene.
///
/// Loads are split into `begin_*` (ticket issue) and `complete_*` (payload
/// application): the host event loop owns any suspension in between. Every
/// failure degrades to "show less": logged, never fatal, never retried.
#[derive(Debug)]
pub struct DataLoader {
    projector: Mercator,
    points_generation: u64,
    region_generation: u64,
}

impl DataLoader {
    pub fn new(projector: Mercator) -> Self {
        Self {
            projector,
            points_generation: 0,
            region_generation: 0,
        }
    }

    pub fn begin_points(&mut self) -> LoadTicket {
        self.points_generation += 1;
        LoadTicket(self.points_generation)
    }

    pub fn begin_region(&mut self) -> LoadTicket {
        self.region_generation += 1;
        LoadTicket(self.region_generation)
    }

    /// Fetches and parses a point table. `None` means the layer stays as it
    /// is (degraded, already logged).
    pub fn fetch_points(
        &self,
        fetcher: &dyn ResourceFetcher,
        category: PointCategory,
    ) -> Option<PointTable> {
        let resource = table_resource(category);
        let payload = match fetcher.fetch(resource) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("point table fetch failed: {e}");
                return None;
            }
        };
        match parse_point_table(&payload, category) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("point table {resource} unusable: {e}");
                None
            }
        }
    }

    /// Replaces the marker layer, unless the ticket has been superseded.
    pub fn complete_points(
        &self,
        ticket: LoadTicket,
        table: &PointTable,
        scene: &mut MapScene,
    ) -> bool {
        if ticket.0 != self.points_generation {
            debug!(
                "discarding stale point load (ticket {} < generation {})",
                ticket.0, self.points_generation
            );
            return false;
        }
        scene.replace_markers(markers_from_table(table, &self.projector));
        true
    }

    /// Fetches and parses a region polygon file.
    pub fn fetch_region(
        &self,
        fetcher: &dyn ResourceFetcher,
        resource: &str,
    ) -> Option<RegionPolygon> {
        let payload = match fetcher.fetch(resource) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("region fetch failed: {e}");
                return None;
            }
        };
        match parse_region_polygon(&payload) {
            Ok(polygon) => Some(polygon),
            Err(e) => {
                warn!("region file {resource} unusable: {e}");
                None
            }
        }
    }

    /// Replaces the resident region, unless the ticket has been superseded.
    pub fn complete_region(
        &self,
        ticket: LoadTicket,
        name: &str,
        polygon: &RegionPolygon,
        year: Option<Year>,
        scene: &mut MapScene,
    ) -> bool {
        if ticket.0 != self.region_generation {
            debug!(
                "discarding stale region load (ticket {} < generation {})",
                ticket.0, self.region_generation
            );
            return false;
        }
        scene.replace_region(region_from_polygon(name, polygon, year, &self.projector));
        true
    }

    /// Loads the basemap layer. On failure the basemap keeps its prior
    /// contents and the viewer runs degraded.
    pub fn load_basemap(&self, fetcher: &dyn ResourceFetcher, scene: &mut MapScene) -> bool {
        let payload = match fetcher.fetch(BASEMAP_RESOURCE) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("basemap fetch failed: {e}");
                return false;
            }
        };
        let topology = match Topology::parse(&payload) {
            Ok(topology) => topology,
            Err(e) => {
                warn!("basemap topology unusable: {e}");
                return false;
            }
        };
        let polygons = match topology.object_polygons(BASEMAP_OBJECT) {
            Ok(polygons) => polygons,
            Err(e) => {
                warn!("basemap object missing: {e}");
                return false;
            }
        };
        scene.set_basemap(basemap_from_polygons(&polygons, &self.projector));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::DataLoader;
    use crate::fetch::MemoryFetcher;
    use foundation::math::Mercator;
    use formats::point_table::PointCategory;
    use scene::MapScene;
    use scene::components::MarkerKind;

    fn fetcher() -> MemoryFetcher {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(
            "cities.csv",
            "City,Longitude,Latitude,Year\nRoma,12.5,41.9,-753\n",
        );
        fetcher.insert(
            "battles.csv",
            "Battle,War,Winner,Longitude,Latitude,Year\nCannae,Second Punic War,Carthage,16.1,41.3,-216\n",
        );
        fetcher
    }

    #[test]
    fn stale_point_completion_is_discarded() {
        let fetcher = fetcher();
        let mut loader = DataLoader::new(Mercator::fixed());
        let mut scene = MapScene::new();

        // A battles load begins, then a cities load supersedes it before the
        // battles response arrives.
        let battles_ticket = loader.begin_points();
        let battles = loader
            .fetch_points(&fetcher, PointCategory::Battles)
            .expect("battles table");

        let cities_ticket = loader.begin_points();
        let cities = loader
            .fetch_points(&fetcher, PointCategory::Cities)
            .expect("cities table");
        assert!(loader.complete_points(cities_ticket, &cities, &mut scene));

        assert!(!loader.complete_points(battles_ticket, &battles, &mut scene));
        assert!(scene.markers().all(|m| m.kind == MarkerKind::City));
    }

    #[test]
    fn fetch_failure_degrades_to_prior_state() {
        let empty = MemoryFetcher::new();
        let mut loader = DataLoader::new(Mercator::fixed());
        let mut scene = MapScene::new();

        let _ticket = loader.begin_points();
        assert!(loader.fetch_points(&empty, PointCategory::Cities).is_none());
        assert!(!loader.load_basemap(&empty, &mut scene));
        assert_eq!(scene.marker_count(), 0);
        assert!(scene.basemap().is_empty());
    }
}
