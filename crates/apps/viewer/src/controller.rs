use foundation::{HISTORICAL_DOMAIN, Year};
use foundation::math::{Mercator, Vec2};
use formats::point_table::PointCategory;
use formats::province_table::ProvinceIndex;
use layers::{
    BasemapLayer, BasemapSnapshot, MarkerLayer, MarkerSnapshot, RegionLayer, RegionSnapshot,
};
use scene::temporal::filter_by_year;
use scene::{LayerKind, MapScene};
use tracing::{debug, warn};

use crate::events::{EventQueue, ViewEvent};
use crate::fetch::ResourceFetcher;
use crate::loader::DataLoader;
use crate::state::{Category, DEFAULT_PROVINCE, ViewState, clamp_transform};

/// Reference table naming each province's data file and representative year.
pub const PROVINCES_RESOURCE: &str = "provinces.csv";

/// The single controller: owns the view state, the scene, the loader, and
/// the province index, and is the only place state transitions happen.
pub struct ViewController<F: ResourceFetcher> {
    fetcher: F,
    provinces: ProvinceIndex,
    loader: DataLoader,
    scene: MapScene,
    state: ViewState,
}

impl<F: ResourceFetcher> ViewController<F> {
    /// Builds the controller and its startup province index. A missing or
    /// malformed reference table degrades to an empty index (every region
    /// selection becomes a no-op).
    pub fn new(fetcher: F) -> Self {
        let provinces = match fetcher.fetch(PROVINCES_RESOURCE) {
            Ok(payload) => ProvinceIndex::parse(&payload).unwrap_or_else(|e| {
                warn!("province table unusable: {e}");
                ProvinceIndex::default()
            }),
            Err(e) => {
                warn!("province table fetch failed: {e}");
                ProvinceIndex::default()
            }
        };

        Self {
            fetcher,
            provinces,
            loader: DataLoader::new(Mercator::fixed()),
            scene: MapScene::new(),
            state: ViewState::initial(),
        }
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn provinces(&self) -> &ProvinceIndex {
        &self.provinces
    }

    /// Loads the basemap and the initial category.
    pub fn start(&mut self) {
        self.loader.load_basemap(&self.fetcher, &mut self.scene);
        self.reload_active_category();
    }

    /// Drains the queue and dispatches each event in arrival order.
    pub fn run(&mut self, queue: &mut EventQueue) {
        for event in queue.drain() {
            self.handle(event);
        }
    }

    /// Dispatch, keyed by event kind.
    pub fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::CategorySelected(category) => self.on_category_selected(category),
            ViewEvent::RegionSelected(name) => self.on_region_selected(&name),
            ViewEvent::YearSlid(year) => self.on_year_changed(year),
            ViewEvent::YearTyped(text) => self.on_year_typed(&text),
            ViewEvent::Zoomed { scale, translate } => self.on_zoomed(scale, translate),
        }
    }

    fn on_category_selected(&mut self, category: Category) {
        self.state.category = category;
        // The outgoing category's shapes must never linger under the new
        // selection, even if the replacement load fails.
        self.scene.clear(LayerKind::Markers);
        match category {
            Category::Cities => {
                self.scene.clear(LayerKind::Region);
                self.load_points(PointCategory::Cities);
            }
            Category::Battles => {
                self.scene.clear(LayerKind::Region);
                self.load_points(PointCategory::Battles);
            }
            Category::Provinces => self.load_region(DEFAULT_PROVINCE),
        }
    }

    fn on_region_selected(&mut self, name: &str) {
        self.state.category = Category::Provinces;
        self.scene.clear(LayerKind::Markers);
        self.load_region(name);
    }

    fn on_year_changed(&mut self, year: Year) {
        if !HISTORICAL_DOMAIN.contains(year) {
            debug!(
                "year {} outside the domain, keeping {}",
                year.0, self.state.year.0
            );
            return;
        }
        self.state.year = year;
        filter_by_year(&mut self.scene, year);
    }

    /// Textual year entry: rejected input reverts to the last valid value.
    fn on_year_typed(&mut self, text: &str) {
        match text.trim().parse::<i32>() {
            Ok(value) if HISTORICAL_DOMAIN.contains(Year(value)) => {
                self.on_year_changed(Year(value));
            }
            _ => debug!(
                "rejected year input {text:?}, keeping {}",
                self.state.year.0
            ),
        }
    }

    fn on_zoomed(&mut self, scale: f64, translate: Vec2) {
        self.state.transform = clamp_transform(scale, translate);
    }

    fn reload_active_category(&mut self) {
        self.on_category_selected(self.state.category);
    }

    fn load_points(&mut self, category: PointCategory) {
        let ticket = self.loader.begin_points();
        if let Some(table) = self.loader.fetch_points(&self.fetcher, category) {
            if self.loader.complete_points(ticket, &table, &mut self.scene) {
                filter_by_year(&mut self.scene, self.state.year);
            }
        }
    }

    fn load_region(&mut self, name: &str) {
        let entry = match self.provinces.get(name) {
            Some(entry) => entry.clone(),
            None => {
                debug!("no province entry for {name:?}, ignoring");
                return;
            }
        };

        let ticket = self.loader.begin_region();
        if let Some(polygon) = self.loader.fetch_region(&self.fetcher, &entry.file) {
            if self
                .loader
                .complete_region(ticket, name, &polygon, Some(entry.year), &mut self.scene)
            {
                filter_by_year(&mut self.scene, self.state.year);
            }
        }
    }

    pub fn basemap_snapshot(&self) -> BasemapSnapshot {
        BasemapLayer::new().extract(&self.scene, self.state.transform)
    }

    pub fn markers_snapshot(&self) -> MarkerSnapshot {
        MarkerLayer::new().extract(&self.scene, self.state.transform)
    }

    pub fn region_snapshot(&self) -> Option<RegionSnapshot> {
        RegionLayer::new().extract(&self.scene, self.state.transform)
    }
}
