use std::env;
use std::path::PathBuf;

use foundation::Year;
use foundation::math::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{Category, DirFetcher, EventQueue, ViewController, ViewEvent};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let assets = env::args()
        .nth(1)
        .or_else(|| env::var("ATLAS_ASSETS").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/apps/viewer/assets"));
    info!("asset root: {}", assets.display());

    let mut controller = ViewController::new(DirFetcher::new(assets));
    controller.start();
    summarize(&controller);

    // Replay a short interaction: slide the year back, inspect the battles,
    // then highlight a province and zoom in on it.
    let mut queue = EventQueue::new();
    queue.push(ViewEvent::YearSlid(Year(-200)));
    queue.push(ViewEvent::CategorySelected(Category::Battles));
    controller.run(&mut queue);
    summarize(&controller);

    queue.push(ViewEvent::CategorySelected(Category::Provinces));
    queue.push(ViewEvent::Zoomed {
        scale: 4.0,
        translate: Vec2::new(-1200.0, -700.0),
    });
    controller.run(&mut queue);
    summarize(&controller);
}

fn summarize<F: viewer::ResourceFetcher>(controller: &ViewController<F>) {
    let state = controller.state();
    let basemap = controller.basemap_snapshot();
    let markers = controller.markers_snapshot();

    info!(
        "{:?} at year {}: {} basemap outlines, {} markers (radius {:.2}), scale {:.1}",
        state.category,
        state.year.0,
        basemap.outlines.len(),
        markers.points.len(),
        markers.radius,
        state.transform.scale,
    );

    match controller.region_snapshot() {
        Some(region) => info!(
            "region {} highlighted: {} outline rings, {} fill triangles",
            region.name,
            region.outline.len(),
            region.fill_triangles.len() / 3,
        ),
        None => info!("no region highlighted"),
    }
}
