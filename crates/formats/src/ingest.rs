use foundation::Year;
use foundation::math::{Mercator, Vec2};
use scene::components::{BasemapShape, Marker, MarkerKind, Properties, Region};

use crate::point_table::{PointCategory, PointTable};
use crate::region_file::RegionPolygon;

/// Projects a parsed point table into marker entities.
pub fn markers_from_table(table: &PointTable, projector: &Mercator) -> Vec<Marker> {
    let kind = match table.category {
        PointCategory::Cities => MarkerKind::City,
        PointCategory::Battles => MarkerKind::Battle,
    };

    table
        .records
        .iter()
        .map(|record| {
            Marker::new(
                kind,
                projector.project(record.longitude, record.latitude),
                Year(record.year),
                Properties::new(record.labels.clone()),
            )
        })
        .collect()
}

/// Projects expanded topology polygons into basemap shapes.
pub fn basemap_from_polygons(
    polygons: &[Vec<Vec<(f64, f64)>>],
    projector: &Mercator,
) -> Vec<BasemapShape> {
    polygons
        .iter()
        .map(|rings| BasemapShape::new(project_rings(rings, projector)))
        .collect()
}

/// Projects a repaired region polygon into the resident region entity.
pub fn region_from_polygon(
    name: impl Into<String>,
    polygon: &RegionPolygon,
    year: Option<Year>,
    projector: &Mercator,
) -> Region {
    Region::new(name, project_rings(&polygon.rings, projector), year)
}

fn project_rings(rings: &[Vec<(f64, f64)>], projector: &Mercator) -> Vec<Vec<Vec2>> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|&(lon, lat)| projector.project(lon, lat))
                .collect()
        })
        .collect()
}
