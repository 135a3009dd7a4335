use foundation::{HISTORICAL_DOMAIN, Year};

use crate::map_scene::MapScene;

/// Year assumed for a region feature that carries no year of its own.
///
/// The end of the historical domain: an undated region stays visible at every
/// year the control can reach.
pub const DEFAULT_REGION_YEAR: Year = HISTORICAL_DOMAIN.end;

/// Shows each rendered entity iff its year is at or before `year`.
///
/// Pure visibility toggle over the already-rendered scene; never re-fetches
/// or re-projects anything.
pub fn filter_by_year(scene: &mut MapScene, year: Year) {
    scene.set_marker_visibility(|marker| marker.year <= year);

    let region_year = scene
        .region()
        .map(|region| region.year.unwrap_or(DEFAULT_REGION_YEAR));
    if let Some(region_year) = region_year {
        scene.set_region_visible(region_year <= year);
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_REGION_YEAR, filter_by_year};
    use crate::components::{Marker, MarkerKind, Properties, Region};
    use crate::map_scene::MapScene;
    use foundation::Year;
    use foundation::math::Vec2;

    fn scene_with_years(years: &[i32]) -> MapScene {
        let mut scene = MapScene::new();
        scene.replace_markers(
            years
                .iter()
                .map(|&y| {
                    Marker::new(
                        MarkerKind::Battle,
                        Vec2::new(0.0, 0.0),
                        Year(y),
                        Properties::default(),
                    )
                })
                .collect(),
        );
        scene
    }

    fn visible_years(scene: &MapScene) -> Vec<i32> {
        scene.visible_markers().iter().map(|m| m.year.0).collect()
    }

    #[test]
    fn marker_at_exact_year_is_visible() {
        let mut scene = scene_with_years(&[-216]);
        filter_by_year(&mut scene, Year(-216));
        assert_eq!(visible_years(&scene), vec![-216]);
    }

    #[test]
    fn reveal_is_monotonic_in_year() {
        let mut scene = scene_with_years(&[-753, -216, -48, 330, 476]);
        let mut previous: Vec<i32> = Vec::new();
        for y in [-500, -200, 0, 400, 476] {
            filter_by_year(&mut scene, Year(y));
            let now = visible_years(&scene);
            assert!(
                previous.iter().all(|year| now.contains(year)),
                "markers visible at an earlier year disappeared at {y}"
            );
            previous = now;
        }
    }

    #[test]
    fn undated_region_uses_the_default_year() {
        let mut scene = MapScene::new();
        scene.replace_region(Region::new("Spain", vec![], None));

        filter_by_year(&mut scene, Year(0));
        assert!(scene.visible_region().is_none());

        filter_by_year(&mut scene, DEFAULT_REGION_YEAR);
        assert!(scene.visible_region().is_some());
    }

    #[test]
    fn dated_region_follows_its_own_year() {
        let mut scene = MapScene::new();
        scene.replace_region(Region::new("Spain", vec![], Some(Year(-197))));

        filter_by_year(&mut scene, Year(-200));
        assert!(scene.visible_region().is_none());

        filter_by_year(&mut scene, Year(-197));
        assert!(scene.visible_region().is_some());
    }
}
