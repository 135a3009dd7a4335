use foundation::math::{CANVAS_HEIGHT, CANVAS_WIDTH, Vec2, ViewTransform};
use foundation::{Bounds2, HISTORICAL_DOMAIN, Year};

/// Zoom scale extent.
pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 100.0;

/// Region shown when the provinces category is first selected.
pub const DEFAULT_PROVINCE: &str = "Spain";

/// Year shown before any interaction: the end of the domain, so everything
/// loaded starts visible.
pub const INITIAL_YEAR: Year = HISTORICAL_DOMAIN.end;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Cities,
    Battles,
    Provinces,
}

/// The single mutable state record. Every handler performs a direct, total
/// update to it; what is visible always derives from it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub category: Category,
    pub year: Year,
    pub transform: ViewTransform,
}

impl ViewState {
    pub fn initial() -> Self {
        Self {
            category: Category::Cities,
            year: INITIAL_YEAR,
            transform: ViewTransform::identity(),
        }
    }
}

/// Clamps a zoom gesture: scale into the extent, translation so the canvas
/// can never be dragged out of view.
pub fn clamp_transform(scale: f64, translate: Vec2) -> ViewTransform {
    let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    let extent = Bounds2::new(
        [(1.0 - scale) * CANVAS_WIDTH, (1.0 - scale) * CANVAS_HEIGHT],
        [0.0, 0.0],
    );
    let (x, y) = extent.clamp(translate.x, translate.y);
    ViewTransform::new(scale, Vec2::new(x, y))
}
