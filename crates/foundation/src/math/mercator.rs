use super::Vec2;

/// Canvas width the fixed projection is calibrated for (pixels).
pub const CANVAS_WIDTH: f64 = 960.0;
/// Canvas height the fixed projection is calibrated for (pixels).
pub const CANVAS_HEIGHT: f64 = 600.0;
/// Fixed projection scale.
pub const MAP_SCALE: f64 = 900.0;
/// Fixed projection center, degrees east.
pub const CENTER_LON_DEG: f64 = 10.0;
/// Fixed projection center, degrees north.
pub const CENTER_LAT_DEG: f64 = 48.0;

/// Mercator projection with a fixed scale, center, and translation offset.
///
/// Pure and stateless beyond its parameters. Non-finite input propagates to
/// non-finite output; callers validate coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mercator {
    scale: f64,
    center_lon_rad: f64,
    center_y: f64,
    translate: Vec2,
}

impl Mercator {
    pub fn new(scale: f64, center_lon_deg: f64, center_lat_deg: f64, translate: Vec2) -> Self {
        Self {
            scale,
            center_lon_rad: center_lon_deg.to_radians(),
            center_y: mercator_y(center_lat_deg.to_radians()),
            translate,
        }
    }

    /// The calibrated projection: centered on the Mediterranean, filling the
    /// 960x600 canvas.
    pub fn fixed() -> Self {
        Self::new(
            MAP_SCALE,
            CENTER_LON_DEG,
            CENTER_LAT_DEG,
            Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
        )
    }

    /// Projects a (longitude, latitude) pair in degrees to pixel coordinates.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Vec2 {
        let x = self.translate.x + self.scale * (lon_deg.to_radians() - self.center_lon_rad);
        let y = self.translate.y + self.scale * (self.center_y - mercator_y(lat_deg.to_radians()));
        Vec2::new(x, y)
    }
}

fn mercator_y(lat_rad: f64) -> f64 {
    (std::f64::consts::FRAC_PI_4 + lat_rad / 2.0).tan().ln()
}
