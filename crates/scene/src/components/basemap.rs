use foundation::math::Vec2;

/// One basemap polygon (land mass) in projected canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BasemapShape {
    pub rings: Vec<Vec<Vec2>>,
}

impl BasemapShape {
    pub fn new(rings: Vec<Vec<Vec2>>) -> Self {
        Self { rings }
    }
}
