use foundation::Year;
use foundation::math::Vec2;

/// The highlighted region: a named polygon in projected canvas coordinates.
///
/// `rings[0]` is the outer boundary, counter-clockwise after winding repair;
/// any further rings are holes. `year` is the representative year from the
/// province reference table, when the entry carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub rings: Vec<Vec<Vec2>>,
    pub year: Option<Year>,
}

impl Region {
    pub fn new(name: impl Into<String>, rings: Vec<Vec<Vec2>>, year: Option<Year>) -> Self {
        Self {
            name: name.into(),
            rings,
            year,
        }
    }
}
