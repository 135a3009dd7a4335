use foundation::Year;
use foundation::math::Vec2;

use super::Properties;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    City,
    Battle,
}

/// A point overlay entity in projected canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Vec2,
    pub year: Year,
    pub label: Properties,
}

impl Marker {
    pub fn new(kind: MarkerKind, position: Vec2, year: Year, label: Properties) -> Self {
        Self {
            kind,
            position,
            year,
            label,
        }
    }
}
