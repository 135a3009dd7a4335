/// The three drawable layers, bottom to top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Basemap,
    Markers,
    Region,
}
