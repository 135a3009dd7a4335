pub mod basemap;
pub mod layer;
pub mod markers;
pub mod region;

pub use basemap::*;
pub use layer::*;
pub use markers::*;
pub use region::*;
