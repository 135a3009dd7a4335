pub mod basemap;
pub mod marker;
pub mod properties;
pub mod region;

pub use basemap::*;
pub use marker::*;
pub use properties::*;
pub use region::*;
