pub mod ingest;
pub mod point_table;
pub mod province_table;
pub mod region_file;
pub mod topology;
pub mod winding;

pub use ingest::*;
pub use point_table::*;
pub use province_table::*;
pub use region_file::*;
pub use topology::*;
pub use winding::*;
