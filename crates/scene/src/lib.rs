pub mod components;
pub mod layer;
pub mod map_scene;
pub mod temporal;

pub use layer::*;
pub use map_scene::*;
