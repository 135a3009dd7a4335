pub mod controller;
pub mod events;
pub mod fetch;
pub mod loader;
pub mod state;

pub use controller::*;
pub use events::*;
pub use fetch::*;
pub use loader::*;
pub use state::*;
