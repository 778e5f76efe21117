pub mod context;
pub mod events;

pub use context::*;
pub use events::*;
