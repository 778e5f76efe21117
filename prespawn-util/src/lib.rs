pub mod location;
pub mod math;

pub use location::{Location, WorldRef};
