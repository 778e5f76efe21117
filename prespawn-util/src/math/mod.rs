pub mod boundingbox;
pub mod position;
pub mod vector3;

/// Converts a world coordinate to a block coordinate.
#[must_use]
pub fn floor_to_block(value: f64) -> i32 {
    value.floor() as i32
}
