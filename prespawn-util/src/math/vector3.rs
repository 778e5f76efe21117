use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy + Add<Output = T>> Vector3<T> {
    #[must_use]
    pub fn add_raw(&self, x: T, y: T, z: T) -> Self {
        Self {
            x: self.x + x,
            y: self.y + y,
            z: self.z + z,
        }
    }
}

impl Vector3<f64> {
    #[must_use]
    pub fn to_i32(&self) -> Vector3<i32> {
        Vector3::new(
            super::floor_to_block(self.x),
            super::floor_to_block(self.y),
            super::floor_to_block(self.z),
        )
    }
}
