use std::fmt;

use super::vector3::Vector3;

/// Integer block coordinates inside a world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[must_use]
    pub fn floored_v(pos: Vector3<f64>) -> Self {
        Self(pos.to_i32())
    }

    /// The centre of the block's bottom face, where mobs are placed.
    #[must_use]
    pub fn to_bottom_center(&self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.0.x) + 0.5,
            f64::from(self.0.y),
            f64::from(self.0.z) + 0.5,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}
