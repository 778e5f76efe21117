use std::{fmt, sync::Arc};

use crate::math::{position::BlockPos, vector3::Vector3};

/// Handle to the world a [`Location`] lives in.
///
/// Cloning only bumps a reference count, so copying a `Location` stays cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorldRef(Arc<str>);

impl WorldRef {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in a world together with a facing direction.
///
/// This is a plain value: handing a `Location` out always hands out a copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub world: WorldRef,
    pub position: Vector3<f64>,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    #[must_use]
    pub const fn new(world: WorldRef, position: Vector3<f64>) -> Self {
        Self {
            world,
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[must_use]
    pub const fn with_rotation(world: WorldRef, position: Vector3<f64>, yaw: f32, pitch: f32) -> Self {
        Self {
            world,
            position,
            yaw,
            pitch,
        }
    }

    #[must_use]
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::floored_v(self.position)
    }

    /// Returns a copy moved by the given offset.
    #[must_use]
    pub fn add(&self, x: f64, y: f64, z: f64) -> Self {
        Self {
            position: self.position.add_raw(x, y, z),
            ..self.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{:.2}, {:.2}, {:.2}]",
            self.world, self.position.x, self.position.y, self.position.z
        )
    }
}
