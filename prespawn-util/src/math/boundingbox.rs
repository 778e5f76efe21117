use super::{position::BlockPos, vector3::Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    /// A box of the given dimensions standing on `(x, y, z)`, centred horizontally.
    #[must_use]
    pub fn new_from_pos(x: f64, y: f64, z: f64, size: &EntityDimensions) -> Self {
        let f = f64::from(size.width) / 2.;
        Self {
            min: Vector3::new(x - f, y, z - f),
            max: Vector3::new(x + f, y + f64::from(size.height), z + f),
        }
    }

    #[must_use]
    pub fn min_block_pos(&self) -> BlockPos {
        BlockPos::floored_v(self.min)
    }

    #[must_use]
    pub fn max_block_pos(&self) -> BlockPos {
        // A max exactly on a block boundary does not reach into the next block.
        let eps = 1e-9f64;
        BlockPos::floored_v(Vector3::new(
            self.max.x - eps,
            self.max.y - eps,
            self.max.z - eps,
        ))
    }

    /// Every block position the box overlaps.
    pub fn block_positions(&self) -> impl Iterator<Item = BlockPos> + use<> {
        let min = self.min_block_pos().0;
        let max = self.max_block_pos().0;
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y)
                .flat_map(move |y| (min.z..=max.z).map(move |z| BlockPos::new(x, y, z)))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityDimensions {
    pub width: f32,
    pub height: f32,
}

impl EntityDimensions {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
