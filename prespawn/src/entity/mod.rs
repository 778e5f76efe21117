use std::fmt;

use prespawn_util::{
    Location,
    math::boundingbox::{BoundingBox, EntityDimensions},
};

pub mod spawn_reason;

pub use spawn_reason::{ParseSpawnReasonError, SpawnReason};

/// Spawn group an entity type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobCategory {
    Monster,
    Creature,
    Ambient,
    WaterCreature,
    Misc,
}

/// Static description of a kind of entity.
#[derive(Debug, PartialEq)]
pub struct EntityType {
    pub id: u16,
    pub resource_name: &'static str,
    pub category: MobCategory,
    pub dimension: EntityDimensions,
    /// Largest group a single natural spawn attempt may produce, unless the
    /// config overrides it.
    pub max_pack_size: u32,
}

impl EntityType {
    pub const ZOMBIE: Self = Self::mob(0, "zombie", MobCategory::Monster, 0.6, 1.95, 4);
    pub const SKELETON: Self = Self::mob(1, "skeleton", MobCategory::Monster, 0.6, 1.99, 4);
    pub const CREEPER: Self = Self::mob(2, "creeper", MobCategory::Monster, 0.6, 1.7, 4);
    pub const SPIDER: Self = Self::mob(3, "spider", MobCategory::Monster, 1.4, 0.9, 4);
    pub const ENDERMAN: Self = Self::mob(4, "enderman", MobCategory::Monster, 0.6, 2.9, 4);
    pub const WITCH: Self = Self::mob(5, "witch", MobCategory::Monster, 0.6, 1.95, 1);
    pub const SLIME: Self = Self::mob(6, "slime", MobCategory::Monster, 0.52, 0.52, 4);
    pub const COW: Self = Self::mob(7, "cow", MobCategory::Creature, 0.9, 1.4, 4);
    pub const PIG: Self = Self::mob(8, "pig", MobCategory::Creature, 0.9, 0.9, 4);
    pub const SHEEP: Self = Self::mob(9, "sheep", MobCategory::Creature, 0.9, 1.3, 4);
    pub const CHICKEN: Self = Self::mob(10, "chicken", MobCategory::Creature, 0.4, 0.7, 4);
    pub const WOLF: Self = Self::mob(11, "wolf", MobCategory::Creature, 0.6, 0.85, 8);
    pub const SQUID: Self = Self::mob(12, "squid", MobCategory::WaterCreature, 0.8, 0.8, 4);
    pub const BAT: Self = Self::mob(13, "bat", MobCategory::Ambient, 0.5, 0.9, 4);

    const ALL: [&'static Self; 14] = [
        &Self::ZOMBIE,
        &Self::SKELETON,
        &Self::CREEPER,
        &Self::SPIDER,
        &Self::ENDERMAN,
        &Self::WITCH,
        &Self::SLIME,
        &Self::COW,
        &Self::PIG,
        &Self::SHEEP,
        &Self::CHICKEN,
        &Self::WOLF,
        &Self::SQUID,
        &Self::BAT,
    ];

    const fn mob(
        id: u16,
        resource_name: &'static str,
        category: MobCategory,
        width: f32,
        height: f32,
        max_pack_size: u32,
    ) -> Self {
        Self {
            id,
            resource_name,
            category,
            dimension: EntityDimensions::new(width, height),
            max_pack_size,
        }
    }

    /// Looks up a type by resource name, with or without the `minecraft:` namespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static Self> {
        let name = name.strip_prefix("minecraft:").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|entity_type| entity_type.resource_name == name)
    }

    #[must_use]
    pub fn from_id(id: u16) -> Option<&'static Self> {
        Self::ALL.into_iter().find(|entity_type| entity_type.id == id)
    }

    /// The box the entity would occupy when placed at `location`.
    #[must_use]
    pub fn spawn_box(&self, location: &Location) -> BoundingBox {
        let pos = location.position;
        BoundingBox::new_from_pos(pos.x, pos.y, pos.z, &self.dimension)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minecraft:{}", self.resource_name)
    }
}
