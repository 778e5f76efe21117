use prespawn_macros::{Event, cancellable};
use prespawn_util::Location;

use super::EntityEvent;
use crate::entity::{EntityType, SpawnReason};

/// An event that occurs when a creature is about to be added to the world.
///
/// Unlike [`super::PreCreatureSpawnEvent`] this fires for every spawn reason,
/// after the host has validated the position.
#[cancellable]
#[derive(Event, Clone)]
pub struct CreatureSpawnEvent {
    /// Where the creature will be placed.
    pub location: Location,

    /// The type of the creature being spawned.
    pub entity_type: &'static EntityType,

    /// Why the creature is being spawned.
    pub reason: SpawnReason,
}

impl CreatureSpawnEvent {
    #[must_use]
    pub const fn new(location: Location, entity_type: &'static EntityType, reason: SpawnReason) -> Self {
        Self {
            location,
            entity_type,
            reason,
            cancelled: false,
        }
    }
}

impl EntityEvent for CreatureSpawnEvent {
    fn get_entity_type(&self) -> &'static EntityType {
        self.entity_type
    }
}
