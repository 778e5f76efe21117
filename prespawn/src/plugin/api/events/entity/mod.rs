pub mod creature_spawn;
pub mod pre_creature_spawn;

pub use creature_spawn::CreatureSpawnEvent;
pub use pre_creature_spawn::{PreCreatureSpawnEvent, PreSpawnVerdict};

use crate::entity::EntityType;

/// A trait representing events related to entities.
pub trait EntityEvent: Send + Sync {
    /// Retrieves the type of the entity associated with the event.
    fn get_entity_type(&self) -> &'static EntityType;
}
