use prespawn_macros::{Event, cancellable};
use prespawn_util::Location;

use super::EntityEvent;
use crate::entity::{EntityType, SpawnReason};
use crate::plugin::Cancellable;

/// Fired before the expensive checks of a spawn attempt run for one candidate position.
///
/// This only fires for the reasons where [`SpawnReason::fires_pre_spawn_event`]
/// holds, so it is an optimisation on top of [`super::CreatureSpawnEvent`],
/// not a replacement for it. It also fires for positions that would fail
/// the later space or light checks.
///
/// Cancelling rejects this candidate only and the spawner moves on to the
/// next one. [`Self::set_should_abort_spawn`] stops the whole spawn attempt,
/// whatever the cancellation state is.
///
/// Handlers only get to change the two flags. Location, type and reason are
/// restored after every handler, even if one swaps in a different event.
#[cancellable]
#[derive(Event, Clone)]
#[event(fixed(location, entity_type, reason))]
pub struct PreCreatureSpawnEvent {
    location: Location,
    entity_type: &'static EntityType,
    reason: SpawnReason,
    should_abort_spawn: bool,
}

/// What the spawner does with a candidate after the event was fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreSpawnVerdict {
    /// Go on with the full validation.
    Proceed,
    /// Reject this candidate, try the next one.
    Skip,
    /// Stop trying for this spawn attempt.
    Abort,
}

impl PreCreatureSpawnEvent {
    #[must_use]
    pub const fn new(location: Location, entity_type: &'static EntityType, reason: SpawnReason) -> Self {
        Self {
            location,
            entity_type,
            reason,
            should_abort_spawn: false,
            cancelled: false,
        }
    }

    /// The location the creature is being spawned at.
    ///
    /// Always a fresh copy; changing it has no effect on the event.
    #[must_use]
    pub fn spawn_location(&self) -> Location {
        self.location.clone()
    }

    /// The type of creature being spawned.
    #[must_use]
    pub const fn entity_type(&self) -> &'static EntityType {
        self.entity_type
    }

    /// Why the creature is spawning, i.e. natural or spawner.
    #[must_use]
    pub const fn reason(&self) -> SpawnReason {
        self.reason
    }

    /// Whether the spawn process should stop instead of trying more positions.
    #[must_use]
    pub const fn should_abort_spawn(&self) -> bool {
        self.should_abort_spawn
    }

    /// Set this when blanket blocking this kind of spawn, so the spawner does
    /// not try any further positions after this one.
    pub const fn set_should_abort_spawn(&mut self, should_abort_spawn: bool) {
        self.should_abort_spawn = should_abort_spawn;
    }

    /// Reads the final state back. Abort wins over cancellation.
    #[must_use]
    pub fn verdict(&self) -> PreSpawnVerdict {
        if self.should_abort_spawn {
            PreSpawnVerdict::Abort
        } else if self.cancelled() {
            PreSpawnVerdict::Skip
        } else {
            PreSpawnVerdict::Proceed
        }
    }
}

impl EntityEvent for PreCreatureSpawnEvent {
    fn get_entity_type(&self) -> &'static EntityType {
        self.entity_type
    }
}

#[cfg(test)]
mod test {
    use prespawn_util::{Location, WorldRef, math::vector3::Vector3};

    use super::{PreCreatureSpawnEvent, PreSpawnVerdict};
    use crate::{
        entity::{EntityType, SpawnReason},
        plugin::{Cancellable, Payload},
    };

    fn zombie_event() -> PreCreatureSpawnEvent {
        PreCreatureSpawnEvent::new(
            Location::new(WorldRef::new("world"), Vector3::new(10.0, 64.0, 10.0)),
            &EntityType::ZOMBIE,
            SpawnReason::Natural,
        )
    }

    #[test]
    fn flags_default_to_false() {
        let event = zombie_event();
        assert!(!event.cancelled());
        assert!(!event.should_abort_spawn());
        assert_eq!(event.verdict(), PreSpawnVerdict::Proceed);
    }

    #[test]
    fn spawn_location_is_a_copy() {
        let event = zombie_event();
        let mut location = event.spawn_location();
        location.position.x = 99.0;
        location.world = WorldRef::new("world_nether");

        let again = event.spawn_location();
        assert_eq!(again.position, Vector3::new(10.0, 64.0, 10.0));
        assert_eq!(again.world.name(), "world");
        assert_eq!(event.spawn_location(), again);
    }

    #[test]
    fn flags_are_last_write_wins() {
        let mut event = zombie_event();
        event.set_cancelled(true);
        event.set_cancelled(false);
        assert!(!event.cancelled());

        event.set_should_abort_spawn(true);
        event.set_should_abort_spawn(false);
        assert!(!event.should_abort_spawn());
    }

    #[test]
    fn abort_beats_cancel() {
        let mut event = zombie_event();
        event.set_cancelled(true);
        assert_eq!(event.verdict(), PreSpawnVerdict::Skip);
        event.set_should_abort_spawn(true);
        assert_eq!(event.verdict(), PreSpawnVerdict::Abort);
        event.set_cancelled(false);
        assert_eq!(event.verdict(), PreSpawnVerdict::Abort);
    }

    #[test]
    fn accessors_return_construction_values() {
        let event = zombie_event();
        assert_eq!(event.entity_type(), &EntityType::ZOMBIE);
        assert_eq!(event.reason(), SpawnReason::Natural);
        assert_eq!(event.get_name(), "PreCreatureSpawnEvent");
    }
}
