use prespawn_util::{Location, math::boundingbox::BoundingBox};
use tracing::debug;

use crate::{
    entity::{EntityType, SpawnReason},
    plugin::{
        Cancellable, EventManager,
        entity::{CreatureSpawnEvent, PreCreatureSpawnEvent, PreSpawnVerdict},
    },
};

pub mod mob_spawner;
pub mod natural_spawner;

pub use mob_spawner::MobSpawner;
pub use natural_spawner::NaturalSpawner;

/// The host's own spawn checks: free space, light level, spawn rules.
///
/// These are the expensive part of a spawn attempt, which is why the
/// pre-spawn event runs before them.
pub trait SpawnValidator {
    fn can_spawn(
        &self,
        entity_type: &'static EntityType,
        location: &Location,
        spawn_box: &BoundingBox,
    ) -> bool;
}

impl<F> SpawnValidator for F
where
    F: Fn(&'static EntityType, &Location, &BoundingBox) -> bool,
{
    fn can_spawn(
        &self,
        entity_type: &'static EntityType,
        location: &Location,
        spawn_box: &BoundingBox,
    ) -> bool {
        self(entity_type, location, spawn_box)
    }
}

/// Outcome of one spawn attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    /// Candidate positions looked at.
    pub attempts: u32,
    /// Where creatures were placed.
    pub spawned: Vec<Location>,
    /// Candidates cancelled through `PreCreatureSpawnEvent`.
    pub skipped: u32,
    /// Candidates the host validation turned down.
    pub rejected: u32,
    /// Candidates that passed validation but whose `CreatureSpawnEvent` was cancelled.
    pub vetoed: u32,
    /// A listener stopped the whole attempt.
    pub aborted: bool,
}

impl SpawnReport {
    #[must_use]
    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }
}

/// Runs the pre-spawn check for one candidate.
///
/// Reasons the event is not defined for, or a disabled event, give
/// [`PreSpawnVerdict::Proceed`] without reaching any listener.
pub fn pre_spawn_check(
    events: &EventManager,
    enabled: bool,
    location: &Location,
    entity_type: &'static EntityType,
    reason: SpawnReason,
) -> PreSpawnVerdict {
    if !enabled || !reason.fires_pre_spawn_event() {
        return PreSpawnVerdict::Proceed;
    }
    let event = events.fire(PreCreatureSpawnEvent::new(
        location.clone(),
        entity_type,
        reason,
    ));
    let verdict = event.verdict();
    if verdict != PreSpawnVerdict::Proceed {
        debug!("Pre-spawn of {entity_type} ({reason}) at {location}: {verdict:?}");
    }
    verdict
}

/// Validates a candidate and, if the host accepts it, asks listeners one last
/// time through `CreatureSpawnEvent`. Returns whether the creature was placed.
fn try_place<V: SpawnValidator + ?Sized>(
    events: &EventManager,
    validator: &V,
    location: &Location,
    entity_type: &'static EntityType,
    reason: SpawnReason,
    report: &mut SpawnReport,
) -> bool {
    let spawn_box = entity_type.spawn_box(location);
    if !validator.can_spawn(entity_type, location, &spawn_box) {
        report.rejected += 1;
        return false;
    }
    let event = events.fire(CreatureSpawnEvent::new(
        location.clone(),
        entity_type,
        reason,
    ));
    if event.cancelled() {
        report.vetoed += 1;
        return false;
    }
    report.spawned.push(event.location);
    true
}
