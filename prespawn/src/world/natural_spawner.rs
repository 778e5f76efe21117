use std::sync::Arc;

use prespawn_util::Location;
use rand::Rng;
use tracing::debug;

use super::{SpawnReport, SpawnValidator, pre_spawn_check, try_place};
use crate::{
    config::SpawningConfig,
    entity::{EntityType, SpawnReason},
    plugin::{EventManager, entity::PreSpawnVerdict},
};

/// Spawns groups of creatures around a position, the way world ticking does.
///
/// Each attempt walks a few packs. A pack starts at the centre and takes a
/// random horizontal step before every candidate, so candidates drift away
/// from the centre. Every candidate goes through the pre-spawn check first:
/// a cancelled candidate is skipped, an aborted one ends the attempt.
pub struct NaturalSpawner {
    events: Arc<EventManager>,
    config: SpawningConfig,
}

impl NaturalSpawner {
    #[must_use]
    pub const fn new(events: Arc<EventManager>, config: SpawningConfig) -> Self {
        Self { events, config }
    }

    #[must_use]
    pub const fn config(&self) -> &SpawningConfig {
        &self.config
    }

    /// Highest number of creatures a single attempt places for `entity_type`.
    #[must_use]
    pub fn max_spawns(&self, entity_type: &EntityType) -> u32 {
        self.config
            .max_pack_size_override
            .unwrap_or(entity_type.max_pack_size)
    }

    /// Runs one spawn attempt for `entity_type` around `center`.
    pub fn spawn_pack<R, V>(
        &self,
        center: &Location,
        entity_type: &'static EntityType,
        reason: SpawnReason,
        rng: &mut R,
        validator: &V,
    ) -> SpawnReport
    where
        R: Rng + ?Sized,
        V: SpawnValidator + ?Sized,
    {
        let mut report = SpawnReport::default();
        let max_spawns = self.max_spawns(entity_type) as usize;

        'packs: for pack in 0..self.config.packs {
            let mut candidate = center.clone();
            let tries = rng.random_range(1..=self.config.pack_size.max(1));

            for _ in 0..tries {
                candidate = candidate.add(self.step(rng), 0.0, self.step(rng));
                report.attempts += 1;

                match pre_spawn_check(
                    &self.events,
                    self.config.fire_pre_spawn_event,
                    &candidate,
                    entity_type,
                    reason,
                ) {
                    PreSpawnVerdict::Abort => {
                        report.aborted = true;
                        break 'packs;
                    }
                    PreSpawnVerdict::Skip => {
                        report.skipped += 1;
                        continue;
                    }
                    PreSpawnVerdict::Proceed => {}
                }

                if try_place(
                    &self.events,
                    validator,
                    &candidate,
                    entity_type,
                    reason,
                    &mut report,
                ) && report.spawned_count() >= max_spawns
                {
                    debug!("Pack {pack} of {entity_type} reached its limit of {max_spawns}");
                    break 'packs;
                }
            }
        }

        debug!(
            "Spawn attempt for {entity_type} at {center}: {} spawned, {} skipped, {} rejected, aborted: {}",
            report.spawned_count(),
            report.skipped,
            report.rejected,
            report.aborted
        );
        report
    }

    /// `rand(spread) - rand(spread)`, biased towards small steps.
    fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.config.spread == 0 {
            return 0.0;
        }
        f64::from(rng.random_range(0..self.config.spread))
            - f64::from(rng.random_range(0..self.config.spread))
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use prespawn_util::{Location, WorldRef, math::boundingbox::BoundingBox, math::vector3::Vector3};
    use rand::{SeedableRng, rngs::StdRng};

    use super::NaturalSpawner;
    use crate::{
        config::SpawningConfig,
        entity::{EntityType, SpawnReason},
        plugin::{EventHandler, EventManager, EventPriority, entity::PreCreatureSpawnEvent},
    };

    fn center() -> Location {
        Location::new(WorldRef::new("world"), Vector3::new(10.5, 64.0, 10.5))
    }

    fn always(_: &'static EntityType, _: &Location, _: &BoundingBox) -> bool {
        true
    }

    struct Count(AtomicU32);

    impl EventHandler<PreCreatureSpawnEvent> for Count {
        fn handle(&self, _event: &PreCreatureSpawnEvent) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn stops_at_max_pack_size() {
        let config = SpawningConfig {
            max_pack_size_override: Some(2),
            ..SpawningConfig::default()
        };
        let spawner = NaturalSpawner::new(Arc::new(EventManager::new()), config);
        let mut rng = StdRng::seed_from_u64(7);

        let report = spawner.spawn_pack(
            &center(),
            &EntityType::ZOMBIE,
            SpawnReason::Natural,
            &mut rng,
            &always,
        );
        assert_eq!(report.spawned_count(), 2);
        assert_eq!(report.attempts, 2);
        assert!(!report.aborted);
    }

    #[test]
    fn limit_comes_from_the_entity_type() {
        let spawner = NaturalSpawner::new(Arc::new(EventManager::new()), SpawningConfig::default());
        assert_eq!(spawner.max_spawns(&EntityType::WITCH), 1);
        assert_eq!(spawner.max_spawns(&EntityType::ZOMBIE), 4);
        assert_eq!(spawner.max_spawns(&EntityType::WOLF), 8);

        // witches come alone: the first accepted candidate ends the attempt
        let report = spawner.spawn_pack(
            &center(),
            &EntityType::WITCH,
            SpawnReason::Natural,
            &mut StdRng::seed_from_u64(11),
            &always,
        );
        assert_eq!(report.spawned_count(), 1);
        assert_eq!(report.attempts, 1);

        let config = SpawningConfig {
            max_pack_size_override: Some(6),
            ..SpawningConfig::default()
        };
        let spawner = NaturalSpawner::new(Arc::new(EventManager::new()), config);
        assert_eq!(spawner.max_spawns(&EntityType::WITCH), 6);
    }

    #[test]
    fn candidates_stay_within_spread() {
        let config = SpawningConfig {
            packs: 1,
            pack_size: 1,
            spread: 3,
            ..SpawningConfig::default()
        };
        let spawner = NaturalSpawner::new(Arc::new(EventManager::new()), config);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let report = spawner.spawn_pack(
                &center(),
                &EntityType::COW,
                SpawnReason::Natural,
                &mut rng,
                &always,
            );
            let spawned = &report.spawned[0];
            assert!((spawned.position.x - 10.5).abs() <= 2.0);
            assert!((spawned.position.z - 10.5).abs() <= 2.0);
            assert!((spawned.position.y - 64.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn disabled_event_never_dispatches() {
        let events = Arc::new(EventManager::new());
        let count = Arc::new(Count(AtomicU32::new(0)));
        events.register::<PreCreatureSpawnEvent, _>(count.clone(), EventPriority::Monitor, false);

        let config = SpawningConfig {
            fire_pre_spawn_event: false,
            ..SpawningConfig::default()
        };
        let spawner = NaturalSpawner::new(events, config);
        let report = spawner.spawn_pack(
            &center(),
            &EntityType::ZOMBIE,
            SpawnReason::Natural,
            &mut StdRng::seed_from_u64(3),
            &always,
        );
        assert_eq!(count.0.load(Ordering::Relaxed), 0);
        assert!(report.spawned_count() > 0);
    }
}
