use std::sync::Arc;

use prespawn_util::{
    Location, WorldRef,
    math::{position::BlockPos, vector3::Vector3},
};
use rand::Rng;
use tracing::debug;

use super::{SpawnReport, SpawnValidator, pre_spawn_check, try_place};
use crate::{
    config::SpawnerConfig,
    entity::{EntityType, SpawnReason},
    plugin::{EventManager, entity::PreSpawnVerdict},
};

/// A mob spawner block activation.
///
/// Picks `spawn_count` random positions within `spawn_range` blocks of the
/// spawner (one block up or down) and spawns with [`SpawnReason::Spawner`].
pub struct MobSpawner {
    events: Arc<EventManager>,
    config: SpawnerConfig,
    fire_pre_spawn_event: bool,
}

impl MobSpawner {
    #[must_use]
    pub const fn new(events: Arc<EventManager>, config: SpawnerConfig, fire_pre_spawn_event: bool) -> Self {
        Self {
            events,
            config,
            fire_pre_spawn_event,
        }
    }

    pub fn activate<R, V>(
        &self,
        world: &WorldRef,
        spawner: BlockPos,
        entity_type: &'static EntityType,
        rng: &mut R,
        validator: &V,
    ) -> SpawnReport
    where
        R: Rng + ?Sized,
        V: SpawnValidator + ?Sized,
    {
        let mut report = SpawnReport::default();
        let origin = spawner.to_bottom_center();
        let range = f64::from(self.config.spawn_range);

        for _ in 0..self.config.spawn_count {
            let x = (rng.random::<f64>() - rng.random::<f64>()).mul_add(range, origin.x);
            let y = origin.y + f64::from(rng.random_range(-1..=1));
            let z = (rng.random::<f64>() - rng.random::<f64>()).mul_add(range, origin.z);
            let candidate = Location::with_rotation(
                world.clone(),
                Vector3::new(x, y, z),
                rng.random::<f32>() * 360.0,
                0.0,
            );
            report.attempts += 1;

            match pre_spawn_check(
                &self.events,
                self.fire_pre_spawn_event,
                &candidate,
                entity_type,
                SpawnReason::Spawner,
            ) {
                PreSpawnVerdict::Abort => {
                    report.aborted = true;
                    break;
                }
                PreSpawnVerdict::Skip => {
                    report.skipped += 1;
                    continue;
                }
                PreSpawnVerdict::Proceed => {}
            }

            try_place(
                &self.events,
                validator,
                &candidate,
                entity_type,
                SpawnReason::Spawner,
                &mut report,
            );
        }

        debug!(
            "Spawner at {spawner} placed {} {entity_type}",
            report.spawned_count()
        );
        report
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use prespawn_util::{Location, WorldRef, math::boundingbox::BoundingBox, math::position::BlockPos};
    use rand::{SeedableRng, rngs::StdRng};

    use super::MobSpawner;
    use crate::{
        config::SpawnerConfig,
        entity::{EntityType, SpawnReason},
        plugin::{EventHandler, EventManager, EventPriority, entity::PreCreatureSpawnEvent},
    };

    struct AbortSpawners;

    impl EventHandler<PreCreatureSpawnEvent> for AbortSpawners {
        fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
            if event.reason() == SpawnReason::Spawner {
                event.set_should_abort_spawn(true);
            }
        }
    }

    #[test]
    fn places_around_spawner() {
        let spawner = MobSpawner::new(Arc::new(EventManager::new()), SpawnerConfig::default(), true);
        let report = spawner.activate(
            &WorldRef::new("world"),
            BlockPos::new(0, 40, 0),
            &EntityType::SKELETON,
            &mut StdRng::seed_from_u64(11),
            &|_: &'static EntityType, _: &Location, _: &BoundingBox| true,
        );
        assert_eq!(report.spawned_count(), 4);
        for location in &report.spawned {
            assert!(location.position.x.abs() <= 4.5);
            assert!((39.0..=41.0).contains(&location.position.y));
            assert!(location.position.z.abs() <= 4.5);
        }
    }

    #[test]
    fn abort_stops_the_activation() {
        let events = Arc::new(EventManager::new());
        events.register::<PreCreatureSpawnEvent, _>(Arc::new(AbortSpawners), EventPriority::Normal, true);
        let spawner = MobSpawner::new(events, SpawnerConfig::default(), true);

        let report = spawner.activate(
            &WorldRef::new("world"),
            BlockPos::new(0, 40, 0),
            &EntityType::SKELETON,
            &mut StdRng::seed_from_u64(11),
            &|_: &'static EntityType, _: &Location, _: &BoundingBox| -> bool {
                panic!("validation must not run after an abort")
            },
        );
        assert!(report.aborted);
        assert_eq!(report.attempts, 1);
        assert!(report.spawned.is_empty());
    }
}
