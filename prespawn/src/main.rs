use std::{path::PathBuf, process::ExitCode, sync::Arc};

use prespawn::{
    CreatureSpawnEvent, EntityType, EventHandler, EventManager, EventPriority, MobSpawner,
    NaturalSpawner, PreCreatureSpawnEvent, SpawnReason, SpawnReport,
    config::{DemoConfig, PrespawnConfig},
    logging::init_logging,
    plugin::{Cancellable, Context, entity::EntityEvent},
};
use prespawn_util::{
    Location, WorldRef,
    math::{boundingbox::BoundingBox, position::BlockPos},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "prespawn.toml";
/// Top of the flat test terrain; anything below is solid.
const GROUND_LEVEL: f64 = 64.0;

/// Vetoes whole spawn attempts for the configured entity types.
struct BlockEntities(Vec<&'static EntityType>);

impl BlockEntities {
    fn blocks(&self, event: &impl EntityEvent) -> bool {
        self.0.contains(&event.get_entity_type())
    }
}

impl EventHandler<PreCreatureSpawnEvent> for BlockEntities {
    fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
        if self.blocks(&*event) {
            event.set_cancelled(true);
            event.set_should_abort_spawn(true);
        }
    }
}

/// Catches the blocked types for reasons the pre-spawn event does not cover.
impl EventHandler<CreatureSpawnEvent> for BlockEntities {
    fn handle_blocking(&self, event: &mut CreatureSpawnEvent) {
        if self.blocks(&*event) {
            event.set_cancelled(true);
        }
    }
}

/// Cancels single candidates that are too deep.
struct MinHeight(f64);

impl EventHandler<PreCreatureSpawnEvent> for MinHeight {
    fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
        if event.spawn_location().position.y < self.0 {
            event.set_cancelled(true);
        }
    }
}

struct LogOutcome;

impl EventHandler<PreCreatureSpawnEvent> for LogOutcome {
    fn handle(&self, event: &PreCreatureSpawnEvent) {
        info!(
            "{} ({}) at {}: {:?}",
            event.entity_type(),
            event.reason(),
            event.spawn_location(),
            event.verdict()
        );
    }
}

fn register_sample_plugin(context: &Context, demo: &DemoConfig) {
    let blocked: Vec<_> = demo
        .blocked_entities
        .iter()
        .filter_map(|name| {
            let entity_type = EntityType::from_name(name);
            if entity_type.is_none() {
                error!("Unknown entity type in demo.blocked_entities: {name}");
            }
            entity_type
        })
        .collect();
    if !blocked.is_empty() {
        let handler = Arc::new(BlockEntities(blocked));
        context.register_event::<PreCreatureSpawnEvent, _>(handler.clone(), EventPriority::High, true);
        context.register_event::<CreatureSpawnEvent, _>(handler, EventPriority::High, true);
    }
    if let Some(min_height) = demo.min_height {
        context.register_event::<PreCreatureSpawnEvent, _>(
            Arc::new(MinHeight(min_height)),
            EventPriority::Normal,
            true,
        );
    }
    context.register_event::<PreCreatureSpawnEvent, _>(
        Arc::new(LogOutcome),
        EventPriority::Monitor,
        false,
    );
}

/// Stand-in for the host's space checks: nothing may overlap the ground.
fn on_flat_ground(_: &'static EntityType, _: &Location, spawn_box: &BoundingBox) -> bool {
    spawn_box
        .block_positions()
        .all(|pos| f64::from(pos.0.y) >= GROUND_LEVEL)
}

fn log_report(source: &str, report: &SpawnReport) {
    info!(
        "{source}: {} attempt(s), {} spawned, {} skipped, {} rejected, {} vetoed{}",
        report.attempts,
        report.spawned_count(),
        report.skipped,
        report.rejected,
        report.vetoed,
        if report.aborted { ", aborted" } else { "" }
    );
}

fn main() -> ExitCode {
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    let config = match PrespawnConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet.
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    let Some(entity_type) = EntityType::from_name(&config.demo.entity) else {
        error!("Unknown entity type: {}", config.demo.entity);
        return ExitCode::FAILURE;
    };
    let reason: SpawnReason = match config.demo.reason.parse() {
        Ok(reason) => reason,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let events = Arc::new(EventManager::new());
    let plugin = Context::new("sample", events.clone());
    register_sample_plugin(&plugin, &config.demo);

    let world = WorldRef::new(&config.demo.world);
    let center = Location::new(world.clone(), config.demo.center);
    let mut rng = StdRng::seed_from_u64(config.demo.seed);

    let natural = NaturalSpawner::new(events.clone(), config.spawning.clone());
    let report = natural.spawn_pack(&center, entity_type, reason, &mut rng, &on_flat_ground);
    log_report("Natural spawning", &report);

    let spawner = MobSpawner::new(
        events.clone(),
        config.spawner.clone(),
        config.spawning.fire_pre_spawn_event,
    );
    let report = spawner.activate(
        &world,
        BlockPos::floored_v(config.demo.center),
        entity_type,
        &mut rng,
        &on_flat_ground,
    );
    log_report("Spawner", &report);

    plugin.unregister_all();
    if events.failed_invocations() > 0 {
        error!("{} handler invocation(s) failed", events.failed_invocations());
    }
    ExitCode::SUCCESS
}
