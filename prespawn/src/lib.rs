// Lets the event macros refer to `::prespawn` from inside this crate too.
extern crate self as prespawn;

pub mod config;
pub mod entity;
pub mod logging;
pub mod plugin;
pub mod world;

pub use entity::{EntityType, MobCategory, SpawnReason};
pub use plugin::{
    Cancellable, EventHandler, EventManager, EventPriority, Payload,
    entity::{CreatureSpawnEvent, PreCreatureSpawnEvent, PreSpawnVerdict},
};
pub use world::{MobSpawner, NaturalSpawner, SpawnReport, SpawnValidator};
