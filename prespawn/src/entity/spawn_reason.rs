use std::{fmt, str::FromStr};

use thiserror::Error;

macro_rules! spawn_reasons {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// Why a creature is being spawned.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SpawnReason {
            $($(#[$meta])* $variant,)*
        }

        impl SpawnReason {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The upper snake case name used in logs and configuration.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

spawn_reasons! {
    /// Natural world spawning.
    Natural => "NATURAL",
    /// Riding another entity, e.g. a chicken jockey.
    Jockey => "JOCKEY",
    /// Created during chunk generation.
    ChunkGen => "CHUNK_GEN",
    /// From a mob spawner block.
    Spawner => "SPAWNER",
    TrialSpawner => "TRIAL_SPAWNER",
    Egg => "EGG",
    SpawnerEgg => "SPAWNER_EGG",
    Bucket => "BUCKET",
    Lightning => "LIGHTNING",
    BuildSnowman => "BUILD_SNOWMAN",
    BuildIrongolem => "BUILD_IRONGOLEM",
    BuildWither => "BUILD_WITHER",
    VillageDefense => "VILLAGE_DEFENSE",
    VillageInvasion => "VILLAGE_INVASION",
    Breeding => "BREEDING",
    SlimeSplit => "SLIME_SPLIT",
    Reinforcements => "REINFORCEMENTS",
    NetherPortal => "NETHER_PORTAL",
    Dispense => "DISPENSE_EGG",
    Infection => "INFECTION",
    Cured => "CURED",
    OcelotBaby => "OCELOT_BABY",
    SilverfishBlock => "SILVERFISH_BLOCK",
    Mount => "MOUNT",
    Trap => "TRAP",
    EnderPearl => "ENDER_PEARL",
    ShoulderEntity => "SHOULDER_ENTITY",
    Drowned => "DROWNED",
    Sheared => "SHEARED",
    Explosion => "EXPLOSION",
    Raid => "RAID",
    Patrol => "PATROL",
    BeeHive => "BEEHIVE",
    PiglinZombified => "PIGLIN_ZOMBIFIED",
    Spell => "SPELL",
    Frozen => "FROZEN",
    Metamorphosis => "METAMORPHOSIS",
    Duplication => "DUPLICATION",
    Command => "COMMAND",
    Encounter => "ENCOUNTER",
    Reanimate => "REANIMATE",
    Potion => "POTION",
    Rebirth => "REBIRTH",
    /// Spawned by a plugin.
    Custom => "CUSTOM",
    /// No more specific reason is known.
    Default => "DEFAULT",
}

impl SpawnReason {
    /// Whether a `PreCreatureSpawnEvent` is fired before spawning for this reason.
    ///
    /// Only natural and spawner spawns are covered. Every other reason goes
    /// straight to the regular spawn path without a pre-spawn check.
    #[must_use]
    pub const fn fires_pre_spawn_event(self) -> bool {
        matches!(self, Self::Natural | Self::Spawner)
    }
}

impl fmt::Display for SpawnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown spawn reason: {0}")]
pub struct ParseSpawnReasonError(pub String);

impl FromStr for SpawnReason {
    type Err = ParseSpawnReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|reason| reason.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSpawnReasonError(s.to_string()))
    }
}
