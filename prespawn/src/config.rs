use std::{fs, io, path::Path};

use prespawn_util::math::vector3::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top level configuration, usually read from `prespawn.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrespawnConfig {
    pub spawning: SpawningConfig,
    pub spawner: SpawnerConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

/// Natural spawning knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawningConfig {
    /// When off, no `PreCreatureSpawnEvent` is fired at all.
    pub fire_pre_spawn_event: bool,
    /// Packs tried per spawn attempt.
    pub packs: u32,
    /// Upper bound of candidate positions per pack.
    pub pack_size: u32,
    /// Maximum horizontal step between two candidates of a pack.
    pub spread: u32,
    /// Replaces the per-entity limit of creatures spawned by one attempt.
    pub max_pack_size_override: Option<u32>,
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            fire_pre_spawn_event: true,
            packs: 3,
            pack_size: 4,
            spread: 6,
            max_pack_size_override: None,
        }
    }
}

/// Mob spawner block knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Creatures a spawner tries to place per activation.
    pub spawn_count: u32,
    /// Horizontal radius around the spawner block.
    pub spawn_range: u32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_count: 4,
            spawn_range: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `prespawn=debug`.
    pub level: String,
    pub color: bool,
    pub threads: bool,
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: true,
            threads: false,
            target: true,
        }
    }
}

/// What the `prespawn` binary simulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub world: String,
    pub center: Vector3<f64>,
    pub entity: String,
    pub reason: String,
    pub seed: u64,
    /// Entity types a sample plugin vetoes for the whole attempt.
    pub blocked_entities: Vec<String>,
    /// Candidates below this height are cancelled by a sample plugin.
    pub min_height: Option<f64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world: "world".to_string(),
            center: Vector3::new(10.0, 64.0, 10.0),
            entity: "zombie".to_string(),
            reason: "NATURAL".to_string(),
            seed: 0,
            blocked_entities: Vec::new(),
            min_height: None,
        }
    }
}

impl PrespawnConfig {
    /// Loads the config from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let spawning = &self.spawning;
        if spawning.packs == 0 {
            return Err(ConfigError::Invalid("spawning.packs must be at least 1".into()));
        }
        if spawning.pack_size == 0 {
            return Err(ConfigError::Invalid(
                "spawning.pack_size must be at least 1".into(),
            ));
        }
        if spawning.max_pack_size_override == Some(0) {
            return Err(ConfigError::Invalid(
                "spawning.max_pack_size_override must be at least 1".into(),
            ));
        }
        if self.spawner.spawn_count == 0 {
            return Err(ConfigError::Invalid(
                "spawner.spawn_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
