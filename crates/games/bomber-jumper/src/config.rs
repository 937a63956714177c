use serde::{Deserialize, Serialize};

use crate::tile_map::{DEFAULT_LEVEL, LevelError, TileGrid, load_level_from_file};

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "BOMBER_JUMPER_CONFIG";
/// Config path used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/bomber.toml";

/// Play field size in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 650.0,
        }
    }
}

/// Player movement tuning. Velocities are pixels per nominal frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame (screen space, +Y is down).
    pub gravity: f32,
    pub player_speed: f32,
    /// Initial vertical velocity of a jump. Negative is up.
    pub jump_strength: f32,
    /// Side length of the square player hitbox.
    pub player_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.9,
            player_speed: 4.0,
            jump_strength: -15.0,
            player_size: 50.0,
        }
    }
}

/// Bomb tuning. Durations are in ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    /// Side length of the falling bomb.
    pub size: f32,
    pub gravity: f32,
    /// Ticks from drop to explosion.
    pub fuse_ticks: u64,
    /// Ticks the explosion stays on screen before the bomb is removed.
    pub display_ticks: u64,
    /// Half the side of the square blast area.
    pub explosion_radius: f32,
    /// Ticks a player must wait between drops.
    pub drop_cooldown_ticks: u32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            gravity: 0.9,
            fuse_ticks: 180,
            display_ticks: 60,
            explosion_radius: 30.0,
            drop_cooldown_ticks: 50,
        }
    }
}

/// How the strip along the bottom of the field behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundMode {
    /// Touching the ground scores for the opponent.
    #[default]
    Hazard,
    /// The ground can be stood on; only leaving the field scores.
    Solid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Points needed to win a round.
    pub target_score: u32,
    pub ground_mode: GroundMode,
    pub bombs_enabled: bool,
    pub tick_rate_hz: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            target_score: 3,
            ground_mode: GroundMode::Hazard,
            bombs_enabled: true,
            tick_rate_hz: 60.0,
        }
    }
}

/// Spawn point (player center) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub player_one: SpawnPoint,
    pub player_two: SpawnPoint,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            player_one: SpawnPoint { x: 200.0, y: 100.0 },
            player_two: SpawnPoint { x: 600.0, y: 100.0 },
        }
    }
}

/// Level source. `file` takes precedence over `rows` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub rows: Vec<String>,
    pub file: Option<String>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_LEVEL.iter().map(|r| r.to_string()).collect(),
            file: None,
        }
    }
}

impl LevelConfig {
    pub fn grid(&self) -> Result<TileGrid, LevelError> {
        match &self.file {
            Some(path) => load_level_from_file(path),
            None => TileGrid::parse_rows(&self.rows),
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BomberConfig {
    pub field: FieldConfig,
    pub physics: PhysicsConfig,
    pub bomb: BombConfig,
    pub rules: RulesConfig,
    pub spawns: SpawnConfig,
    pub level: LevelConfig,
}

/// Configuration values the simulation cannot run with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("field size must be positive, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },
    #[error("{what} size must be positive, got {value}")]
    InvalidSize { what: &'static str, value: f32 },
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(f32),
    #[error("target score must be at least 1")]
    InvalidTargetScore,
    #[error("{player} spawn point ({x}, {y}) is outside the field")]
    SpawnOutOfField {
        player: &'static str,
        x: f32,
        y: f32,
    },
    #[error(transparent)]
    Level(#[from] LevelError),
}

impl BomberConfig {
    /// Load config from the file named by `BOMBER_JUMPER_CONFIG`, then
    /// `config/bomber.toml`, falling back to defaults if neither parses.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load config from `path`. A missing file silently yields defaults; an
    /// unparseable one logs a warning and yields defaults.
    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<BomberConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    BomberConfig::default()
                },
            },
            Err(_) => BomberConfig::default(),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let FieldConfig { width, height } = self.field;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }
        for (what, value) in [
            ("player", self.physics.player_size),
            ("bomb", self.bomb.size),
            ("explosion", self.bomb.explosion_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidSize { what, value });
            }
        }
        if !(self.rules.tick_rate_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.rules.tick_rate_hz));
        }
        if self.rules.target_score == 0 {
            return Err(ConfigError::InvalidTargetScore);
        }
        // The whole hitbox must fit horizontally, or a respawn lands outside
        // the clamp range.
        let half = self.physics.player_size / 2.0;
        for (player, spawn) in [
            ("player one", self.spawns.player_one),
            ("player two", self.spawns.player_two),
        ] {
            let inside =
                (half..=width - half).contains(&spawn.x) && (0.0..=height).contains(&spawn.y);
            if !inside {
                return Err(ConfigError::SpawnOutOfField {
                    player,
                    x: spawn.x,
                    y: spawn.y,
                });
            }
        }
        Ok(())
    }
}
