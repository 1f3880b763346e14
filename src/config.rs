use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Logical viewport width.
pub const VIEWPORT_WIDTH: f32 = 600.0;
/// Logical viewport height.
pub const VIEWPORT_HEIGHT: f32 = 800.0;
/// How long a picked-up power-up lasts.
pub const POWERUP_DURATION_MS: u64 = 8000;
/// Minimum gap between two shots.
pub const SHOT_COOLDOWN_MS: u64 = 220;
/// Minimum gap between two formation edge flips.
pub const EDGE_COOLDOWN_MS: u64 = 300;

/// Every tunable of the simulation. Plain numbers only, so the whole thing
/// is `Copy` and rides along inside `RoundState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,
    /// Gap between the ship's bottom edge and the viewport bottom.
    pub ship_bottom_margin: f32,
    pub shot_cooldown_ms: u64,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,

    pub invader_width: f32,
    pub invader_height: f32,
    pub invader_rows: usize,
    pub invader_cols: usize,
    pub invader_spacing_x: f32,
    pub invader_spacing_y: f32,
    pub invader_top_margin: f32,
    /// Distance from a viewport side that counts as touching it.
    pub edge_margin: f32,
    pub edge_cooldown_ms: u64,
    /// An invader whose bottom reaches `height - bottom_breach` ends the round.
    pub bottom_breach: f32,

    pub bomber_size: f32,
    pub bomber_base_speed: f32,
    pub bomber_speed_per_level: f32,
    pub bomber_sway_amplitude: f32,
    pub bomber_sway_period_ms: f32,
    pub bomber_start_level: u32,
    /// Horizontal keep-out for bomber spawns.
    pub bomber_spawn_margin: f32,
    /// Band of centre y values above the viewport that bombers spawn in.
    pub bomber_spawn_y_min: f32,
    pub bomber_spawn_y_max: f32,
    /// Bombers are dropped once they are this far past the bottom edge.
    pub bomber_cull_below: f32,
    /// Bombers are dropped once they are this far past either side.
    pub bomber_cull_side: f32,

    pub powerup_size: f32,
    pub powerup_min_fall: f32,
    pub powerup_max_fall: f32,
    pub powerup_duration_ms: u64,
    /// Horizontal keep-out for power-up spawns.
    pub powerup_spawn_margin: f32,

    pub explosion_start_radius: f32,
    pub explosion_max_radius: f32,
    pub explosion_ttl_ms: u64,

    /// Honour the debug power-up trigger.
    pub debug_powerups: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,

            ship_width: 40.0,
            ship_height: 34.0,
            ship_speed: 7.0,
            ship_bottom_margin: 30.0,
            shot_cooldown_ms: SHOT_COOLDOWN_MS,

            projectile_width: 4.0,
            projectile_height: 14.0,
            projectile_speed: 12.0,

            invader_width: 36.0,
            invader_height: 26.0,
            invader_rows: 5,
            invader_cols: 8,
            invader_spacing_x: 60.0,
            invader_spacing_y: 50.0,
            invader_top_margin: 70.0,
            edge_margin: 6.0,
            edge_cooldown_ms: EDGE_COOLDOWN_MS,
            bottom_breach: 60.0,

            bomber_size: 36.0,
            bomber_base_speed: 2.4,
            bomber_speed_per_level: 0.35,
            bomber_sway_amplitude: 0.9,
            bomber_sway_period_ms: 220.0,
            bomber_start_level: 3,
            bomber_spawn_margin: 40.0,
            bomber_spawn_y_min: -160.0,
            bomber_spawn_y_max: -40.0,
            bomber_cull_below: 40.0,
            bomber_cull_side: 60.0,

            powerup_size: 28.0,
            powerup_min_fall: 5.0,
            powerup_max_fall: 7.0,
            powerup_duration_ms: POWERUP_DURATION_MS,
            powerup_spawn_margin: 30.0,

            explosion_start_radius: 8.0,
            explosion_max_radius: 60.0,
            explosion_ttl_ms: 400,

            debug_powerups: cfg!(debug_assertions),
        }
    }
}

/// Front-end settings plus the simulation tunables, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub fps: u32,
    /// How long the game-over screen stays up before restart is offered.
    pub game_over_secs: u64,
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            fps: 60,
            game_over_secs: 3,
            high_score_path: PathBuf::from("highscore.txt"),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.sim;
        if sim.width <= 0.0 || sim.height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                sim.width, sim.height
            )));
        }
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be > 0".to_string()));
        }
        if self.game_over_secs == 0 {
            return Err(Error::InvalidConfig(
                "game_over_secs must be > 0".to_string(),
            ));
        }
        for (name, value) in [
            ("shot_cooldown_ms", sim.shot_cooldown_ms),
            ("edge_cooldown_ms", sim.edge_cooldown_ms),
            ("powerup_duration_ms", sim.powerup_duration_ms),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("sim.{name} must be > 0")));
            }
        }
        if sim.explosion_ttl_ms == 0 {
            return Err(Error::InvalidConfig(
                "sim.explosion_ttl_ms must be > 0".to_string(),
            ));
        }
        if sim.bomber_sway_period_ms <= 0.0 {
            return Err(Error::InvalidConfig(
                "sim.bomber_sway_period_ms must be > 0".to_string(),
            ));
        }
        if sim.powerup_min_fall > sim.powerup_max_fall {
            return Err(Error::InvalidConfig(format!(
                "sim.powerup_min_fall ({}) exceeds sim.powerup_max_fall ({})",
                sim.powerup_min_fall, sim.powerup_max_fall
            )));
        }
        if sim.bomber_spawn_y_min > sim.bomber_spawn_y_max {
            return Err(Error::InvalidConfig(format!(
                "sim.bomber_spawn_y_min ({}) exceeds sim.bomber_spawn_y_max ({})",
                sim.bomber_spawn_y_min, sim.bomber_spawn_y_max
            )));
        }
        if sim.invader_rows == 0 || sim.invader_cols == 0 {
            return Err(Error::InvalidConfig(
                "invader grid must have at least one row and column".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from `SPACE_SHOOTER_CONFIG` (default `space_shooter.toml`), then
    /// apply env overrides. Falls back to defaults if the file is missing or
    /// unusable.
    pub fn load() -> Self {
        let path = std::env::var("SPACE_SHOOTER_CONFIG")
            .unwrap_or_else(|_| "space_shooter.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                }
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    GameConfig::default()
                }
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                GameConfig::default()
            }
        };

        if let Ok(hs) = std::env::var("SPACE_SHOOTER_HIGHSCORE") {
            if !hs.is_empty() {
                config.high_score_path = PathBuf::from(hs);
            }
        }
        config
    }
}
