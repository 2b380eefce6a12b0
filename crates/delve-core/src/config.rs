//! Simulation configuration.
//!
//! `DelveConfig::default()` mirrors `constants`. A TOML file may override
//! any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable parameters for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelveConfig {
    pub tile_size: f64,
    pub viewport_size: (u32, u32),
    pub max_frame_ms: u64,

    pub player_speed: f64,
    pub player_health: u32,
    pub player_attack_period_ms: u64,
    pub player_hitbox: f64,

    pub enemy_speed_factor: f64,
    pub enemy_health: u32,
    pub enemy_attack_period_ms: u64,
    pub enemy_observation_radius: f64,
    pub enemy_min_engage_distance: f64,
    pub enemy_hitbox: f64,

    pub bullet_speed: f64,
    pub bullet_hitbox: f64,
    pub key_hitbox: f64,

    pub light_radius: i32,
}

impl Default for DelveConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            viewport_size: VIEWPORT_SIZE,
            max_frame_ms: MAX_FRAME_MS,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            player_attack_period_ms: PLAYER_ATTACK_PERIOD_MS,
            player_hitbox: PLAYER_HITBOX,
            enemy_speed_factor: ENEMY_SPEED_FACTOR,
            enemy_health: ENEMY_HEALTH,
            enemy_attack_period_ms: ENEMY_ATTACK_PERIOD_MS,
            enemy_observation_radius: ENEMY_OBSERVATION_RADIUS,
            enemy_min_engage_distance: ENEMY_MIN_ENGAGE_DISTANCE,
            enemy_hitbox: ENEMY_HITBOX,
            bullet_speed: BULLET_SPEED,
            bullet_hitbox: BULLET_HITBOX,
            key_hitbox: KEY_HITBOX,
            light_radius: LIGHT_RADIUS,
        }
    }
}

impl DelveConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DelveConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if self.viewport_size.0 == 0 || self.viewport_size.1 == 0 {
            return Err(ConfigError::Invalid("viewport_size must be non-zero".into()));
        }
        if self.max_frame_ms == 0 {
            return Err(ConfigError::Invalid("max_frame_ms must be positive".into()));
        }
        if self.light_radius < 1 {
            return Err(ConfigError::Invalid(format!(
                "light_radius must be at least 1, got {}",
                self.light_radius
            )));
        }
        if self.player_health == 0 || self.enemy_health == 0 {
            return Err(ConfigError::Invalid("starting health must be positive".into()));
        }
        for (name, size) in [
            ("player_hitbox", self.player_hitbox),
            ("enemy_hitbox", self.enemy_hitbox),
            ("bullet_hitbox", self.bullet_hitbox),
            ("key_hitbox", self.key_hitbox),
        ] {
            // The collision window only scans one tile around the mover.
            if !(size > 0.0 && size <= self.tile_size) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, tile_size], got {size}"
                )));
            }
        }

        let frame_secs = self.max_frame_ms as f64 / 1000.0;
        for (name, speed, hitbox) in [
            ("player_speed", self.player_speed, self.player_hitbox),
            ("enemy speed", self.enemy_speed(), self.enemy_hitbox),
            ("bullet_speed", self.bullet_speed, self.bullet_hitbox),
        ] {
            if !(speed >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {speed}"
                )));
            }
            // The longest step plus half the box must stay inside the neighbouring tile.
            let reach = speed * frame_secs + hitbox / 2.0;
            if reach > self.tile_size {
                return Err(ConfigError::Invalid(format!(
                    "{name} {speed} reaches {reach} px past the centre in one {} ms frame, more than a tile",
                    self.max_frame_ms
                )));
            }
        }
        Ok(())
    }

    /// Movement speed of enemies (pixels per second).
    pub fn enemy_speed(&self) -> f64 {
        self.player_speed * self.enemy_speed_factor
    }
}
