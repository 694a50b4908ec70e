//! Game configuration
//!
//! Every balance constant and the viewport size can be overridden from a
//! JSON file; fields missing from the file keep their defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_EDGE_INSET;
use crate::error::ConfigError;

/// Time source for the hostile spawn-pressure window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpawnClock {
    /// Survival time of the current run
    #[default]
    Game,
    /// System time, so pressure depends on the time of day
    Wall,
}

impl SpawnClock {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnClock::Game => "game",
            SpawnClock::Wall => "wall",
        }
    }

}

impl FromStr for SpawnClock {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "game" => Ok(SpawnClock::Game),
            "wall" | "system" => Ok(SpawnClock::Wall),
            other => Err(ConfigError::invalid(
                "spawn_clock",
                format!("unknown clock `{other}` (expected game or wall)"),
            )),
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Player ===
    /// Health ceiling (pickups clamp to this)
    pub max_health: f32,
    /// Health at the start of each run
    pub initial_health: f32,
    /// Health lost when a hostile rams the player
    pub contact_damage: f32,
    /// Health restored by a pickup
    pub heal_amount: f32,

    // === Weapon ===
    /// Seconds between volleys while the player is alive
    pub fire_interval: f32,
    /// Projectile speed in units per tick (before scaling)
    pub projectile_speed: f32,
    pub projectile_damage: f32,

    // === Spawning ===
    /// Hostile descent speed in units per tick (before scaling)
    pub hostile_speed: f32,
    /// Pickup descent speed in units per tick (before scaling)
    pub pickup_speed: f32,
    /// Per-tick chance of a pickup appearing when none is live
    pub pickup_chance: f64,
    pub spawn_clock: SpawnClock,
    /// Hostile symbols, one picked at random per spawn
    pub palette: Vec<String>,

    // === Viewport ===
    pub width: f32,
    pub height: f32,
    /// Width the speeds were tuned for; `width / reference_width` scales them
    pub reference_width: f32,

    // === Scheduling ===
    /// Seconds per simulation tick
    pub tick_interval: f32,
    /// Cosmetic pause between game over and the cleared event
    pub game_over_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_health: 500.0,
            initial_health: 300.0,
            contact_damage: 100.0,
            heal_amount: 100.0,

            fire_interval: 0.1,
            projectile_speed: 15.0,
            projectile_damage: 10.0,

            hostile_speed: 3.0,
            pickup_speed: 3.0,
            pickup_chance: 0.01,
            spawn_clock: SpawnClock::Game,
            palette: ["👾", "👻", "🤖", "👽", "🎃"]
                .iter()
                .map(|s| s.to_string())
                .collect(),

            width: 375.0,
            height: 667.0,
            reference_width: 375.0,

            tick_interval: 1.0 / 60.0,
            game_over_delay: 0.3,
        }
    }
}

impl Config {
    /// Default settings for a viewport of the given size
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Speed multiplier relative to the reference width
    pub fn scale(&self) -> f32 {
        self.width / self.reference_width
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 2.0 * SPAWN_EDGE_INSET) {
            return Err(ConfigError::invalid(
                "width",
                format!("must exceed {}", 2.0 * SPAWN_EDGE_INSET),
            ));
        }
        if !(self.height > 0.0) {
            return Err(ConfigError::invalid("height", "must be positive"));
        }
        if !(self.reference_width > 0.0) {
            return Err(ConfigError::invalid("reference_width", "must be positive"));
        }
        if !(self.max_health > 0.0) {
            return Err(ConfigError::invalid("max_health", "must be positive"));
        }
        if !(self.initial_health > 0.0 && self.initial_health <= self.max_health) {
            return Err(ConfigError::invalid(
                "initial_health",
                format!("must be in (0, {}]", self.max_health),
            ));
        }
        if self.contact_damage < 0.0 || self.heal_amount < 0.0 || self.projectile_damage < 0.0 {
            return Err(ConfigError::invalid(
                "damage",
                "contact_damage, heal_amount and projectile_damage must not be negative",
            ));
        }
        if !(self.projectile_speed > 0.0) {
            return Err(ConfigError::invalid("projectile_speed", "must be positive"));
        }
        if self.hostile_speed < 0.0 || self.pickup_speed < 0.0 {
            return Err(ConfigError::invalid(
                "speed",
                "hostile_speed and pickup_speed must not be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            return Err(ConfigError::invalid("pickup_chance", "must be in [0, 1]"));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("palette", "needs at least one symbol"));
        }
        if !(self.tick_interval > 0.0) {
            return Err(ConfigError::invalid("tick_interval", "must be positive"));
        }
        if !(self.fire_interval > 0.0) {
            return Err(ConfigError::invalid("fire_interval", "must be positive"));
        }
        if !(self.game_over_delay >= 0.0) {
            return Err(ConfigError::invalid("game_over_delay", "must not be negative"));
        }
        Ok(())
    }
}
