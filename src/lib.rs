//! Plane War - simulation core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Per-tick simulation (spawning, motion, collisions, progression)
//! - `config`: Data-driven game balance and viewport settings
//! - `driver`: Fixed-rate scheduler that feeds `tick`/`fire_weapon`
//! - `error`: Configuration errors

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;

pub use config::{Config, SpawnClock};
pub use driver::FixedStepDriver;
pub use error::ConfigError;
pub use sim::{GameEvent, GamePhase, Simulation, Snapshot};

use glam::Vec2;

/// Fixed game rules that are not exposed as configuration
pub mod consts {
    /// Health a freshly spawned hostile starts with
    pub const HOSTILE_START_HEALTH: f32 = 100.0;

    /// Vertical coordinate where hostiles and pickups enter (above the viewport)
    pub const SPAWN_Y: f32 = -50.0;
    /// Horizontal inset of spawn positions from the viewport edges
    pub const SPAWN_EDGE_INSET: f32 = 25.0;
    /// Placement attempts before a hostile spawn is skipped for the tick
    pub const SPAWN_ATTEMPTS: u32 = 10;
    /// Minimum horizontal gap between a new hostile and existing ones
    pub const SPAWN_MIN_GAP: f32 = 50.0;
    /// Length of one spawn-pressure window (target count cycles 1..=10)
    pub const SPAWN_WINDOW_SECS: f64 = 10.0;

    /// Bounces a projectile may make before it is purged
    pub const MAX_BOUNCES: u8 = 2;
    /// Horizontal distance past either wall before a projectile is purged
    pub const PROJECTILE_OFFSCREEN_MARGIN: f32 = 50.0;

    /// Collision half-extents (axis-aligned boxes)
    pub const PROJECTILE_HIT_HALF_EXTENT: f32 = 20.0;
    pub const CONTACT_HALF_EXTENT: f32 = 40.0;
    pub const PICKUP_HALF_EXTENT: f32 = 30.0;

    /// Survival seconds needed for weapon level 2 and 3
    pub const LEVEL_2_SECS: f32 = 30.0;
    pub const LEVEL_3_SECS: f32 = 60.0;
    pub const MAX_LEVEL: u8 = 3;

    /// Score needed per hostile speed tier
    pub const SCORE_PER_SPEED_TIER: u32 = 20;
    /// Extra hostile speed (before scaling) per speed tier
    pub const SPEED_PER_TIER: f32 = 0.02;

    /// Player spawn distance above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    /// Muzzle offset above the player (before scaling)
    pub const MUZZLE_OFFSET: f32 = 30.0;

    /// Largest frame delta the driver accepts (prevents spiral of death)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum ticks per frame
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Unit direction vector for an angle in radians (y grows downward)
#[inline]
pub fn direction_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Axis-aligned overlap test using a shared half-extent on both axes
#[inline]
pub fn boxes_overlap(a: Vec2, b: Vec2, half_extent: f32) -> bool {
    (a.x - b.x).abs() < half_extent && (a.y - b.y).abs() < half_extent
}
