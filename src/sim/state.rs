//! Entity and player state
//!
//! Plain data plus the [`EntityStore`] that owns every live entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HOSTILE_START_HEALTH;

/// Lifecycle phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start()`
    Welcome,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for `start()` or `reset()`
    GameOver,
}

/// Notable things that happened during a call, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began; external drivers should (re)start their cadence
    Started,
    HostileSpawned { x: f32 },
    PickupSpawned { x: f32 },
    /// A hostile was destroyed or spent itself on the player
    HostileDestroyed { score: u32 },
    PlayerHit { health: f32 },
    PickupCollected { health: f32 },
    LevelUp { level: u8 },
    SpeedTierUp { tier: u32 },
    /// Health ran out; entities are already cleared
    GameOver { score: u32 },
    /// Deferred follow-up to `GameOver` once the cosmetic delay elapsed
    Cleared,
    /// Returned to the welcome screen
    Reset,
}

/// A player shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub damage: f32,
    /// Units per tick
    pub speed: f32,
    /// Heading in radians (screen space, y down)
    pub direction: f32,
    /// Wall reflections so far
    pub bounces: u8,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32, speed: f32, damage: f32) -> Self {
        Self {
            pos,
            damage,
            speed,
            direction,
            bounces: 0,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: Vec2,
    /// Display symbol from the configured palette
    pub symbol: String,
    pub health: f32,
    /// Units per tick, straight down
    pub speed: f32,
    /// Set once this hostile has rammed the player
    pub collided: bool,
}

impl Hostile {
    pub fn new(pos: Vec2, symbol: impl Into<String>, speed: f32) -> Self {
        Self {
            pos,
            symbol: symbol.into(),
            health: HOSTILE_START_HEALTH,
            speed,
            collided: false,
        }
    }

    /// Destroyed or spent; either way it scores when removed
    pub fn is_spent(&self) -> bool {
        self.health <= 0.0 || self.collided
    }
}

/// A falling heart that restores health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    /// Units per tick, straight down
    pub speed: f32,
}

impl Pickup {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self { pos, speed }
    }
}

/// Everything about the player the core tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Written by the input collaborator, read by the core
    pub pos: Vec2,
    /// Always within `[0, max_health]`
    pub health: f32,
    /// Weapon level, 1..=3
    pub level: u8,
    /// Seconds survived in the current run
    pub survival_time: f32,
    pub score: u32,
    /// Hostile speed tier derived from score
    pub speed_tier: u32,
}

impl PlayerState {
    pub fn new(pos: Vec2, health: f32) -> Self {
        Self {
            pos,
            health,
            level: 1,
            survival_time: 0.0,
            score: 0,
            speed_tier: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtract damage, clamping at zero. Returns the unclamped result.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let raw = self.health - amount;
        self.health = raw.max(0.0);
        raw
    }

    /// Add health, clamping at `max_health`
    pub fn heal(&mut self, amount: f32, max_health: f32) {
        self.health = (self.health + amount).min(max_health);
    }
}

/// Owns every live projectile, hostile and pickup.
///
/// Order carries no meaning. Removal always goes through a single filtering
/// pass so no index is ever invalidated mid-iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    projectiles: Vec<Projectile>,
    hostiles: Vec<Hostile>,
    pickups: Vec<Pickup>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn hostiles_mut(&mut self) -> &mut [Hostile] {
        &mut self.hostiles
    }

    pub fn pickups_mut(&mut self) -> &mut [Pickup] {
        &mut self.pickups
    }

    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn extend_projectiles(&mut self, projectiles: impl IntoIterator<Item = Projectile>) {
        self.projectiles.extend(projectiles);
    }

    pub fn push_hostile(&mut self, hostile: Hostile) {
        self.hostiles.push(hostile);
    }

    pub fn push_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    pub fn retain_projectiles(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.projectiles.retain(keep);
    }

    /// Update and filter in the same pass
    pub fn retain_projectiles_mut(&mut self, keep: impl FnMut(&mut Projectile) -> bool) {
        self.projectiles.retain_mut(keep);
    }

    pub fn retain_hostiles(&mut self, keep: impl FnMut(&Hostile) -> bool) {
        self.hostiles.retain(keep);
    }

    pub fn retain_pickups(&mut self, keep: impl FnMut(&Pickup) -> bool) {
        self.pickups.retain(keep);
    }

    /// Split borrow for passes that touch projectiles and hostiles together
    pub fn projectiles_and_hostiles_mut(&mut self) -> (&mut Vec<Projectile>, &mut Vec<Hostile>) {
        (&mut self.projectiles, &mut self.hostiles)
    }

    /// Drop every entity in all three collections
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.hostiles.clear();
        self.pickups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.hostiles.is_empty() && self.pickups.is_empty()
    }

    /// (projectiles, hostiles, pickups)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.projectiles.len(), self.hostiles.len(), self.pickups.len())
    }
}
