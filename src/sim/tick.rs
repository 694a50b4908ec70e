//! Simulation controller
//!
//! Owns all state and runs one tick as: spawn -> motion -> progression ->
//! collisions. Lifecycle: Welcome -> Playing -> GameOver -> (reset) -> Welcome.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{EntityStore, GameEvent, GamePhase, Hostile, Pickup, PlayerState, Projectile};
use super::{collision, motion, progression, spawn, weapon};
use crate::config::Config;
use crate::consts::{MUZZLE_OFFSET, PLAYER_BOTTOM_OFFSET};

/// Read-only view of the simulation for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub player: PlayerState,
    pub max_health: f32,
    pub projectiles: Vec<Projectile>,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
}

/// The game core. Generic over its random source so runs can be scripted.
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng = Pcg32> {
    config: Config,
    phase: GamePhase,
    player: PlayerState,
    entities: EntityStore,
    rng: R,
    events: Vec<GameEvent>,
    ticks: u64,
}

impl Simulation<Pcg32> {
    /// Simulation seeded from the thread RNG
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Simulation with a fixed seed (reproducible runs)
    pub fn seeded(config: Config, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Any config is accepted; spawning that the config cannot support is
    /// skipped rather than failing a tick.
    pub fn with_rng(config: Config, rng: R) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("Running with an unchecked config: {}", err);
        }
        let player = PlayerState::new(spawn_position(&config), config.initial_health);
        Self {
            config,
            phase: GamePhase::Welcome,
            player,
            entities: EntityStore::new(),
            rng,
            events: Vec::new(),
            ticks: 0,
        }
    }

    // === Lifecycle ===

    /// Begin a run from Welcome or GameOver. No-op while already playing.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            log::debug!("start() ignored: already playing");
            return;
        }
        self.clear_run();
        self.phase = GamePhase::Playing;
        log::info!(
            "Run started ({}x{}, health {})",
            self.config.width,
            self.config.height,
            self.player.health
        );
        self.events.push(GameEvent::Started);
    }

    /// End the current run. Only valid while playing.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.entities.clear();
        log::info!(
            "Game over: score {} after {:.1}s (level {})",
            self.player.score,
            self.player.survival_time,
            self.player.level
        );
        self.events.push(GameEvent::GameOver {
            score: self.player.score,
        });
    }

    /// Return to the welcome screen with a clean slate. Safe from any phase.
    pub fn reset(&mut self) {
        self.clear_run();
        self.phase = GamePhase::Welcome;
        log::info!("Reset to welcome");
        self.events.push(GameEvent::Reset);
    }

    fn clear_run(&mut self) {
        self.entities.clear();
        self.player = PlayerState::new(spawn_position(&self.config), self.config.initial_health);
        self.ticks = 0;
    }

    // === Per-tick operations ===

    /// Advance the simulation by one step. `dt` is elapsed seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.ticks += 1;

        let clock = spawn::clock_secs(self.config.spawn_clock, self.player.survival_time);
        if let Some(x) = spawn::try_spawn_hostile(
            &mut self.entities,
            &self.player,
            &self.config,
            clock,
            &mut self.rng,
        ) {
            self.events.push(GameEvent::HostileSpawned { x });
        }
        if let Some(x) = spawn::try_spawn_pickup(&mut self.entities, &self.config, &mut self.rng) {
            self.events.push(GameEvent::PickupSpawned { x });
        }

        motion::advance_projectiles(&mut self.entities, self.config.width, self.config.height);
        motion::advance_descenders(&mut self.entities);

        if let Some(level) = progression::advance_time(&mut self.player, dt) {
            log::info!("Weapon level {} at {:.1}s", level, self.player.survival_time);
            self.events.push(GameEvent::LevelUp { level });
        }

        let report = collision::resolve(
            &mut self.entities,
            &mut self.player,
            &self.config,
            &mut self.events,
        );

        let (projectiles, hostiles, pickups) = self.entities.counts();
        log::trace!(
            "tick {}: {} projectiles, {} hostiles, {} pickups, {:?}",
            self.ticks,
            projectiles,
            hostiles,
            pickups,
            report
        );

        if !self.player.is_alive() {
            self.game_over();
        }
    }

    /// Fire one volley for the current weapon level. Returns shots fired.
    pub fn fire_weapon(&mut self) -> usize {
        if self.phase != GamePhase::Playing || !self.player.is_alive() {
            return 0;
        }
        let scale = self.config.scale();
        let muzzle = self.player.pos - Vec2::new(0.0, MUZZLE_OFFSET * scale);
        let shots = weapon::volley(
            muzzle,
            self.player.level,
            self.config.projectile_speed * scale,
            self.config.projectile_damage,
        );
        let fired = shots.len();
        self.entities.extend_projectiles(shots);
        fired
    }

    /// Input collaborator hook. Ignored unless playing.
    pub fn set_player_position(&mut self, pos: Vec2) {
        if self.phase == GamePhase::Playing {
            self.player.pos = pos;
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether tick/fire drivers should be running
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.pos
    }

    pub fn health(&self) -> f32 {
        self.player.health
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn level(&self) -> u8 {
        self.player.level
    }

    pub fn speed_tier(&self) -> u32 {
        self.player.speed_tier
    }

    pub fn survival_time(&self) -> f32 {
        self.player.survival_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.entities.projectiles()
    }

    pub fn hostiles(&self) -> &[Hostile] {
        self.entities.hostiles()
    }

    pub fn pickups(&self) -> &[Pickup] {
        self.entities.pickups()
    }

    /// Direct entity access for scripted scenarios and tooling
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    /// Direct player access for scripted scenarios and tooling
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            tick: self.ticks,
            player: self.player.clone(),
            max_health: self.config.max_health,
            projectiles: self.entities.projectiles().to_vec(),
            hostiles: self.entities.hostiles().to_vec(),
            pickups: self.entities.pickups().to_vec(),
        }
    }
}

/// Where the player appears at the start of a run
pub fn spawn_position(config: &Config) -> Vec2 {
    Vec2::new(config.width / 2.0, config.height - PLAYER_BOTTOM_OFFSET)
}
