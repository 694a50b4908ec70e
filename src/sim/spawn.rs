//! Hostile and pickup spawning
//!
//! Runs once per tick. All randomness comes through the injected RNG.

use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{EntityStore, Hostile, Pickup, PlayerState};
use crate::config::{Config, SpawnClock};
use crate::consts::*;

/// Seconds fed to the spawn-pressure window for the given clock
pub fn clock_secs(clock: SpawnClock, survival_time: f32) -> f64 {
    match clock {
        SpawnClock::Game => f64::from(survival_time),
        SpawnClock::Wall => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0),
    }
}

/// How many hostiles may be live: cycles 1..=10 over each 10 second window
pub fn hostile_target(clock_secs: f64) -> usize {
    clock_secs.rem_euclid(SPAWN_WINDOW_SECS).floor() as usize + 1
}

/// Hostile speed for the current speed tier, already scaled
pub fn hostile_speed(config: &Config, speed_tier: u32) -> f32 {
    (config.hostile_speed + SPEED_PER_TIER * speed_tier as f32) * config.scale()
}

/// Columns an entity may enter at, or `None` when the viewport is too
/// narrow (or not finite) to leave room inside the edge insets
pub fn entry_columns(width: f32) -> Option<RangeInclusive<f32>> {
    let (lo, hi) = (SPAWN_EDGE_INSET, width - SPAWN_EDGE_INSET);
    (hi.is_finite() && hi >= lo).then_some(lo..=hi)
}

/// Pick an entry column at least `SPAWN_MIN_GAP` away from every hostile.
/// Gives up after `SPAWN_ATTEMPTS` rejected candidates.
pub fn find_hostile_slot(rng: &mut impl Rng, hostiles: &[Hostile], width: f32) -> Option<f32> {
    let columns = entry_columns(width)?;
    for _ in 0..SPAWN_ATTEMPTS {
        let x = rng.random_range(columns.clone());
        if hostiles.iter().all(|h| (x - h.pos.x).abs() >= SPAWN_MIN_GAP) {
            return Some(x);
        }
    }
    None
}

/// Spawn a hostile if the pressure window allows one and a slot is free.
/// Returns the entry column of the new hostile.
pub fn try_spawn_hostile(
    store: &mut EntityStore,
    player: &PlayerState,
    config: &Config,
    clock_secs: f64,
    rng: &mut impl Rng,
) -> Option<f32> {
    if store.hostiles().len() >= hostile_target(clock_secs) {
        return None;
    }

    let Some(x) = find_hostile_slot(rng, store.hostiles(), config.width) else {
        log::trace!("No free hostile slot this tick");
        return None;
    };

    let symbol = config
        .palette
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "👾".to_string());
    let speed = hostile_speed(config, player.speed_tier);

    log::debug!("Spawned hostile {} at x={:.1} speed={:.2}", symbol, x, speed);
    store.push_hostile(Hostile::new(Vec2::new(x, SPAWN_Y), symbol, speed));
    Some(x)
}

/// Spawn a pickup with `pickup_chance` when none is live.
/// Returns the entry column of the new pickup.
pub fn try_spawn_pickup(store: &mut EntityStore, config: &Config, rng: &mut impl Rng) -> Option<f32> {
    if !store.pickups().is_empty() {
        return None;
    }
    // Out-of-range chances clamp; NaN never spawns
    let chance = if config.pickup_chance.is_nan() {
        0.0
    } else {
        config.pickup_chance.clamp(0.0, 1.0)
    };
    let columns = entry_columns(config.width)?;
    if !rng.random_bool(chance) {
        return None;
    }

    let x = rng.random_range(columns);
    log::debug!("Spawned pickup at x={:.1}", x);
    store.push_pickup(Pickup::new(
        Vec2::new(x, SPAWN_Y),
        config.pickup_speed * config.scale(),
    ));
    Some(x)
}
