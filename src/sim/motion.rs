//! Per-tick entity motion
//!
//! Speeds are in units per tick; `dt` only drives the survival clock.

use std::f32::consts::PI;

use super::state::{EntityStore, Projectile};
use crate::consts::{MAX_BOUNCES, PROJECTILE_OFFSCREEN_MARGIN};
use crate::direction_vector;

/// Move one projectile and reflect it off the side walls.
///
/// Returns `false` once it has left through the top or bottom.
pub fn step_projectile(projectile: &mut Projectile, width: f32, height: f32) -> bool {
    projectile.pos += direction_vector(projectile.direction) * projectile.speed;

    if projectile.pos.y < 0.0 || projectile.pos.y > height {
        return false;
    }

    if projectile.bounces < MAX_BOUNCES && (projectile.pos.x <= 0.0 || projectile.pos.x >= width) {
        projectile.direction = PI - projectile.direction;
        projectile.bounces += 1;
    }

    true
}

/// Whether a projectile that survived its step should still be purged
pub fn projectile_expired(projectile: &Projectile, width: f32) -> bool {
    projectile.bounces >= MAX_BOUNCES
        || projectile.pos.x < -PROJECTILE_OFFSCREEN_MARGIN
        || projectile.pos.x > width + PROJECTILE_OFFSCREEN_MARGIN
}

/// Advance every projectile, then purge the spent ones
pub fn advance_projectiles(store: &mut EntityStore, width: f32, height: f32) {
    store.retain_projectiles_mut(|p| step_projectile(p, width, height));
    store.retain_projectiles(|p| !projectile_expired(p, width));
}

/// Straight vertical descent for hostiles and pickups
pub fn advance_descenders(store: &mut EntityStore) {
    for hostile in store.hostiles_mut() {
        hostile.pos.y += hostile.speed;
    }
    for pickup in store.pickups_mut() {
        pickup.pos.y += pickup.speed;
    }
}
