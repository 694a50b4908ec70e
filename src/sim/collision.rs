//! Collision detection and resolution
//!
//! Every test is an axis-aligned box check against a half-extent. Consumed
//! entities are marked during the scan and compacted afterwards, so nothing is
//! removed while it is being iterated.

use super::progression::record_kill;
use super::state::{EntityStore, GameEvent, Hostile, PlayerState, Projectile};
use crate::boxes_overlap;
use crate::config::Config;
use crate::consts::{CONTACT_HALF_EXTENT, PICKUP_HALF_EXTENT, PROJECTILE_HIT_HALF_EXTENT};

/// Summary of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Projectiles that struck a hostile
    pub projectile_hits: usize,
    /// Hostiles that rammed the player this pass
    pub contacts: usize,
    pub pickups_collected: usize,
    /// Hostiles removed for a score
    pub hostiles_destroyed: usize,
    /// Hostiles that fell off the bottom
    pub hostiles_escaped: usize,
}

/// Apply at most one projectile hit to each hostile.
///
/// The first overlapping projectile that has not already been spent this pass
/// deals its damage and is removed. Returns the number of hits.
pub fn resolve_projectile_hits(projectiles: &mut Vec<Projectile>, hostiles: &mut [Hostile]) -> usize {
    let mut consumed = vec![false; projectiles.len()];
    let mut hits = 0;

    for hostile in hostiles.iter_mut() {
        let hit = projectiles.iter().enumerate().find(|(i, p)| {
            !consumed[*i] && boxes_overlap(p.pos, hostile.pos, PROJECTILE_HIT_HALF_EXTENT)
        });
        if let Some((i, projectile)) = hit {
            hostile.health -= projectile.damage;
            consumed[i] = true;
            hits += 1;
        }
    }

    if hits > 0 {
        let mut spent = consumed.into_iter();
        projectiles.retain(|_| !spent.next().unwrap_or(false));
    }
    hits
}

/// Hostiles that touch the player deal contact damage exactly once each
pub fn resolve_contacts(
    hostiles: &mut [Hostile],
    player: &mut PlayerState,
    contact_damage: f32,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut contacts = 0;
    for hostile in hostiles.iter_mut().filter(|h| !h.collided) {
        if boxes_overlap(hostile.pos, player.pos, CONTACT_HALF_EXTENT) {
            let before = player.health;
            player.take_damage(contact_damage);
            hostile.collided = true;
            contacts += 1;
            log::debug!(
                "Player rammed by {} (health {:.0} -> {:.0})",
                hostile.symbol,
                before,
                player.health
            );
            events.push(GameEvent::PlayerHit {
                health: player.health,
            });
        }
    }
    contacts
}

/// Drop pickups below the viewport, then collect the ones touching the player
pub fn resolve_pickups(
    store: &mut EntityStore,
    player: &mut PlayerState,
    config: &Config,
    events: &mut Vec<GameEvent>,
) -> usize {
    let height = config.height;
    store.retain_pickups(|p| p.pos.y <= height);

    let mut collected = 0;
    store.retain_pickups(|pickup| {
        if boxes_overlap(pickup.pos, player.pos, PICKUP_HALF_EXTENT) {
            player.heal(config.heal_amount, config.max_health);
            collected += 1;
            events.push(GameEvent::PickupCollected {
                health: player.health,
            });
            false
        } else {
            true
        }
    });
    collected
}

/// Remove spent hostiles (crediting score) and those past the bottom edge.
/// Returns (destroyed, escaped).
pub fn sweep_hostiles(
    store: &mut EntityStore,
    player: &mut PlayerState,
    height: f32,
    events: &mut Vec<GameEvent>,
) -> (usize, usize) {
    let mut destroyed = 0;
    let mut escaped = 0;
    store.retain_hostiles(|hostile| {
        if hostile.is_spent() {
            destroyed += 1;
            if let Some(tier) = record_kill(player) {
                log::debug!("Hostile speed tier -> {}", tier);
                events.push(GameEvent::SpeedTierUp { tier });
            }
            events.push(GameEvent::HostileDestroyed {
                score: player.score,
            });
            false
        } else if hostile.pos.y >= height {
            escaped += 1;
            false
        } else {
            true
        }
    });
    (destroyed, escaped)
}

/// Full resolution pass: pickups, projectile hits, contacts, then cleanup
pub fn resolve(
    store: &mut EntityStore,
    player: &mut PlayerState,
    config: &Config,
    events: &mut Vec<GameEvent>,
) -> CollisionReport {
    let pickups_collected = resolve_pickups(store, player, config, events);

    let (projectiles, hostiles) = store.projectiles_and_hostiles_mut();
    let projectile_hits = resolve_projectile_hits(projectiles, hostiles);
    let contacts = resolve_contacts(hostiles, player, config.contact_damage, events);

    let (hostiles_destroyed, hostiles_escaped) = sweep_hostiles(store, player, config.height, events);

    CollisionReport {
        projectile_hits,
        contacts,
        pickups_collected,
        hostiles_destroyed,
        hostiles_escaped,
    }
}
