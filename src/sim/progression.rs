//! Time- and score-driven progression
//!
//! Survival time raises the weapon level; score raises the hostile speed tier.

use super::state::PlayerState;
use crate::consts::{LEVEL_2_SECS, LEVEL_3_SECS, MAX_LEVEL, SCORE_PER_SPEED_TIER};

/// Weapon level earned after `survival_secs` seconds
pub fn level_for(survival_secs: f32) -> u8 {
    if survival_secs >= LEVEL_3_SECS {
        3
    } else if survival_secs >= LEVEL_2_SECS {
        2
    } else {
        1
    }
}

/// Hostile speed tier for a score: one tier per `SCORE_PER_SPEED_TIER` points
pub fn speed_tier_for(score: u32) -> u32 {
    score / SCORE_PER_SPEED_TIER
}

/// Accumulate survival time. Returns the new level if it went up.
///
/// The level never decreases and never exceeds `MAX_LEVEL`.
pub fn advance_time(player: &mut PlayerState, dt: f32) -> Option<u8> {
    player.survival_time += dt.max(0.0);
    let level = player.level.max(level_for(player.survival_time)).min(MAX_LEVEL);
    if level > player.level {
        player.level = level;
        Some(level)
    } else {
        None
    }
}

/// Credit one removed hostile. Returns the new speed tier if it went up.
pub fn record_kill(player: &mut PlayerState) -> Option<u32> {
    player.score += 1;
    let tier = speed_tier_for(player.score);
    if tier > player.speed_tier {
        player.speed_tier = tier;
        Some(tier)
    } else {
        None
    }
}
