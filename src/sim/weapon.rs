//! Player weapon volleys

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::state::Projectile;

/// Heading of a shot fired straight up
pub const UP: f32 = -FRAC_PI_2;

/// Angular offsets from straight up for each weapon level
pub fn spread(level: u8) -> &'static [f32] {
    match level {
        0 | 1 => &[0.0],
        2 => &[-0.2, 0.2],
        _ => &[0.0, -0.3, 0.3],
    }
}

/// Projectiles for one trigger pull at the given level
pub fn volley(muzzle: Vec2, level: u8, speed: f32, damage: f32) -> Vec<Projectile> {
    spread(level)
        .iter()
        .map(|offset| Projectile::new(muzzle, UP + offset, speed, damage))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volley_sizes_follow_level() {
        let muzzle = Vec2::new(100.0, 500.0);
        assert_eq!(volley(muzzle, 1, 15.0, 10.0).len(), 1);
        assert_eq!(volley(muzzle, 2, 15.0, 10.0).len(), 2);
        assert_eq!(volley(muzzle, 3, 15.0, 10.0).len(), 3);
    }

    #[test]
    fn test_level_two_is_symmetric_without_center() {
        let shots = volley(Vec2::ZERO, 2, 15.0, 10.0);
        assert!((shots[0].direction - (UP - 0.2)).abs() < 1e-6);
        assert!((shots[1].direction - (UP + 0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_volley_shots_start_fresh() {
        for shot in volley(Vec2::new(5.0, 6.0), 3, 12.0, 7.5) {
            assert_eq!(shot.pos, Vec2::new(5.0, 6.0));
            assert_eq!(shot.bounces, 0);
            assert_eq!(shot.speed, 12.0);
            assert_eq!(shot.damage, 7.5);
        }
    }
}
