use std::f32::consts::PI;

use glam::Vec2;
use proptest::prelude::*;

use plane_war::sim::collision::resolve_projectile_hits;
use plane_war::sim::{GamePhase, Hostile, Projectile, Simulation};
use plane_war::Config;

const DT: f32 = 1.0 / 60.0;

fn busy_config() -> Config {
    Config {
        pickup_chance: 0.05,
        ..Config::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn health_stays_within_bounds(
        seed in any::<u64>(),
        inputs in prop::collection::vec((0.0f32..375.0, 400.0f32..667.0, any::<bool>()), 1..600),
    ) {
        let mut sim = Simulation::seeded(busy_config(), seed);
        sim.start();
        let max = sim.config().max_health;

        for (x, y, fire) in inputs {
            sim.set_player_position(Vec2::new(x, y));
            if fire {
                sim.fire_weapon();
            }
            sim.tick(DT);
            prop_assert!(sim.health() >= 0.0 && sim.health() <= max);
            if sim.phase() == GamePhase::GameOver {
                prop_assert!(sim.entities().is_empty());
                break;
            }
        }
    }

    #[test]
    fn live_projectiles_never_hold_two_bounces(
        seed in any::<u64>(),
        headings in prop::collection::vec(-PI..0.0f32, 1..40),
        xs in prop::collection::vec(0.0f32..375.0, 1..40),
    ) {
        let mut sim = Simulation::seeded(busy_config(), seed);
        sim.start();
        sim.set_player_position(Vec2::new(-500.0, 600.0));
        for (heading, x) in headings.iter().zip(xs.iter()) {
            sim.entities_mut().push_projectile(Projectile::new(
                Vec2::new(*x, 600.0),
                *heading,
                15.0,
                10.0,
            ));
        }

        for _ in 0..120 {
            sim.tick(DT);
            for projectile in sim.projectiles() {
                prop_assert!(projectile.bounces < 2);
                prop_assert!(projectile.pos.x >= -50.0 && projectile.pos.x <= 425.0);
            }
        }
    }

    #[test]
    fn each_hostile_takes_at_most_one_hit(
        hostile_xs in prop::collection::vec(0.0f32..375.0, 1..12),
        shots in prop::collection::vec((0.0f32..375.0, 80.0f32..120.0), 0..60),
    ) {
        let mut hostiles: Vec<Hostile> = hostile_xs
            .iter()
            .map(|x| Hostile::new(Vec2::new(*x, 100.0), "👾", 3.0))
            .collect();
        let mut projectiles: Vec<Projectile> = shots
            .iter()
            .map(|(x, y)| Projectile::new(Vec2::new(*x, *y), -PI / 2.0, 15.0, 10.0))
            .collect();
        let before = projectiles.len();

        let hits = resolve_projectile_hits(&mut projectiles, &mut hostiles);

        let damaged = hostiles.iter().filter(|h| h.health < 100.0).count();
        prop_assert_eq!(hits, damaged);
        prop_assert_eq!(projectiles.len(), before - hits);
        for hostile in &hostiles {
            prop_assert!(hostile.health == 100.0 || hostile.health == 90.0);
        }
    }

    #[test]
    fn level_never_decreases(seed in any::<u64>(), dts in prop::collection::vec(0.0f32..2.0, 1..120)) {
        let mut sim = Simulation::seeded(Config { pickup_chance: 0.0, ..Config::default() }, seed);
        sim.start();
        sim.set_player_position(Vec2::new(-1000.0, -1000.0));

        let mut last = sim.level();
        for dt in dts {
            sim.tick(dt);
            let level = sim.level();
            prop_assert!(level >= last && level <= 3);
            let t = sim.survival_time();
            prop_assert_eq!(level >= 2, t >= 30.0);
            prop_assert_eq!(level == 3, t >= 60.0);
            last = level;
        }
    }
}

#[test]
fn reset_then_start_matches_fresh_start() {
    let mut played = Simulation::seeded(busy_config(), 9);
    played.start();
    for i in 0..300 {
        if i % 6 == 0 {
            played.fire_weapon();
        }
        played.tick(DT);
    }
    played.reset();
    played.reset();
    played.start();

    let mut fresh = Simulation::seeded(busy_config(), 9);
    fresh.start();

    let a = played.snapshot();
    let b = fresh.snapshot();
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.player, b.player);
    assert!(a.projectiles.is_empty() && a.hostiles.is_empty() && a.pickups.is_empty());
}
