//! Fixed-rate scheduler
//!
//! Turns variable frame times into fixed `tick` calls plus a `fire_weapon`
//! cadence, and emits the cosmetic `Cleared` event after a game over.
//! Hosts with their own timers can skip this and call the simulation directly.

use rand::Rng;

use crate::config::Config;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GameEvent, Simulation};

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    tick_interval: f32,
    fire_interval: f32,
    game_over_delay: f32,
    tick_accumulator: f32,
    fire_accumulator: f32,
    /// Seconds left until `Cleared` is emitted
    clear_countdown: Option<f32>,
}

impl FixedStepDriver {
    pub fn new(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            fire_interval: config.fire_interval,
            game_over_delay: config.game_over_delay,
            tick_accumulator: 0.0,
            fire_accumulator: 0.0,
            clear_countdown: None,
        }
    }

    /// Whether a `Cleared` event is still pending
    pub fn clear_pending(&self) -> bool {
        self.clear_countdown.is_some()
    }

    /// Feed one rendered frame. Returns every event produced during it.
    pub fn advance<R: Rng>(&mut self, sim: &mut Simulation<R>, frame_dt: f32) -> Vec<GameEvent> {
        // A bad host timestamp must not poison the accumulators
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let mut events = sim.drain_events();
        self.observe(&events);

        if let Some(remaining) = self.clear_countdown.as_mut() {
            *remaining -= frame_dt;
            if *remaining <= 0.0 {
                self.clear_countdown = None;
                log::debug!("Game over screen cleared");
                events.push(GameEvent::Cleared);
            }
        }

        if !sim.is_active() {
            return events;
        }

        self.tick_accumulator += frame_dt;
        let mut substeps = 0;
        while self.tick_accumulator >= self.tick_interval && substeps < MAX_SUBSTEPS {
            self.fire_accumulator += self.tick_interval;
            if self.fire_accumulator >= self.fire_interval {
                self.fire_accumulator -= self.fire_interval;
                sim.fire_weapon();
            }

            sim.tick(self.tick_interval);
            self.tick_accumulator -= self.tick_interval;
            substeps += 1;

            let step_events = sim.drain_events();
            self.observe(&step_events);
            events.extend(step_events);

            if !sim.is_active() {
                break;
            }
        }

        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.tick_accumulator = self.tick_accumulator.min(self.tick_interval);
        }

        events
    }

    fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Started => {
                    self.tick_accumulator = 0.0;
                    self.fire_accumulator = 0.0;
                    self.clear_countdown = None;
                }
                GameEvent::GameOver { .. } => {
                    self.tick_accumulator = 0.0;
                    self.clear_countdown = Some(self.game_over_delay);
                }
                GameEvent::Reset => {
                    self.tick_accumulator = 0.0;
                    self.clear_countdown = None;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Hostile};

    const FRAME: f32 = 1.0 / 60.0;

    fn quiet_config() -> Config {
        Config {
            pickup_chance: 0.0,
            ..Config::default()
        }
    }

    #[test]
    fn test_idle_until_started() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);

        for _ in 0..30 {
            assert!(driver.advance(&mut sim, FRAME).is_empty());
        }
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.phase(), GamePhase::Welcome);
    }

    #[test]
    fn test_ticks_and_fires_on_cadence() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();

        let mut events = Vec::new();
        for _ in 0..30 {
            events.extend(driver.advance(&mut sim, FRAME));
        }
        assert_eq!(events[0], GameEvent::Started);
        assert!((29..=30).contains(&sim.ticks()));
        // One volley every 0.1s of game time
        assert!((4..=5).contains(&sim.projectiles().len()));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();

        driver.advance(&mut sim, 5.0);
        assert!(sim.ticks() <= u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_non_finite_frames_are_ignored() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();

        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            driver.advance(&mut sim, bad);
        }
        assert_eq!(sim.ticks(), 0);

        for _ in 0..120 {
            driver.advance(&mut sim, FRAME);
        }
        assert!(sim.ticks() >= 119);
        assert_eq!(sim.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_nan_frame_during_game_over_still_clears() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();
        sim.game_over();
        driver.advance(&mut sim, f32::NAN);
        assert!(driver.clear_pending());

        let cleared = (0..30)
            .flat_map(|_| driver.advance(&mut sim, FRAME))
            .filter(|e| *e == GameEvent::Cleared)
            .count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_cleared_follows_game_over_after_delay() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();
        sim.player_mut().health = 50.0;
        let pos = sim.player_position();
        sim.entities_mut().push_hostile(Hostile::new(pos, "👻", 0.0));

        let events = driver.advance(&mut sim, FRAME);
        assert!(events.contains(&GameEvent::GameOver { score: 1 }));
        assert!(!events.contains(&GameEvent::Cleared));
        assert!(driver.clear_pending());

        let mut cleared = 0;
        for _ in 0..30 {
            cleared += driver
                .advance(&mut sim, FRAME)
                .iter()
                .filter(|e| **e == GameEvent::Cleared)
                .count();
        }
        assert_eq!(cleared, 1);
        assert!(!driver.clear_pending());
        assert_eq!(sim.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_reset_cancels_pending_clear() {
        let config = quiet_config();
        let mut sim = Simulation::seeded(config.clone(), 5);
        let mut driver = FixedStepDriver::new(&config);
        sim.start();
        sim.game_over();
        driver.advance(&mut sim, FRAME);
        assert!(driver.clear_pending());

        sim.reset();
        let events = driver.advance(&mut sim, FRAME);
        assert_eq!(events, vec![GameEvent::Reset]);
        assert!(!driver.clear_pending());
    }
}
