//! Plane War headless runner
//!
//! Drives the simulation at a fixed frame rate with an optional autopilot
//! standing in for pointer input, then reports how the run went.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use glam::Vec2;

use plane_war::sim::Simulation;
use plane_war::{Config, FixedStepDriver, GameEvent, GamePhase, SpawnClock};

#[derive(Parser, Debug)]
#[command(name = "plane-war")]
#[command(about = "Run the Plane War simulation headless and report the outcome")]
struct Cli {
    /// JSON config file (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seconds of game time to simulate
    #[arg(long, default_value_t = 90.0)]
    seconds: f32,
    /// Rendered frames per second fed to the driver
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Spawn-pressure clock: `game` (survival time) or `wall` (time of day)
    #[arg(long)]
    spawn_clock: Option<SpawnClock>,
    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Steer the ship automatically (otherwise it stays parked)
    #[arg(long)]
    autopilot: bool,
    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// Horizontal distance the autopilot may move the ship per frame
const AUTOPILOT_STEP: f32 = 8.0;
/// Hostiles closer than this (vertically) are dodged rather than chased
const DANGER_BAND: f32 = 160.0;

/// Stand-in for pointer input: grab hearts, dodge close hostiles, otherwise
/// line up under the lowest hostile.
fn autopilot_target(sim: &Simulation) -> Vec2 {
    let pos = sim.player_position();
    let width = sim.config().width;

    let threat = sim
        .hostiles()
        .iter()
        .filter(|h| !h.collided && h.pos.y < pos.y && pos.y - h.pos.y < DANGER_BAND)
        .min_by(|a, b| (a.pos.x - pos.x).abs().total_cmp(&(b.pos.x - pos.x).abs()));

    let target_x = if let Some(heart) = sim.pickups().first() {
        heart.pos.x
    } else if let Some(threat) = threat {
        if threat.pos.x >= pos.x { pos.x - width } else { pos.x + width }
    } else if let Some(lowest) = sim.hostiles().iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)) {
        lowest.pos.x
    } else {
        width / 2.0
    };

    let step = (target_x - pos.x).clamp(-AUTOPILOT_STEP, AUTOPILOT_STEP);
    Vec2::new((pos.x + step).clamp(0.0, width), pos.y)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    ensure!(cli.seconds > 0.0, "--seconds must be positive");
    ensure!(cli.fps > 0.0, "--fps must be positive");

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(clock) = cli.spawn_clock {
        config.spawn_clock = clock;
    }

    let mut sim = match cli.seed {
        Some(seed) => Simulation::seeded(config.clone(), seed),
        None => Simulation::new(config.clone()),
    };
    let mut driver = FixedStepDriver::new(&config);

    log::info!(
        "Plane War (headless) starting: {}s at {} fps, {} clock, autopilot {}",
        cli.seconds,
        cli.fps,
        config.spawn_clock.as_str(),
        if cli.autopilot { "on" } else { "off" }
    );

    sim.start();
    let frame_dt = 1.0 / cli.fps;
    let frames = (cli.seconds * cli.fps).ceil() as u64;
    let mut level_ups = 0;
    let mut hearts = 0;

    for _ in 0..frames {
        if cli.autopilot && sim.phase() == GamePhase::Playing {
            let target = autopilot_target(&sim);
            sim.set_player_position(target);
        }

        let events = driver.advance(&mut sim, frame_dt);
        let mut cleared = false;
        for event in &events {
            match event {
                GameEvent::LevelUp { .. } => level_ups += 1,
                GameEvent::PickupCollected { .. } => hearts += 1,
                GameEvent::GameOver { score } => log::info!("Shot down with score {}", score),
                GameEvent::Cleared => cleared = true,
                _ => {}
            }
        }
        if cleared {
            break;
        }
    }

    // The run summary survives game over; entities do not
    let snapshot = sim.snapshot();
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        println!("{json}");
    } else {
        println!("phase:        {:?}", snapshot.phase);
        println!("survived:     {:.1}s", snapshot.player.survival_time);
        println!("score:        {}", snapshot.player.score);
        println!("level:        {} ({} level ups)", snapshot.player.level, level_ups);
        println!("speed tier:   {}", snapshot.player.speed_tier);
        println!(
            "health:       {:.0}/{:.0} ({} hearts)",
            snapshot.player.health, snapshot.max_health, hearts
        );
    }

    Ok(())
}
