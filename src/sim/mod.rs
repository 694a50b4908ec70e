//! Simulation module
//!
//! All gameplay logic lives here:
//! - No rendering, input or timer dependencies
//! - Randomness only through the injected RNG
//! - Removal by filtering, never by index while iterating

pub mod collision;
pub mod motion;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::CollisionReport;
pub use state::{EntityStore, GameEvent, GamePhase, Hostile, Pickup, PlayerState, Projectile};
pub use tick::{Simulation, Snapshot, spawn_position};
