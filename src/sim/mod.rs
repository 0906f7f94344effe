//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - World randomness only through `RandomSource`
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod lifecycle;
pub mod random;
pub mod state;
pub mod summary;
pub mod tick;
pub mod worldgen;

pub use autopilot::autopilot_input;
pub use collision::{in_contact, land_on, platform_catches};
pub use lifecycle::cleanup;
pub use random::{RandomSource, ScriptedSource};
pub use state::{Coin, GameEvent, GameState, Hazard, Platform, Player, ResetCause, World};
pub use summary::{RunSummary, run_autopilot};
pub use tick::{InputState, reset_player, reset_target, tick};
pub use worldgen::{generate_chunk, needs_chunk, seed_world};
