//! Gesture Runner - an endless runner steered by webcam hand gestures
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, collisions)
//! - `gesture`: Hand landmark parsing and gesture classification
//! - `renderer`: WebGPU rendering pipeline and follow camera
//! - `platform`: Browser glue (hand tracking bridge, viewport, query string)
//! - `tuning`: Data-driven game balance
//! - `hud`: On-screen score, distance and gesture indicators

pub mod error;
pub mod gesture;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StartupError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the optional fixed-step loop (60 Hz,
    /// the display rate the per-frame tuning values were balanced for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Visual platform thickness (collision only uses the top surface band)
    pub const PLATFORM_HEIGHT: f32 = 1.0;
    /// Visual platform depth along z
    pub const PLATFORM_DEPTH: f32 = 4.0;
    /// Player cube half size (visual)
    pub const PLAYER_HALF_SIZE: f32 = 0.5;
    /// Coin radius (visual)
    pub const COIN_RADIUS: f32 = 0.4;
    /// Hazard radius (visual)
    pub const HAZARD_RADIUS: f32 = 0.6;
}
