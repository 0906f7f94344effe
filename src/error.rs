//! Error types
//!
//! Startup failures are fatal and shown to the player. Config failures fall
//! back to defaults. Per-frame gesture failures live in `gesture::landmarks`.

use thiserror::Error;

/// Fatal failures while bringing up the game
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no browser window available")]
    NoWindow,
    #[error("no document attached to the window")]
    NoDocument,
    #[error("missing page element #{0}")]
    MissingElement(String),
    #[error("element #{0} has the wrong type")]
    WrongElementType(String),
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("no WebGPU/WebGL adapter available: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("hand tracking failed to start: {0}")]
    HandTracking(String),
}

impl StartupError {
    /// Short message for the on-page error banner
    pub fn user_message(&self) -> String {
        match self {
            StartupError::Adapter(_)
            | StartupError::Device(_)
            | StartupError::Surface(_)
            | StartupError::NoSurfaceFormat => {
                format!("Graphics unavailable: {self}. Try a browser with WebGPU or WebGL2.")
            }
            StartupError::HandTracking(_) => {
                format!("Camera unavailable: {self}. Allow camera access and reload.")
            }
            _ => format!("Startup failed: {self}"),
        }
    }
}

/// Invalid tuning overrides
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid range for {name}: min {min} > max {max}")]
    Range { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be within [{lo}, {hi}], got {value}")]
    OutOfBounds {
        name: &'static str,
        value: f32,
        lo: f32,
        hi: f32,
    },
}
