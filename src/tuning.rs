//! Data-driven game balance
//!
//! Every constant the simulation and the gesture classifier read lives here.
//! Values are per displayed frame (the runner has no timestep scaling).
//! Partial JSON overrides are accepted; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive-exclusive uniform draw range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max || !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::Range {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Player motion and collision constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Horizontal speed while left/right is held (units/frame)
    pub move_speed: f32,
    /// Horizontal velocity multiplier when no direction or stop is held
    pub drift_damping: f32,
    /// Vertical velocity set by a grounded jump
    pub jump_impulse: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Extra horizontal reach when testing platform landings
    pub landing_padding: f32,
    /// Landing band above platform center (exclusive on both ends)
    pub landing_band: Span,
    /// Player height above platform center while standing
    pub stand_height: f32,
    /// Distance at which coins are picked up and hazards hit
    pub contact_radius: f32,
    /// Below this y the player is reset
    pub fall_limit: f32,
    /// Height above the reset platform (or origin) after a reset
    pub reset_height: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            move_speed: 0.18,
            drift_damping: 0.85,
            jump_impulse: 0.38,
            gravity: -0.015,
            landing_padding: 0.5,
            landing_band: Span::new(0.5, 1.5),
            stand_height: 1.0,
            contact_radius: 1.2,
            fall_limit: -12.0,
            reset_height: 2.0,
        }
    }
}

/// Procedural world generation and cleanup constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    pub gap: Span,
    pub width: Span,
    /// Height change relative to the previous platform
    pub y_step: Span,
    /// Allowed platform heights
    pub y_bounds: Span,
    pub coin_chance: f32,
    pub hazard_chance: f32,
    /// Horizontal jitter of coins/hazards as a fraction of platform width
    pub jitter: f32,
    /// Coin height above its platform
    pub coin_height: f32,
    /// Hazard height above its platform
    pub hazard_height: f32,
    /// Generate when the player is within this distance of the frontier
    pub threshold: f32,
    /// Objects this far behind the player are evicted
    pub cleanup_distance: f32,
    /// Chunks generated at startup after the start platform
    pub seed_chunks: u32,
    pub start_platform_width: f32,
    pub start_platform_y: f32,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            gap: Span::new(3.0, 7.0),
            width: Span::new(6.0, 14.0),
            y_step: Span::new(-2.0, 2.0),
            y_bounds: Span::new(-3.0, 5.0),
            coin_chance: 0.7,
            hazard_chance: 0.4,
            jitter: 0.3,
            coin_height: 1.2,
            hazard_height: 0.9,
            threshold: 40.0,
            cleanup_distance: 30.0,
            seed_chunks: 5,
            start_platform_width: 15.0,
            start_platform_y: -1.0,
        }
    }
}

/// Landmark-geometry margins for gesture classification (normalized units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Index tip must be this far above its base for a jump
    pub jump_margin: f32,
    /// Index tip must be this far sideways from its base for left/right
    pub horizontal_margin: f32,
    /// Camera preview is mirrored (tip left of base means "right")
    pub mirrored: bool,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            jump_margin: 0.12,
            horizontal_margin: 0.08,
            mirrored: true,
        }
    }
}

/// Options handed to the hand-tracking library
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingTuning {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub camera_width: u32,
    pub camera_height: u32,
}

impl Default for TrackingTuning {
    fn default() -> Self {
        Self {
            max_num_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            camera_width: 640,
            camera_height: 480,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub generation: GenerationTuning,
    pub gesture: GestureTuning,
    pub tracking: TrackingTuning,
}

impl Tuning {
    /// Parse (possibly partial) JSON overrides and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generation;
        g.gap.validate("generation.gap")?;
        g.width.validate("generation.width")?;
        g.y_step.validate("generation.y_step")?;
        g.y_bounds.validate("generation.y_bounds")?;
        self.physics
            .landing_band
            .validate("physics.landing_band")?;

        // Frontier must strictly advance on every chunk
        if g.gap.min < 0.0 {
            return Err(ConfigError::OutOfBounds {
                name: "generation.gap.min",
                value: g.gap.min,
                lo: 0.0,
                hi: f32::MAX,
            });
        }
        if g.width.min <= 0.0 {
            return Err(ConfigError::OutOfBounds {
                name: "generation.width.min",
                value: g.width.min,
                lo: f32::MIN_POSITIVE,
                hi: f32::MAX,
            });
        }
        unit_interval("generation.coin_chance", g.coin_chance)?;
        unit_interval("generation.hazard_chance", g.hazard_chance)?;
        unit_interval("generation.jitter", g.jitter)?;
        unit_interval("physics.drift_damping", self.physics.drift_damping)?;
        unit_interval("tracking.min_detection_confidence", self.tracking.min_detection_confidence)?;
        unit_interval("tracking.min_tracking_confidence", self.tracking.min_tracking_confidence)?;
        Ok(())
    }

    /// Options object for the hand-tracking bridge
    pub fn tracking_json(&self) -> String {
        serde_json::to_string(&self.tracking).unwrap_or_else(|_| "{}".to_string())
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfBounds {
            name,
            value,
            lo: 0.0,
            hi: 1.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"physics": {"gravity": -0.02}}"#).unwrap();
        assert_eq!(tuning.physics.gravity, -0.02);
        assert_eq!(tuning.physics.jump_impulse, 0.38);
        assert_eq!(tuning.generation.seed_chunks, 5);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Tuning::from_json(r#"{"generation": {"gap": {"min": 8.0, "max": 2.0}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Range { name: "generation.gap", .. }));
    }

    #[test]
    fn test_probability_out_of_bounds_rejected() {
        let err = Tuning::from_json(r#"{"generation": {"coin_chance": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfBounds { .. }));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Tuning::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_tracking_json_round_trips_fields() {
        let json = Tuning::default().tracking_json();
        assert!(json.contains("\"max_num_hands\":1"));
        assert!(json.contains("\"min_detection_confidence\":0.7"));
        assert!(json.contains("\"min_tracking_confidence\":0.7"));
    }

    #[test]
    fn test_negative_gap_names_gap() {
        let err = Tuning::from_json(r#"{"generation": {"gap": {"min": -1.0, "max": 2.0}}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfBounds { name: "generation.gap.min", value, .. } if value == -1.0
        ));
    }

    #[test]
    fn test_zero_width_names_width() {
        let err = Tuning::from_json(r#"{"generation": {"width": {"min": 0.0, "max": 2.0}}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfBounds { name: "generation.width.min", .. }
        ));
    }

    #[test]
    fn test_layout_defaults() {
        let g = GenerationTuning::default();
        assert_eq!(g.coin_height, 1.2);
        assert_eq!(g.hazard_height, 0.9);
        assert_eq!(g.start_platform_width, 15.0);
    }
}
