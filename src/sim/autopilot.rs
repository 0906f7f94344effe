//! Demo mode: synthesize input from the world instead of the camera
//!
//! Runs right and jumps when the current platform is about to end or a hazard
//! is close ahead. Good enough for attract mode and headless runs; it does
//! not plan across gaps.

use super::state::GameState;
use super::tick::InputState;

/// How close to the platform edge (units) before jumping
const EDGE_LOOKAHEAD: f32 = 1.0;
/// How far ahead (units) a hazard triggers a jump
const HAZARD_LOOKAHEAD: f32 = 2.6;

/// Input for the next frame
pub fn autopilot_input(state: &GameState) -> InputState {
    let player = &state.player;
    let physics = &state.tuning.physics;
    let mut input = InputState {
        right: true,
        ..InputState::NEUTRAL
    };
    if !player.grounded {
        return input;
    }

    let support = state.world.platforms.iter().find(|p| {
        (player.pos.x - p.pos.x).abs() < p.half_width() + physics.landing_padding
            && (player.pos.y - p.pos.y - physics.stand_height).abs() < 0.01
    });
    let near_edge = support
        .map(|p| p.far_edge() - player.pos.x < EDGE_LOOKAHEAD)
        .unwrap_or(false);

    let hazard_ahead = state.world.hazards.iter().any(|h| {
        let dx = h.pos.x - player.pos.x;
        dx > 0.0 && dx < HAZARD_LOOKAHEAD && (h.pos.y - player.pos.y).abs() < 1.5
    });

    input.jump = near_edge || hazard_ahead;
    input
}
