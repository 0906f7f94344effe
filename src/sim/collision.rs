//! Collision tests for the runner
//!
//! Everything is axis-aligned: platforms only catch a falling player inside a
//! thin band above their center, and coins/hazards are circular contacts.

use glam::Vec2;

use super::state::{Platform, Player};
use crate::tuning::PhysicsTuning;

/// Whether `platform` catches `player` this frame
///
/// The player must be over the platform (half-width plus padding), inside the
/// landing band, and moving downward. Bounds are exclusive, so a player
/// exactly on a band edge is not caught.
pub fn platform_catches(player: &Player, platform: &Platform, physics: &PhysicsTuning) -> bool {
    let dx = (player.pos.x - platform.pos.x).abs();
    let over = dx < platform.half_width() + physics.landing_padding;

    let band = physics.landing_band;
    let rel_y = player.pos.y - platform.pos.y;
    let in_band = rel_y > band.min && rel_y < band.max;

    over && in_band && player.vel.y < 0.0
}

/// Snap the player onto a catching platform
pub fn land_on(player: &mut Player, platform: &Platform, physics: &PhysicsTuning) {
    player.pos.y = platform.pos.y + physics.stand_height;
    player.vel.y = 0.0;
    player.grounded = true;
}

/// Circular contact test in the x/y plane (z is ignored)
#[inline]
pub fn in_contact(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}
