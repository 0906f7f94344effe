//! Per-frame simulation step
//!
//! One call advances the runner by exactly one displayed frame: input,
//! integration, landing, hazards, coins, fall-out, generation, cleanup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{in_contact, land_on, platform_catches};
use super::lifecycle::cleanup;
use super::state::{GameEvent, GameState, ResetCause};
use super::worldgen::{generate_chunk, needs_chunk};

/// Discrete control intent for one frame
///
/// Always replaced as a whole by the gesture classifier, never patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub stop: bool,
}

impl InputState {
    /// No gesture at all
    pub const NEUTRAL: InputState = InputState {
        left: false,
        right: false,
        jump: false,
        stop: false,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &InputState) {
    state.events.clear();
    state.frame += 1;

    let physics = &state.tuning.physics;
    let player = &mut state.player;

    // Horizontal: stop wins, then direction, otherwise drift to rest
    if input.stop {
        player.vel.x = 0.0;
    } else if input.left {
        player.vel.x = -physics.move_speed;
    } else if input.right {
        player.vel.x = physics.move_speed;
    } else {
        player.vel.x *= physics.drift_damping;
    }

    if input.jump && player.grounded {
        player.vel.y = physics.jump_impulse;
        player.grounded = false;
        state.events.push(GameEvent::Jumped);
    }

    player.vel.y += physics.gravity;
    player.pos += player.vel;

    // Grounded is recomputed from scratch every frame
    let was_grounded = player.grounded;
    player.grounded = false;
    let mut landed_on = None;
    for platform in &state.world.platforms {
        if platform_catches(player, platform, physics) {
            land_on(player, platform, physics);
            landed_on = Some(platform.id);
        }
    }
    if let (false, Some(platform_id)) = (was_grounded, landed_on) {
        state.events.push(GameEvent::Landed { platform_id });
    }

    let hit = state
        .world
        .hazards
        .iter()
        .find(|h| in_contact(state.player.pos, h.pos, physics.contact_radius))
        .map(|h| h.id);
    if let Some(hazard_id) = hit {
        reset_player(state, ResetCause::Hazard { hazard_id });
    }

    collect_coins(state);

    if state.player.pos.y < state.tuning.physics.fall_limit {
        reset_player(state, ResetCause::FellOut);
    }

    if state.player.pos.x > state.max_x {
        state.max_x = state.player.pos.x;
        state.distance = state.distance.max(state.max_x.floor().max(0.0) as u64);
    }

    let g = &state.tuning.generation;
    if needs_chunk(&state.world, state.player.pos.x, g) {
        let platform_id = generate_chunk(&mut state.world, g, state.rng.as_mut());
        state.events.push(GameEvent::ChunkGenerated {
            platform_id,
            frontier: state.world.frontier,
        });
    }

    let evicted = cleanup(&mut state.world, state.player.pos.x, g.cleanup_distance);
    if evicted > 0 {
        state.events.push(GameEvent::Evicted { count: evicted });
    }
}

/// Remove every coin touching the player and add it to the score
fn collect_coins(state: &mut GameState) {
    let pos = state.player.pos;
    let radius = state.tuning.physics.contact_radius;
    let mut collected = Vec::new();
    state.world.coins.retain(|coin| {
        if in_contact(pos, coin.pos, radius) {
            collected.push(coin.id);
            false
        } else {
            true
        }
    });
    for coin_id in collected {
        state.score += 1;
        state.events.push(GameEvent::CoinCollected {
            coin_id,
            score: state.score,
        });
    }
}

/// Where the player is put back: above the last platform (in creation order)
/// whose center lies left of the player, or above the origin
pub fn reset_target(state: &GameState) -> Vec2 {
    let player_x = state.player.pos.x;
    let mut base = Vec2::ZERO;
    for platform in &state.world.platforms {
        if platform.pos.x < player_x {
            base = platform.pos;
        }
    }
    base + Vec2::new(0.0, state.tuning.physics.reset_height)
}

/// Put the player back above the most recently passed platform
///
/// Score and distance are run statistics and survive resets.
pub fn reset_player(state: &mut GameState, cause: ResetCause) {
    let pos = reset_target(state);
    log::debug!("Reset ({:?}) from {:?} -> {:?}", cause, state.player.pos, pos);
    state.player.pos = pos;
    state.player.vel = Vec2::ZERO;
    state.player.grounded = false;
    state.events.push(GameEvent::Reset { cause, pos });
}
