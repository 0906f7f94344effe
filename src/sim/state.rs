//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::worldgen::seed_world;
use crate::tuning::Tuning;

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position in the x/y plane (z is always 0)
    pub pos: Vec2,
    /// Velocity in units per frame
    pub vel: Vec2,
    /// Supported by a platform this frame
    pub grounded: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }
}

/// A walkable platform (box, collision uses only its top band)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Rightmost x of the platform
    #[inline]
    pub fn far_edge(&self) -> f32 {
        self.pos.x + self.half_width()
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

/// A hazard; touching it resets the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    /// Visual phase offset so neighbouring hazards do not pulse in sync
    pub phase: f32,
}

/// Why the player was put back on a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Hazard { hazard_id: u32 },
    FellOut,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChunkGenerated { platform_id: u32, frontier: f32 },
    CoinCollected { coin_id: u32, score: u64 },
    Jumped,
    Landed { platform_id: u32 },
    Reset { cause: ResetCause, pos: Vec2 },
    Evicted { count: usize },
}

/// All generated geometry plus the generation frontier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Platforms in creation order
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub hazards: Vec<Hazard>,
    /// Rightmost generated x; never decreases
    pub frontier: f32,
    /// Height of the most recently generated platform
    pub last_platform_y: f32,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of tracked objects of every kind
    pub fn object_count(&self) -> usize {
        self.platforms.len() + self.coins.len() + self.hazards.len()
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub player: Player,
    pub world: World,
    /// Coins picked up this run
    pub score: u64,
    /// floor of the furthest x reached
    pub distance: u64,
    /// Furthest x reached
    pub max_x: f32,
    /// Simulation frame counter
    pub frame: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub rng: Box<dyn RandomSource>,
}

impl GameState {
    /// Create a new run with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(tuning, Box::new(Pcg32::seed_from_u64(seed)))
    }

    /// Create a new run drawing world randomness from `rng`
    pub fn with_rng(tuning: Tuning, rng: Box<dyn RandomSource>) -> Self {
        let start = Vec2::new(
            0.0,
            tuning.generation.start_platform_y + tuning.physics.stand_height,
        );
        let mut state = Self {
            tuning,
            player: Player::new(start),
            world: World::new(),
            score: 0,
            distance: 0,
            max_x: start.x,
            frame: 0,
            events: Vec::new(),
            rng,
        };
        seed_world(&mut state.world, &state.tuning, state.rng.as_mut());
        state
    }
}
