//! Procedural world generation
//!
//! The world is a line of platforms extending forever to the right. Each
//! chunk is one platform plus an optional coin and an optional hazard, placed
//! past the current frontier.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Coin, Hazard, Platform, World};
use crate::tuning::{GenerationTuning, Span, Tuning};

/// Visual phase offset for a hazard, spread by the golden ratio
fn hazard_phase(id: u32) -> f32 {
    ((id as f32) * 0.618_034).fract() * std::f32::consts::TAU
}

/// Place the long flat start platform and the initial run of chunks
pub fn seed_world(world: &mut World, tuning: &Tuning, rng: &mut dyn RandomSource) {
    let g = &tuning.generation;
    let id = world.next_entity_id();
    let start = Platform {
        id,
        pos: Vec2::new(0.0, g.start_platform_y),
        width: g.start_platform_width,
    };
    world.frontier = start.far_edge();
    world.last_platform_y = start.pos.y;
    world.platforms.push(start);

    for _ in 0..g.seed_chunks {
        generate_chunk(world, g, rng);
    }
    log::info!(
        "World seeded: {} platforms, frontier at {:.1}",
        world.platforms.len(),
        world.frontier
    );
}

/// Whether the player is close enough to the frontier to need a new chunk
#[inline]
pub fn needs_chunk(world: &World, player_x: f32, g: &GenerationTuning) -> bool {
    player_x > world.frontier - g.threshold
}

/// Append one chunk past the frontier and return the new platform's id
///
/// Draw order is fixed: gap, width, height step, coin roll, coin jitter
/// (only when spawned), hazard roll, hazard jitter (only when spawned).
pub fn generate_chunk(world: &mut World, g: &GenerationTuning, rng: &mut dyn RandomSource) -> u32 {
    let gap = rng.range(g.gap);
    let width = rng.range(g.width);
    let y = (world.last_platform_y + rng.range(g.y_step)).clamp(g.y_bounds.min, g.y_bounds.max);
    let x = world.frontier + gap + width / 2.0;

    let platform_id = world.next_entity_id();
    world.platforms.push(Platform {
        id: platform_id,
        pos: Vec2::new(x, y),
        width,
    });

    let jitter = width * g.jitter;
    if rng.chance(g.coin_chance) {
        let dx = rng.range(Span::new(-jitter, jitter));
        let id = world.next_entity_id();
        world.coins.push(Coin {
            id,
            pos: Vec2::new(x + dx, y + g.coin_height),
        });
    }
    if rng.chance(g.hazard_chance) {
        let dx = rng.range(Span::new(-jitter, jitter));
        let id = world.next_entity_id();
        world.hazards.push(Hazard {
            id,
            pos: Vec2::new(x + dx, y + g.hazard_height),
            phase: hazard_phase(id),
        });
    }

    world.frontier = x + width / 2.0;
    world.last_platform_y = y;
    log::debug!(
        "Chunk {}: x={:.2} y={:.2} w={:.2} gap={:.2}, frontier -> {:.2}",
        platform_id,
        x,
        y,
        width,
        gap,
        world.frontier
    );
    platform_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_world() -> World {
        let mut world = World::new();
        world.frontier = 0.0;
        world.last_platform_y = 0.0;
        world
    }

    #[test]
    fn test_minimum_draws_place_platform() {
        // gap=3, width=6, no height change, no coin, no hazard
        let mut world = empty_world();
        let mut rng = ScriptedSource::new([0.0, 0.0, 0.5, 0.99, 0.99], 0.0);
        let g = GenerationTuning::default();

        generate_chunk(&mut world, &g, &mut rng);

        let p = world.platforms.last().unwrap();
        assert!((p.pos.x - 6.0).abs() < 1e-6);
        assert!((p.width - 6.0).abs() < 1e-6);
        assert!((world.frontier - 9.0).abs() < 1e-6);
        assert!(world.coins.is_empty());
        assert!(world.hazards.is_empty());
    }

    #[test]
    fn test_height_clamped() {
        let g = GenerationTuning::default();

        let mut world = empty_world();
        world.last_platform_y = 4.5;
        // y step draws +2 (unit just under 1.0)
        let mut rng = ScriptedSource::new([0.0, 0.0, 0.999_999, 0.99, 0.99], 0.0);
        generate_chunk(&mut world, &g, &mut rng);
        assert_eq!(world.platforms[0].pos.y, 5.0);

        let mut world = empty_world();
        world.last_platform_y = -2.5;
        let mut rng = ScriptedSource::new([0.0, 0.0, 0.0, 0.99, 0.99], 0.0);
        generate_chunk(&mut world, &g, &mut rng);
        assert_eq!(world.platforms[0].pos.y, -3.0);
    }

    #[test]
    fn test_coin_and_hazard_jitter_bounds() {
        let g = GenerationTuning::default();
        let mut world = empty_world();
        // gap 3, width 10 (unit 0.5), flat, coin at +30% jitter, hazard at -30%
        let mut rng = ScriptedSource::new([0.0, 0.5, 0.5, 0.0, 1.0, 0.0, 0.0], 0.0);
        generate_chunk(&mut world, &g, &mut rng);

        let p = &world.platforms[0];
        assert!((p.pos.x - 8.0).abs() < 1e-5);
        let coin = &world.coins[0];
        assert!((coin.pos.x - (8.0 + 3.0)).abs() < 1e-5);
        assert!((coin.pos.y - (p.pos.y + 1.2)).abs() < 1e-6);
        let hazard = &world.hazards[0];
        assert!((hazard.pos.x - (8.0 - 3.0)).abs() < 1e-5);
        assert!((hazard.pos.y - (p.pos.y + 0.9)).abs() < 1e-6);
    }

    #[test]
    fn test_frontier_strictly_increases() {
        let g = GenerationTuning::default();
        let mut world = empty_world();
        let mut rng = Pcg32::seed_from_u64(42);
        let min_advance = g.gap.min + g.width.min / 2.0;
        for _ in 0..200 {
            let before = world.frontier;
            generate_chunk(&mut world, &g, &mut rng);
            assert!(world.frontier >= before + min_advance);
        }
    }

    #[test]
    fn test_seed_world_layout() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let mut rng = Pcg32::seed_from_u64(1);
        seed_world(&mut world, &tuning, &mut rng);

        assert_eq!(world.platforms.len(), 1 + tuning.generation.seed_chunks as usize);
        let start = &world.platforms[0];
        assert_eq!(start.width, tuning.generation.start_platform_width);
        assert_eq!(start.pos.y, tuning.generation.start_platform_y);
        // Platforms are laid out left to right without overlap
        for pair in world.platforms.windows(2) {
            assert!(pair[1].pos.x - pair[1].half_width() > pair[0].far_edge());
        }
        assert_eq!(world.frontier, world.platforms.last().unwrap().far_edge());
    }

    #[test]
    fn test_needs_chunk_threshold() {
        let g = GenerationTuning::default();
        let mut world = empty_world();
        world.frontier = 100.0;
        assert!(!needs_chunk(&world, 60.0, &g));
        assert!(needs_chunk(&world, 60.5, &g));
    }
}
