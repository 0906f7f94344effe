//! World lifecycle: eviction of objects left behind the player

use super::state::World;

/// Drop every object that ended more than `cleanup_distance` behind the player
///
/// Platforms are judged by their far edge, coins and hazards by their center.
/// Returns how many objects were removed.
pub fn cleanup(world: &mut World, player_x: f32, cleanup_distance: f32) -> usize {
    let cleanup_x = player_x - cleanup_distance;
    let before = world.object_count();

    world.platforms.retain(|p| p.far_edge() >= cleanup_x);
    world.coins.retain(|c| c.pos.x >= cleanup_x);
    world.hazards.retain(|h| h.pos.x >= cleanup_x);

    before - world.object_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Hazard, Platform};
    use glam::Vec2;

    fn world_with(xs: &[(f32, f32)]) -> World {
        let mut world = World::new();
        for &(x, w) in xs {
            let id = world.next_entity_id();
            world.platforms.push(Platform {
                id,
                pos: Vec2::new(x, 0.0),
                width: w,
            });
            let id = world.next_entity_id();
            world.coins.push(Coin {
                id,
                pos: Vec2::new(x, 2.0),
            });
            let id = world.next_entity_id();
            world.hazards.push(Hazard {
                id,
                pos: Vec2::new(x, 1.0),
                phase: 0.0,
            });
        }
        world
    }

    #[test]
    fn test_platform_kept_while_far_edge_in_range() {
        // cleanup_x = 70; platform at 65 w=12 has far edge 71
        let mut world = world_with(&[(65.0, 12.0)]);
        let removed = cleanup(&mut world, 100.0, 30.0);
        assert_eq!(world.platforms.len(), 1);
        // Its coin and hazard sit at x=65 < 70
        assert!(world.coins.is_empty());
        assert!(world.hazards.is_empty());
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_evicts_everything_behind() {
        let mut world = world_with(&[(0.0, 10.0), (20.0, 10.0), (90.0, 10.0)]);
        let removed = cleanup(&mut world, 100.0, 30.0);
        assert_eq!(removed, 6);
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].pos.x, 90.0);
        for p in &world.platforms {
            assert!(p.far_edge() >= 70.0);
        }
        for c in &world.coins {
            assert!(c.pos.x >= 70.0);
        }
    }

    #[test]
    fn test_cleanup_preserves_creation_order() {
        let mut world = world_with(&[(0.0, 4.0), (80.0, 4.0), (85.0, 4.0), (95.0, 4.0)]);
        cleanup(&mut world, 100.0, 30.0);
        let xs: Vec<f32> = world.platforms.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![80.0, 85.0, 95.0]);
    }

    #[test]
    fn test_nothing_to_remove() {
        let mut world = world_with(&[(50.0, 10.0)]);
        assert_eq!(cleanup(&mut world, 10.0, 30.0), 0);
        assert_eq!(world.object_count(), 3);
    }
}
