//! Simulation invariants under arbitrary gesture sequences

use gesture_runner::sim::{GameEvent, GameState, InputState, ResetCause, reset_player, tick};
use glam::Vec2;
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, jump, stop)| InputState {
            left,
            right,
            jump,
            stop,
        },
    )
}

/// Mostly-rightward input so runs reach generation and cleanup
fn runner_inputs() -> impl Strategy<Value = Vec<InputState>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(InputState { right: true, ..InputState::NEUTRAL }),
            1 => Just(InputState { right: true, jump: true, ..InputState::NEUTRAL }),
            1 => input_strategy(),
        ],
        1..600,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn score_only_grows_by_collected_coins(seed in any::<u64>(), inputs in runner_inputs()) {
        let mut state = GameState::new(seed);
        for input in &inputs {
            let before = state.score;
            tick(&mut state, input);
            let collected = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
                .count() as u64;
            prop_assert_eq!(state.score, before + collected);
        }
    }

    #[test]
    fn distance_is_floor_of_furthest_x(seed in any::<u64>(), inputs in runner_inputs()) {
        let mut state = GameState::new(seed);
        let mut furthest = state.player.pos.x;
        let mut last_distance = 0;
        for input in &inputs {
            tick(&mut state, input);
            furthest = furthest.max(state.player.pos.x);
            prop_assert!(state.distance >= last_distance);
            prop_assert_eq!(state.distance, furthest.floor().max(0.0) as u64);
            last_distance = state.distance;
        }
    }

    #[test]
    fn frontier_strictly_advances_per_chunk(seed in any::<u64>(), inputs in runner_inputs()) {
        let mut state = GameState::new(seed);
        let mut frontier = state.world.frontier;
        for input in &inputs {
            tick(&mut state, input);
            for event in &state.events {
                if let GameEvent::ChunkGenerated { frontier: new_frontier, .. } = event {
                    prop_assert!(*new_frontier > frontier);
                    frontier = *new_frontier;
                }
            }
            prop_assert_eq!(state.world.frontier, frontier);
        }
    }

    #[test]
    fn nothing_survives_behind_cleanup_line(seed in any::<u64>(), inputs in runner_inputs()) {
        let mut state = GameState::new(seed);
        let distance = state.tuning.generation.cleanup_distance;
        for input in &inputs {
            tick(&mut state, input);
            let cleanup_x = state.player.pos.x - distance;
            prop_assert!(state.world.platforms.iter().all(|p| p.far_edge() >= cleanup_x));
            prop_assert!(state.world.coins.iter().all(|c| c.pos.x >= cleanup_x));
            prop_assert!(state.world.hazards.iter().all(|h| h.pos.x >= cleanup_x));
        }
    }

    #[test]
    fn reset_lands_above_last_platform_behind(seed in any::<u64>(), inputs in runner_inputs()) {
        let mut state = GameState::new(seed);
        for input in &inputs {
            tick(&mut state, input);
        }
        let player_x = state.player.pos.x;
        let behind = state
            .world
            .platforms
            .iter()
            .filter(|p| p.pos.x < player_x)
            .last()
            .map(|p| p.pos)
            .unwrap_or(Vec2::ZERO);

        reset_player(&mut state, ResetCause::FellOut);
        let expected = behind + Vec2::new(0.0, state.tuning.physics.reset_height);
        prop_assert_eq!(state.player.pos, expected);
        prop_assert_eq!(state.player.vel, Vec2::ZERO);
        prop_assert!(!state.player.grounded);
    }
}
