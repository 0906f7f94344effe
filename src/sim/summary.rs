//! Run statistics gathered from per-tick events

use serde::{Deserialize, Serialize};

use super::autopilot::autopilot_input;
use super::state::{GameEvent, GameState, ResetCause};
use super::tick::tick;
use crate::tuning::Tuning;

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub score: u64,
    pub distance: u64,
    pub jumps: u32,
    pub landings: u32,
    pub hazard_resets: u32,
    pub fall_resets: u32,
    pub chunks: u32,
    pub evicted: usize,
    pub frontier: f32,
    /// Objects still tracked at the end of the run
    pub live_objects: usize,
}

impl RunSummary {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Fold one tick's events into the totals
    pub fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::Landed { .. } => self.landings += 1,
                GameEvent::Reset {
                    cause: ResetCause::Hazard { .. },
                    ..
                } => self.hazard_resets += 1,
                GameEvent::Reset {
                    cause: ResetCause::FellOut,
                    ..
                } => self.fall_resets += 1,
                GameEvent::ChunkGenerated { .. } => self.chunks += 1,
                GameEvent::Evicted { count } => self.evicted += count,
                GameEvent::CoinCollected { .. } => {}
            }
        }
    }

    /// Copy the end-of-run state
    pub fn finish(&mut self, state: &GameState) {
        self.frames = state.frame;
        self.score = state.score;
        self.distance = state.distance;
        self.frontier = state.world.frontier;
        self.live_objects = state.world.object_count();
    }
}

/// Simulate `frames` frames under the autopilot
pub fn run_autopilot(seed: u64, frames: u64, tuning: Tuning) -> RunSummary {
    let mut state = GameState::with_tuning(seed, tuning);
    let mut summary = RunSummary::new(seed);
    for _ in 0..frames {
        let input = autopilot_input(&state);
        tick(&mut state, &input);
        summary.record(&state.events);
    }
    summary.finish(&state);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_kind() {
        let mut summary = RunSummary::new(1);
        summary.record(&[
            GameEvent::Jumped,
            GameEvent::Landed { platform_id: 1 },
            GameEvent::Reset {
                cause: ResetCause::FellOut,
                pos: glam::Vec2::new(0.0, 2.0),
            },
            GameEvent::Reset {
                cause: ResetCause::Hazard { hazard_id: 4 },
                pos: glam::Vec2::new(12.0, 3.5),
            },
            GameEvent::Evicted { count: 3 },
            GameEvent::Evicted { count: 2 },
            GameEvent::ChunkGenerated {
                platform_id: 9,
                frontier: 50.0,
            },
        ]);
        assert_eq!(summary.jumps, 1);
        assert_eq!(summary.landings, 1);
        assert_eq!(summary.fall_resets, 1);
        assert_eq!(summary.hazard_resets, 1);
        assert_eq!(summary.evicted, 5);
        assert_eq!(summary.chunks, 1);
    }

    #[test]
    fn test_headless_run_matches_state() {
        let a = run_autopilot(77, 600, Tuning::default());
        let b = run_autopilot(77, 600, Tuning::default());
        assert_eq!(a, b);
        assert_eq!(a.frames, 600);
        assert!(a.distance > 0);
        assert!(a.live_objects > 0);
    }
}
