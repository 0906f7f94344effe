//! Gesture input
//!
//! Turns hand-tracker frames into `InputState` values and hands them to the
//! simulation through an `InputSlot`.

pub mod classifier;
pub mod landmarks;
pub mod slot;

pub use classifier::{classify, is_fist};
pub use landmarks::{HandLandmark, HandLandmarks, LandmarkError, parse_first_hand};
pub use slot::InputSlot;

use crate::sim::InputState;
use crate::tuning::GestureTuning;

/// Classify one raw tracker frame
///
/// A malformed frame is reported but still yields neutral input so the game
/// keeps running.
pub fn classify_frame(
    flat: &[f32],
    num_hands: usize,
    tuning: &GestureTuning,
) -> (InputState, Option<LandmarkError>) {
    match parse_first_hand(flat, num_hands) {
        Ok(hand) => (classify(hand.as_ref(), tuning), None),
        Err(e) => (InputState::NEUTRAL, Some(e)),
    }
}
