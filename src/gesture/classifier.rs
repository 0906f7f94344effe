//! Landmark geometry to control intent
//!
//! Each frame is classified on its own; there is no smoothing or debounce.

use super::landmarks::{FINGER_TIPS_AND_PIPS, HandLandmarks, INDEX_MCP, INDEX_TIP};
use crate::sim::InputState;
use crate::tuning::GestureTuning;

/// True when every fingertip is below (larger y than) its PIP joint
pub fn is_fist(hand: &HandLandmarks) -> bool {
    FINGER_TIPS_AND_PIPS
        .iter()
        .all(|&(tip, pip)| hand.get(tip).y > hand.get(pip).y)
}

/// Classify one frame's hand, or no hand
///
/// A fist means stop and nothing else. Otherwise the index finger drives
/// jump (tip well above its base) and direction (tip well to one side).
pub fn classify(hand: Option<&HandLandmarks>, tuning: &GestureTuning) -> InputState {
    let Some(hand) = hand else {
        return InputState::NEUTRAL;
    };

    if is_fist(hand) {
        return InputState {
            stop: true,
            ..InputState::NEUTRAL
        };
    }

    let tip = hand.get(INDEX_TIP);
    let base = hand.get(INDEX_MCP);

    let jump = base.y - tip.y > tuning.jump_margin;

    let dx = tip.x - base.x;
    let (tip_left, tip_right) = (dx < -tuning.horizontal_margin, dx > tuning.horizontal_margin);
    // The preview is mirrored, so a tip on the image's left is the player's right
    let (left, right) = if tuning.mirrored {
        (tip_right, tip_left)
    } else {
        (tip_left, tip_right)
    };

    InputState {
        left,
        right,
        jump,
        stop: false,
    }
}
