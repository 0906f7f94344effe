//! Hand landmark storage and parsing
//!
//! The hand tracker delivers 21 normalized points per hand as a flat
//! `[x, y, z, x, y, z, ...]` buffer. Image y grows downward.

use thiserror::Error;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const LANDMARK_COUNT: usize = 21;
/// Floats per landmark in the flat buffer
pub const LANDMARK_STRIDE: usize = 3;

/// (fingertip, PIP joint) for the four non-thumb fingers
pub const FINGER_TIPS_AND_PIPS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// A single landmark point (x, y normalized to [0, 1], z relative depth)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub points: [HandLandmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    #[inline]
    pub fn get(&self, index: usize) -> HandLandmark {
        self.points[index]
    }
}

/// A malformed frame from the hand tracker
#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("landmark buffer holds {len} floats, expected at least {expected} for {hands} hand(s)")]
    ShortBuffer {
        len: usize,
        expected: usize,
        hands: usize,
    },
    #[error("landmark {index} of hand {hand} is not finite")]
    NonFinite { hand: usize, index: usize },
}

/// Parse the first hand of a flat tracker buffer
///
/// `num_hands == 0` is the normal "no hand in view" case and yields `None`.
/// Only the first hand is used; the tracker is configured for one anyway.
pub fn parse_first_hand(flat: &[f32], num_hands: usize) -> Result<Option<HandLandmarks>, LandmarkError> {
    if num_hands == 0 {
        return Ok(None);
    }
    let expected = num_hands * LANDMARK_COUNT * LANDMARK_STRIDE;
    if flat.len() < expected {
        return Err(LandmarkError::ShortBuffer {
            len: flat.len(),
            expected,
            hands: num_hands,
        });
    }

    let mut points = [HandLandmark::default(); LANDMARK_COUNT];
    for (i, point) in points.iter_mut().enumerate() {
        let base = i * LANDMARK_STRIDE;
        let (x, y, z) = (flat[base], flat[base + 1], flat[base + 2]);
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(LandmarkError::NonFinite { hand: 0, index: i });
        }
        *point = HandLandmark { x, y, z };
    }
    Ok(Some(HandLandmarks { points }))
}
