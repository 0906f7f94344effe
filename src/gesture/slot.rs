//! Latest-wins hand-off of `InputState` between the camera callback and the
//! render loop
//!
//! Both callbacks run on the browser's single thread, so a shared `Cell` is
//! enough: the classifier publishes whole values, the frame loop copies the
//! newest one at the start of each step. Older, unread values are dropped.

use std::cell::Cell;
use std::rc::Rc;

use crate::sim::InputState;

/// Shared single-writer/single-reader input snapshot
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    inner: Rc<SlotInner>,
}

#[derive(Debug, Default)]
struct SlotInner {
    latest: Cell<InputState>,
    published: Cell<u64>,
}

impl InputSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current input with a freshly classified one
    pub fn publish(&self, input: InputState) {
        self.inner.latest.set(input);
        self.inner.published.set(self.inner.published.get() + 1);
    }

    /// Publish "no input" (no hand, or a frame the tracker failed on)
    pub fn clear(&self) {
        self.publish(InputState::NEUTRAL);
    }

    /// The most recently published input
    pub fn latest(&self) -> InputState {
        self.inner.latest.get()
    }

    /// Number of values published so far
    pub fn published_count(&self) -> u64 {
        self.inner.published.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_neutral() {
        let slot = InputSlot::new();
        assert_eq!(slot.latest(), InputState::NEUTRAL);
        assert_eq!(slot.published_count(), 0);
    }

    #[test]
    fn test_last_writer_wins_across_clones() {
        let writer = InputSlot::new();
        let reader = writer.clone();

        writer.publish(InputState {
            left: true,
            ..Default::default()
        });
        writer.publish(InputState {
            jump: true,
            ..Default::default()
        });

        let input = reader.latest();
        assert!(input.jump);
        assert!(!input.left);
        assert_eq!(reader.published_count(), 2);
    }

    #[test]
    fn test_clear_publishes_neutral() {
        let slot = InputSlot::new();
        slot.publish(InputState {
            stop: true,
            ..Default::default()
        });
        slot.clear();
        assert!(slot.latest().is_neutral());
    }
}
