//! On-screen indicators
//!
//! Score and distance are refreshed after every simulation step; the four
//! gesture badges after every classified camera frame. The DOM side is a thin
//! sink over `HudSnapshot`/`GestureBadges`.

use crate::sim::{GameState, InputState};

/// Text fields shown in the HUD
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: String,
    pub distance: String,
    pub fps: Option<String>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState, fps: Option<u32>) -> Self {
        Self {
            score: state.score.to_string(),
            distance: format!("{} m", state.distance),
            fps: fps.map(|f| f.to_string()),
        }
    }
}

/// Rolling FPS over the last 60 displayed frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms) and return the current estimate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample is the one we will overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Element ids of the gesture badges, in display order
pub const BADGE_IDS: [&str; 4] = ["gesture-left", "gesture-right", "gesture-jump", "gesture-stop"];

/// Lit/unlit state of the four gesture badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureBadges {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub stop: bool,
}

impl GestureBadges {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.left,
            right: input.right,
            jump: input.jump,
            stop: input.stop,
        }
    }

    /// (element id, active) pairs matching `BADGE_IDS`
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            (BADGE_IDS[0], self.left),
            (BADGE_IDS[1], self.right),
            (BADGE_IDS[2], self.jump),
            (BADGE_IDS[3], self.stop),
        ]
    }
}

#[cfg(target_arch = "wasm32")]
pub mod dom {
    //! DOM writers for the HUD

    use super::{GestureBadges, HudSnapshot};

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    /// Write score, distance and (optionally) FPS
    pub fn apply_snapshot(snapshot: &HudSnapshot) {
        let Some(document) = document() else {
            return;
        };

        if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.score));
        }
        if let Some(el) = document.query_selector("#hud-distance .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.distance));
        }
        if let Some(el) = document.get_element_by_id("hud-fps") {
            match &snapshot.fps {
                Some(fps) => {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(fps));
                    }
                }
                None => {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }
    }

    /// Toggle the `active` class on each gesture badge
    pub fn apply_badges(badges: &GestureBadges) {
        let Some(document) = document() else {
            return;
        };
        for (id, active) in badges.entries() {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("active", active);
            }
        }
    }

    pub fn hide_loading() {
        if let Some(loading) = document().and_then(|d| d.get_element_by_id("loading")) {
            let _ = loading.set_attribute("class", "hidden");
        }
    }

    /// Show a fatal startup error in place of the game
    pub fn show_fatal(message: &str) {
        hide_loading();
        let Some(document) = document() else {
            return;
        };
        if let Some(el) = document.get_element_by_id("fatal-error") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_formats() {
        let mut state = GameState::new(1);
        state.score = 12;
        state.distance = 345;
        let snap = HudSnapshot::from_state(&state, Some(59));
        assert_eq!(snap.score, "12");
        assert_eq!(snap.distance, "345 m");
        assert_eq!(snap.fps.as_deref(), Some("59"));
        assert_eq!(HudSnapshot::from_state(&state, None).fps, None);
    }

    #[test]
    fn test_fps_needs_full_window() {
        let mut counter = FpsCounter::default();
        for i in 1..60 {
            assert_eq!(counter.record(i as f64 * 16.0), 0);
        }
        // 60 samples spaced 20 ms apart span 59 intervals
        let mut counter = FpsCounter::default();
        let mut fps = 0;
        for i in 1..=120 {
            fps = counter.record(i as f64 * 20.0);
        }
        assert_eq!(fps, 50);
        assert_eq!(counter.fps(), 50);
    }

    #[test]
    fn test_badges_mirror_input() {
        let input = InputState {
            right: true,
            jump: true,
            ..Default::default()
        };
        let badges = GestureBadges::from_input(&input);
        let lit: Vec<&str> = badges
            .entries()
            .iter()
            .filter(|(_, on)| *on)
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(lit, vec!["gesture-right", "gesture-jump"]);
    }
}
