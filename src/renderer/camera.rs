//! Follow camera and viewport math
//!
//! The camera looks down the -z axis at the z = 0 gameplay plane from a fixed
//! distance, trailing the player with a horizontal lead and a smoothed height.

use glam::Vec2;

/// Canvas size in CSS pixels and back-buffer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub logical: (f32, f32),
    pub physical: (u32, u32),
    pub aspect: f32,
}

impl Viewport {
    /// Viewport for a canvas of `client_w x client_h` CSS pixels
    ///
    /// `pixel_scale` is the device pixel ratio times the quality scale.
    /// Dimensions never drop to zero so the surface stays configurable.
    pub fn new(client_w: f32, client_h: f32, pixel_scale: f32) -> Self {
        let logical = (client_w.max(1.0), client_h.max(1.0));
        let physical = (
            ((logical.0 * pixel_scale).round() as u32).max(1),
            ((logical.1 * pixel_scale).round() as u32).max(1),
        );
        Self {
            logical,
            physical,
            aspect: logical.0 / logical.1,
        }
    }
}

/// Perspective camera trailing the runner
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// Point on the z = 0 plane at the center of the screen
    pub pos: Vec2,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Distance from the camera to the z = 0 plane
    pub distance: f32,
    /// Width / height
    pub aspect: f32,
    /// How far ahead of the player the camera looks
    pub lead: f32,
    /// How far above the player the camera looks
    pub height_offset: f32,
    /// Fraction of the vertical gap closed per frame
    pub smoothing: f32,
}

impl FollowCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            fov_y: 60f32.to_radians(),
            distance: 18.0,
            aspect,
            lead: 6.0,
            height_offset: 2.0,
            smoothing: 0.1,
        }
    }

    /// Jump straight to the framing for `player`
    pub fn snap_to(&mut self, player: Vec2) {
        self.pos = Vec2::new(player.x + self.lead, player.y + self.height_offset);
    }

    /// Advance one frame toward the framing for `player`
    pub fn follow(&mut self, player: Vec2) {
        self.pos.x = player.x + self.lead;
        let target_y = player.y + self.height_offset;
        self.pos.y += (target_y - self.pos.y) * self.smoothing;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Half the visible height of the z = 0 plane
    pub fn half_height(&self) -> f32 {
        self.distance * (self.fov_y / 2.0).tan()
    }

    /// Half the visible width and height of the z = 0 plane
    pub fn half_extents(&self) -> Vec2 {
        let h = self.half_height();
        Vec2::new(h * self.aspect, h)
    }

    /// Perspective scale of a point at depth `z` relative to the z = 0 plane
    pub fn depth_scale(&self, z: f32) -> f32 {
        self.distance / (self.distance - z)
    }

    /// Whether a horizontal span overlaps the visible range (with margin)
    pub fn sees_span(&self, min_x: f32, max_x: f32, margin: f32) -> bool {
        let half_w = self.half_extents().x + margin;
        max_x >= self.pos.x - half_w && min_x <= self.pos.x + half_w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scales_back_buffer() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.physical, (1600, 1200));
        assert!((vp.aspect - 800.0 / 600.0).abs() < 1e-6);

        let vp = Viewport::new(1000.0, 500.0, 0.75);
        assert_eq!(vp.physical, (750, 375));
    }

    #[test]
    fn test_viewport_never_zero() {
        let vp = Viewport::new(0.0, 0.0, 1.0);
        assert_eq!(vp.physical, (1, 1));
        assert_eq!(vp.aspect, 1.0);
    }

    #[test]
    fn test_follow_leads_and_smooths() {
        let mut cam = FollowCamera::new(16.0 / 9.0);
        cam.snap_to(Vec2::new(0.0, 0.0));
        assert_eq!(cam.pos, Vec2::new(6.0, 2.0));

        cam.follow(Vec2::new(10.0, 10.0));
        assert_eq!(cam.pos.x, 16.0);
        // Closes 10% of the 10 unit gap
        assert!((cam.pos.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_half_extents_follow_aspect() {
        let mut cam = FollowCamera::new(1.0);
        let h = cam.half_height();
        assert!((h - 18.0 * (30f32.to_radians()).tan()).abs() < 1e-4);
        cam.set_aspect(2.0);
        assert!((cam.half_extents().x - 2.0 * h).abs() < 1e-4);
        cam.set_aspect(0.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_depth_scale() {
        let cam = FollowCamera::new(1.0);
        assert_eq!(cam.depth_scale(0.0), 1.0);
        assert!(cam.depth_scale(2.0) > 1.0);
        assert!(cam.depth_scale(-2.0) < 1.0);
    }

    #[test]
    fn test_sees_span() {
        let mut cam = FollowCamera::new(1.0);
        cam.snap_to(Vec2::ZERO);
        let half_w = cam.half_extents().x;
        assert!(cam.sees_span(0.0, 1.0, 0.0));
        assert!(!cam.sees_span(6.0 + half_w + 1.0, 6.0 + half_w + 2.0, 0.0));
        assert!(cam.sees_span(6.0 + half_w + 1.0, 6.0 + half_w + 2.0, 2.0));
    }
}
