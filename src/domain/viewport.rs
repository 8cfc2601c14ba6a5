//! Viewport geometry and the scroll visibility signal

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera and canvas description supplied by the host every tick.
///
/// The camera sits on +z at `camera_distance`, looking down -z at the
/// glyph plane z = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub width_px: f32,
    pub height_px: f32,
    /// Vertical field of view, degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub camera_distance: f32,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
            fov_deg: 50.0,
            aspect: 1280.0 / 720.0,
            camera_distance: 20.0,
        }
    }
}

/// World-space size of the glyph plane seen through the camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleExtent {
    pub width: f32,
    pub height: f32,
}

impl VisibleExtent {
    /// y of the bottom edge of the view (the view is centred on the origin)
    #[inline]
    pub fn bottom(&self) -> f32 {
        -self.height / 2.0
    }
}

impl ViewportGeometry {
    pub fn camera_position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_distance)
    }

    /// `height = 2 tan(fov/2) d`, `width = height * aspect`
    pub fn visible_extent(&self) -> VisibleExtent {
        let half_fov = self.fov_deg.to_radians() / 2.0;
        let height = 2.0 * half_fov.tan() * self.camera_distance;
        VisibleExtent { width: height * self.aspect, height }
    }

    /// Device pixels to normalized device coordinates in [-1, 1], y up.
    /// Returns `None` for a zero-sized canvas.
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.width_px <= 0.0 || self.height_px <= 0.0 {
            return None;
        }
        let nx = (x / self.width_px) * 2.0 - 1.0;
        let ny = -((y / self.height_px) * 2.0 - 1.0);
        Some((nx, ny))
    }
}

/// `(scrolled + viewport_height) / content_height`, or 0 for empty content
pub fn scroll_fraction(scrolled: f32, viewport_height: f32, content_height: f32) -> f32 {
    if content_height <= 0.0 {
        return 0.0;
    }
    (scrolled + viewport_height) / content_height
}

/// Glyphs show once the page is scrolled past `threshold`.
/// Strict comparison and no hysteresis: jitter around the threshold flips
/// the signal every tick.
#[inline]
pub fn is_visible(scroll_fraction: f32, threshold: f32) -> bool {
    scroll_fraction > threshold
}
