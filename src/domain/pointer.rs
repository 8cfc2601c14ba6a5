//! Pointer samples and picking rays

use glam::Vec3;

use super::viewport::ViewportGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer left the tracking area mid-gesture
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOrigin {
    Mouse,
    Touch,
}

/// One pointer event in device pixels, stamped with the host clock (ms)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub kind: PointerKind,
    pub origin: PointerOrigin,
    pub x: f32,
    pub y: f32,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(kind: PointerKind, x: f32, y: f32, time_ms: f64) -> Self {
        Self { kind, origin: PointerOrigin::Mouse, x, y, time_ms }
    }

    pub fn touch(mut self) -> Self {
        self.origin = PointerOrigin::Touch;
        self
    }
}

/// Ray from the camera through a point on the screen. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

const PARALLEL_EPSILON: f32 = 1e-6;

impl Ray {
    /// Unproject an NDC point through the perspective camera
    pub fn from_ndc(viewport: &ViewportGeometry, ndc_x: f32, ndc_y: f32) -> Self {
        let half_h = (viewport.fov_deg.to_radians() / 2.0).tan();
        let half_w = half_h * viewport.aspect;
        let direction = Vec3::new(ndc_x * half_w, ndc_y * half_h, -1.0).normalize_or_zero();
        Self { origin: viewport.camera_position(), direction }
    }

    /// Ray for a pixel-space pointer position
    pub fn from_pixels(viewport: &ViewportGeometry, x: f32, y: f32) -> Option<Self> {
        let (nx, ny) = viewport.to_ndc(x, y)?;
        Some(Self::from_ndc(viewport, nx, ny))
    }

    /// Intersection with the plane z = `plane_z`.
    /// `None` when the ray runs parallel to the plane.
    pub fn project_to_plane(&self, plane_z: f32) -> Option<Vec3> {
        if self.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.direction.z;
        let point = self.origin + self.direction * t;
        point.is_finite().then_some(point)
    }

    /// Distance along the ray to the nearest point of a sphere, if it hits
    pub fn sphere_hit(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let near = -b - sq;
        let far = -b + sq;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(0.0)
        } else {
            None
        }
    }
}
