//! Body - one glyph's rigid state
//!
//! Bodies are created once and never destroyed. Their index in the registry
//! is their identity and matches the index of the visual proxy on the JS side.

use glam::{Quat, Vec3};
use serde::Serialize;

/// Rigid body paired 1:1 with a rendered glyph
#[derive(Clone, Debug, Serialize)]
pub struct Body {
    /// Stable index (== proxy index)
    pub id: usize,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    /// Radians per time unit, axis-scaled
    pub angular_velocity: Vec3,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Set on first capture, never cleared
    pub is_free: bool,

    /// Force accumulated this tick (cleared after each step)
    #[serde(skip)]
    pub(crate) force: Vec3,
}

impl Body {
    pub fn new(id: usize, position: Vec3, mass: f32, linear_damping: f32, angular_damping: f32) -> Self {
        Self {
            id,
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            linear_damping,
            angular_damping,
            is_free: false,
            force: Vec3::ZERO,
        }
    }

    /// Force waiting to be integrated
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Latch the free flag (one-way)
    pub fn mark_free(&mut self) {
        self.is_free = true;
    }

    pub fn transform(&self) -> BodyTransform {
        BodyTransform { position: self.position, orientation: self.orientation }
    }
}

/// What the render bridge copies onto a proxy each tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodyTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Floats per body in the flat transform buffer: px py pz qx qy qz qw
pub const TRANSFORM_STRIDE: usize = 7;

impl BodyTransform {
    #[inline]
    pub fn write_to(&self, out: &mut [f32]) {
        out[0] = self.position.x;
        out[1] = self.position.y;
        out[2] = self.position.z;
        out[3] = self.orientation.x;
        out[4] = self.orientation.y;
        out[5] = self.orientation.z;
        out[6] = self.orientation.w;
    }
}
