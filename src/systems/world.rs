//! PhysicsWorld - force accumulation and integration for glyph bodies
//!
//! Semi-implicit Euler with per-body exponential damping, followed by a
//! uniform clamp on linear and angular speed. No collisions, no gravity:
//! every motion comes from the forces the mode controller applies or from
//! the interaction controller's kinematic override.

use glam::{Quat, Vec3};
use tracing::warn;

use crate::domain::SimConfig;

use super::registry::BodyRegistry;

pub struct PhysicsWorld {
    /// Ambient gravity, disabled
    gravity: Vec3,
    max_velocity: f32,
    max_angular_velocity: f32,
    /// Bodies teleported since the last step; they skip one integration
    pinned: Vec<usize>,
}

impl PhysicsWorld {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gravity: Vec3::ZERO,
            max_velocity: config.max_velocity,
            max_angular_velocity: config.max_angular_velocity,
            pinned: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.pinned.contains(&index)
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, bodies: &mut BodyRegistry, index: usize, force: Vec3) {
        if !force.is_finite() {
            warn!(index, "dropping non-finite force");
            return;
        }
        match bodies.get_mut(index) {
            Some(body) => body.force += force,
            None => warn!(index, "apply_force on unknown body"),
        }
    }

    /// Instant velocity change of `impulse / mass`
    pub fn apply_impulse(&mut self, bodies: &mut BodyRegistry, index: usize, impulse: Vec3) {
        if let Some(body) = bodies.get_mut(index) {
            body.velocity += impulse / body.mass;
        }
    }

    /// Add spin directly (no inertia tensor; glyphs are treated as unit spheres)
    pub fn apply_angular_impulse(&mut self, bodies: &mut BodyRegistry, index: usize, spin: Vec3) {
        if let Some(body) = bodies.get_mut(index) {
            body.angular_velocity += spin;
        }
    }

    /// Kinematic override: velocity
    pub fn set_velocity(&mut self, bodies: &mut BodyRegistry, index: usize, velocity: Vec3) {
        if let Some(body) = bodies.get_mut(index) {
            body.velocity = velocity;
        }
    }

    /// Kinematic override: teleport. The body skips integration on the next step.
    pub fn set_position(&mut self, bodies: &mut BodyRegistry, index: usize, position: Vec3) {
        if let Some(body) = bodies.get_mut(index) {
            body.position = position;
            body.force = Vec3::ZERO;
            if !self.pinned.contains(&index) {
                self.pinned.push(index);
            }
        }
    }

    /// Advance every body by `dt`.
    ///
    /// A zero (or invalid) step leaves all state as is apart from clearing
    /// accumulated forces.
    pub fn step(&mut self, bodies: &mut BodyRegistry, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            for body in bodies.iter_mut() {
                body.force = Vec3::ZERO;
            }
            return;
        }

        for body in bodies.iter_mut() {
            let pinned = self.pinned.contains(&body.id);

            if !pinned {
                // Velocity first, then position from the new velocity
                let accel = body.force / body.mass + self.gravity;
                body.velocity += accel * dt;
                body.velocity *= (1.0 - body.linear_damping).powf(dt);
                body.position += body.velocity * dt;

                body.angular_velocity *= (1.0 - body.angular_damping).powf(dt);
                let spin = Quat::from_scaled_axis(body.angular_velocity * dt);
                body.orientation = (spin * body.orientation).normalize();
            }

            body.velocity = clamp_length(body.velocity, self.max_velocity);
            body.angular_velocity = clamp_length(body.angular_velocity, self.max_angular_velocity);
            body.force = Vec3::ZERO;
        }

        self.pinned.clear();
    }
}

/// Scale `v` down to `max` length, keeping its direction
#[inline]
fn clamp_length(v: Vec3, max: f32) -> Vec3 {
    let len = v.length();
    if len > max {
        v * (max / len)
    } else {
        v
    }
}
