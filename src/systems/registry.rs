//! BodyRegistry - fixed, index-stable storage for glyph bodies
//!
//! No logic lives here. Bodies are spawned once below the screen and are
//! then only mutated in place by the world and the interaction controller.

use glam::Vec3;
use rand::Rng;

use crate::core::random::{centered, SimRng};
use crate::domain::{Body, BodyTransform, SimConfig};

pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    /// Empty registry (asset loading produced nothing)
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Spawn `count` bodies at random off-screen positions
    pub fn spawn(count: usize, config: &SimConfig, rng: &mut SimRng) -> Self {
        let mut bodies = Vec::with_capacity(count);
        for id in 0..count {
            let x = centered(rng, config.spawn_spread_x);
            let y = config.spawn_floor_y - rng.gen::<f32>() * config.spawn_depth_y;
            let z = centered(rng, config.spawn_spread_z);
            bodies.push(Body::new(
                id,
                Vec3::new(x, y, z),
                config.body_mass,
                config.linear_damping,
                config.angular_damping,
            ));
        }
        Self { bodies }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn transforms(&self) -> impl Iterator<Item = BodyTransform> + '_ {
        self.bodies.iter().map(Body::transform)
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
