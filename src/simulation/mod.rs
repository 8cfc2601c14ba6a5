//! Simulation - the owned aggregate behind the glyph animation
//!
//! One `SimulationCore` holds the body registry, the physics world, the
//! interaction state and the random source. The host drives it with one
//! `tick` per display refresh; pointer callbacks go through `pointer` on the
//! same thread, so body fields only ever have one writer.
//!
//! Pipeline per tick: pointer events -> mode forces (non-captured bodies)
//! -> integrate + clamp -> refresh transform buffer.

use crate::core::random::SimRng;
use crate::domain::{PointerSample, SimConfig, ViewportGeometry};
use crate::systems::{BodyRegistry, HitTest, InteractionController, PhysicsWorld, PointerResponse};

#[path = "perf/tick_clock.rs"]
mod tick_clock;
#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "init/init.rs"]
mod init;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Simulation;
pub use tick_stats::TickStats;

use tick_clock::TickClock;

/// Largest time step a tick will integrate (stalled frames are cut short)
pub const MAX_DT: f32 = 0.1;

pub struct SimulationCore {
    config: SimConfig,
    bodies: BodyRegistry,
    world: PhysicsWorld,
    interaction: InteractionController,
    rng: SimRng,
    viewport: ViewportGeometry,

    // State
    frame: u64,
    visible: bool,

    /// Flat px py pz qx qy qz qw per body, read by JS
    transforms: Vec<f32>,
    stats: TickStats,
}

impl SimulationCore {
    /// Spawn `body_count` glyph bodies below the screen
    pub fn new(body_count: usize, config: SimConfig, rng: SimRng) -> Self {
        init::create_simulation_core(body_count, config, rng)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Visibility decided on the last tick
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn viewport(&self) -> &ViewportGeometry {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportGeometry) {
        self.viewport = viewport;
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn captured(&self) -> Option<usize> {
        self.interaction.captured()
    }

    pub fn stats(&self) -> TickStats {
        self.stats.clone()
    }

    /// Advance one display frame.
    ///
    /// `dt` is clamped into `[0, MAX_DT]`; `events` are applied in order
    /// before forces are assigned.
    pub fn tick<H: HitTest + ?Sized>(
        &mut self,
        dt: f32,
        scroll_fraction: f32,
        viewport: ViewportGeometry,
        events: &[PointerSample],
        hit_test: &mut H,
    ) {
        step::tick(self, dt, scroll_fraction, viewport, events, hit_test);
    }

    /// Apply one pointer sample right away, using the last viewport
    pub fn pointer<H: HitTest + ?Sized>(&mut self, sample: &PointerSample, hit_test: &mut H) -> PointerResponse {
        commands::pointer(self, sample, hit_test)
    }

    /// Drop any capture (host is tearing down its listeners)
    pub fn release_capture(&mut self) {
        commands::release_capture(self)
    }

    pub fn transforms_buffer(&self) -> &[f32] {
        &self.transforms
    }

    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.as_ptr()
    }

    /// JSON dump of every body, for host-side debugging
    pub fn snapshot_json(&self) -> String {
        render_extract::snapshot_json(self)
    }

    fn refresh_transforms(&mut self) {
        render_extract::refresh_transforms(self);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
