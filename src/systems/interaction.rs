//! Interaction controller - grab, drag, throw and tap-nudge
//!
//! A single pointer drives a small state machine:
//!
//! ```text
//! Idle --down+hit--> Down --move--> Dragging
//!   ^                 |               |
//!   +------up---------+------up-------+
//! ```
//!
//! While a body is held its velocity and position are written directly
//! (kinematic override) and the mode controller leaves it alone.

use glam::Vec3;
use tracing::{debug, warn};

use crate::core::random::{centered, SimRng};
use crate::domain::{BodyTransform, PointerKind, PointerSample, Ray, SimConfig, ViewportGeometry};

use super::registry::BodyRegistry;
use super::world::PhysicsWorld;

/// Bodies are dragged across this plane (the one the camera faces)
pub const DRAG_PLANE_Z: f32 = 0.0;

/// Picks the glyph under a ray. The render bridge owns the real meshes, so
/// it usually answers; [`SphereHitTest`] is the fallback.
pub trait HitTest {
    fn nearest_hit(&mut self, ray: &Ray, transforms: &[BodyTransform]) -> Option<usize>;
}

impl<F> HitTest for F
where
    F: FnMut(&Ray, &[BodyTransform]) -> Option<usize>,
{
    fn nearest_hit(&mut self, ray: &Ray, transforms: &[BodyTransform]) -> Option<usize> {
        self(ray, transforms)
    }
}

/// Bounding-sphere picking against body positions
#[derive(Clone, Copy, Debug)]
pub struct SphereHitTest {
    pub radius: f32,
}

impl HitTest for SphereHitTest {
    fn nearest_hit(&mut self, ray: &Ray, transforms: &[BodyTransform]) -> Option<usize> {
        transforms
            .iter()
            .enumerate()
            .filter_map(|(i, t)| ray.sphere_hit(t.position, self.radius).map(|d| (i, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

/// Pointer state machine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerPhase {
    Idle,
    /// Pressed on a body, not moved yet
    Down { body: usize, last: Vec3, down_ms: f64 },
    /// Pressed and moved at least once
    Dragging { body: usize, last: Vec3, down_ms: f64 },
}

impl PointerPhase {
    pub fn captured(&self) -> Option<usize> {
        match *self {
            PointerPhase::Idle => None,
            PointerPhase::Down { body, .. } | PointerPhase::Dragging { body, .. } => Some(body),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerPhase::Dragging { .. })
    }
}

/// How a gesture ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Short press without movement: random nudge
    Tap,
    /// Body keeps its last drag velocity
    Throw,
}

/// Returned from every pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerResponse {
    /// A body is held after this event (host should suppress page scroll)
    pub captured: bool,
}

/// Everything a pointer event may touch
pub struct InteractionContext<'a> {
    pub config: &'a SimConfig,
    pub viewport: &'a ViewportGeometry,
    pub world: &'a mut PhysicsWorld,
    pub bodies: &'a mut BodyRegistry,
    pub rng: &'a mut SimRng,
}

pub struct InteractionController {
    phase: PointerPhase,
    last_release: Option<Release>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self { phase: PointerPhase::Idle, last_release: None }
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn captured(&self) -> Option<usize> {
        self.phase.captured()
    }

    /// Outcome of the most recent release, if any
    pub fn last_release(&self) -> Option<Release> {
        self.last_release
    }

    /// Dispatch one pointer sample
    pub fn handle<H: HitTest + ?Sized>(
        &mut self,
        sample: &PointerSample,
        ctx: &mut InteractionContext<'_>,
        hit_test: &mut H,
    ) -> PointerResponse {
        match (self.phase, sample.kind) {
            (PointerPhase::Idle, PointerKind::Down) => self.on_down(sample, ctx, hit_test),
            (PointerPhase::Idle, _) => {}
            // single pointer: a second press while holding is ignored
            (_, PointerKind::Down) => {}
            (_, PointerKind::Move) => self.on_move(sample, ctx),
            (_, PointerKind::Up) => self.on_up(sample, ctx, true),
            (_, PointerKind::Cancel) => self.on_up(sample, ctx, false),
        }
        PointerResponse { captured: self.phase.captured().is_some() }
    }

    fn project(sample: &PointerSample, viewport: &ViewportGeometry) -> Option<Vec3> {
        Ray::from_pixels(viewport, sample.x, sample.y)?.project_to_plane(DRAG_PLANE_Z)
    }

    fn on_down<H: HitTest + ?Sized>(&mut self, sample: &PointerSample, ctx: &mut InteractionContext<'_>, hit_test: &mut H) {
        let Some(ray) = Ray::from_pixels(ctx.viewport, sample.x, sample.y) else {
            return;
        };
        let transforms: Vec<BodyTransform> = ctx.bodies.transforms().collect();
        let Some(body) = hit_test.nearest_hit(&ray, &transforms) else {
            return;
        };
        if body >= ctx.bodies.len() {
            warn!(body, count = ctx.bodies.len(), "hit test returned an unknown body");
            return;
        }
        let Some(last) = ray.project_to_plane(DRAG_PLANE_Z) else {
            return;
        };

        if let Some(b) = ctx.bodies.get_mut(body) {
            b.mark_free();
        }
        self.phase = PointerPhase::Down { body, last, down_ms: sample.time_ms };
        debug!(body, origin = ?sample.origin, "captured");
    }

    fn on_move(&mut self, sample: &PointerSample, ctx: &mut InteractionContext<'_>) {
        let (body, last, down_ms) = match self.phase {
            PointerPhase::Idle => return,
            PointerPhase::Down { body, last, down_ms } | PointerPhase::Dragging { body, last, down_ms } => {
                (body, last, down_ms)
            }
        };
        // Degenerate projection: keep the previous state
        let Some(point) = Self::project(sample, ctx.viewport) else {
            return;
        };

        let delta = point - last;
        let max = ctx.config.max_velocity;
        let rate = ctx.config.drag_sample_rate;
        let velocity = Vec3::new(
            (delta.x * rate).clamp(-max, max),
            (delta.y * rate).clamp(-max, max),
            0.0,
        );
        ctx.world.set_velocity(ctx.bodies, body, velocity);
        ctx.world.set_position(ctx.bodies, body, point);

        self.phase = PointerPhase::Dragging { body, last: point, down_ms };
    }

    fn on_up(&mut self, sample: &PointerSample, ctx: &mut InteractionContext<'_>, allow_tap: bool) {
        let Some(body) = self.phase.captured() else {
            return;
        };
        let down_ms = match self.phase {
            PointerPhase::Down { down_ms, .. } | PointerPhase::Dragging { down_ms, .. } => down_ms,
            PointerPhase::Idle => sample.time_ms,
        };
        let duration = sample.time_ms - down_ms;
        let tap = allow_tap && !self.phase.is_dragging() && duration < ctx.config.tap_max_ms;

        let release = if tap {
            let nudge = ctx.config.nudge_force;
            let impulse = Vec3::new(centered(ctx.rng, nudge), centered(ctx.rng, nudge), 0.0);
            let spin = Vec3::new(0.0, 0.0, centered(ctx.rng, ctx.config.nudge_spin));
            ctx.world.set_velocity(ctx.bodies, body, Vec3::ZERO);
            ctx.world.apply_impulse(ctx.bodies, body, impulse);
            if ctx.config.nudge_spin > 0.0 {
                ctx.world.apply_angular_impulse(ctx.bodies, body, spin);
            }
            Release::Tap
        } else {
            Release::Throw
        };

        debug!(body, duration, ?release, "released");
        self.last_release = Some(release);
        self.phase = PointerPhase::Idle;
    }

    /// Drop any capture without touching the body (host teardown)
    pub fn reset(&mut self) {
        self.phase = PointerPhase::Idle;
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}
