use crate::domain::{is_visible, PointerSample, ViewportGeometry};
use crate::systems::{HitTest, ModeController};

use super::{commands, SimulationCore, TickClock, MAX_DT};

/// Clamp a host frame delta into `[0, MAX_DT]`; NaN and negatives become 0
#[inline]
pub(super) fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, MAX_DT)
    }
}

pub(super) fn tick<H: HitTest + ?Sized>(
    sim: &mut SimulationCore,
    dt: f32,
    scroll_fraction: f32,
    viewport: ViewportGeometry,
    events: &[PointerSample],
    hit_test: &mut H,
) {
    let clock = TickClock::begin();
    let dt = clamp_dt(dt);

    // Extent is recomputed every tick so live resizes take effect
    sim.viewport = viewport;
    let extent = viewport.visible_extent();

    for sample in events {
        commands::pointer(sim, sample, hit_test);
    }

    let visible = is_visible(scroll_fraction, sim.config.visibility_threshold);
    if visible != sim.visible {
        tracing::debug!(visible, scroll_fraction, "visibility changed");
    }
    sim.visible = visible;

    let counts = ModeController::apply(
        &sim.config,
        &mut sim.world,
        &mut sim.bodies,
        visible,
        &extent,
        sim.interaction.captured(),
    );

    sim.world.step(&mut sim.bodies, dt);
    sim.refresh_transforms();
    sim.frame += 1;

    sim.stats.record_regimes(counts);
    sim.stats.dt = dt;
    sim.stats.visible = visible;
    sim.stats.events = events.len() as u32;
    clock.finish(&mut sim.stats);
    tracing::trace!(frame = sim.frame, dt, ?counts, "tick");
}
