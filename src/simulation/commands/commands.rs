use crate::domain::PointerSample;
use crate::systems::{HitTest, InteractionContext, PointerResponse};

use super::SimulationCore;

pub(super) fn pointer<H: HitTest + ?Sized>(
    sim: &mut SimulationCore,
    sample: &PointerSample,
    hit_test: &mut H,
) -> PointerResponse {
    let mut ctx = InteractionContext {
        config: &sim.config,
        viewport: &sim.viewport,
        world: &mut sim.world,
        bodies: &mut sim.bodies,
        rng: &mut sim.rng,
    };
    sim.interaction.handle(sample, &mut ctx, hit_test)
}

pub(super) fn release_capture(sim: &mut SimulationCore) {
    if let Some(body) = sim.interaction.captured() {
        tracing::debug!(body, "capture dropped by host");
    }
    sim.interaction.reset();
}
