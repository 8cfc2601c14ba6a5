use crate::core::random::SimRng;
use crate::domain::{SimConfig, ViewportGeometry, TRANSFORM_STRIDE};
use crate::systems::{BodyRegistry, InteractionController, PhysicsWorld};

use super::tick_stats::TickStats;
use super::SimulationCore;

pub(super) fn create_simulation_core(body_count: usize, config: SimConfig, mut rng: SimRng) -> SimulationCore {
    let bodies = BodyRegistry::spawn(body_count, &config, &mut rng);
    let world = PhysicsWorld::new(&config);

    let mut core = SimulationCore {
        bodies,
        world,
        interaction: InteractionController::new(),
        rng,
        viewport: ViewportGeometry::default(),
        frame: 0,
        visible: false,
        transforms: vec![0.0; body_count * TRANSFORM_STRIDE],
        stats: TickStats::default(),
        config,
    };
    // Proxies can be placed before the first tick
    core.refresh_transforms();
    tracing::debug!(bodies = body_count, "simulation created");
    core
}
