use serde::Serialize;

use crate::domain::{Body, TRANSFORM_STRIDE};

use super::SimulationCore;

pub(super) fn refresh_transforms(sim: &mut SimulationCore) {
    let needed = sim.bodies.len() * TRANSFORM_STRIDE;
    if sim.transforms.len() != needed {
        sim.transforms.resize(needed, 0.0);
    }
    for (chunk, transform) in sim.transforms.chunks_exact_mut(TRANSFORM_STRIDE).zip(sim.bodies.transforms()) {
        transform.write_to(chunk);
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    frame: u64,
    visible: bool,
    captured: Option<usize>,
    bodies: &'a [Body],
}

pub(super) fn snapshot_json(sim: &SimulationCore) -> String {
    let snapshot = Snapshot {
        frame: sim.frame,
        visible: sim.visible,
        captured: sim.captured(),
        bodies: sim.bodies.as_slice(),
    };
    serde_json::to_string(&snapshot).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "snapshot serialization failed");
        String::from("{}")
    })
}
