//! Random source for spawn positions and tap nudges
//!
//! Everything random in the engine draws from one `SimRng` owned by the
//! simulation, so a fixed seed replays a run exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seedable generator used across the engine
pub type SimRng = Pcg32;

/// Deterministic generator for tests and replays
pub fn seeded(seed: u64) -> SimRng {
    Pcg32::seed_from_u64(seed)
}

/// Unseeded generator for production (browser crypto on wasm32)
pub fn from_entropy() -> SimRng {
    Pcg32::from_entropy()
}

/// Uniform sample in `[-extent/2, extent/2)`
#[inline]
pub fn centered(rng: &mut SimRng, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}
