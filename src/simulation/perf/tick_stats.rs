use wasm_bindgen::prelude::*;

use crate::systems::RegimeCounts;

/// What the last tick did
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct TickStats {
    pub(super) tick_ms: f64,
    pub(super) dt: f32,
    pub(super) visible: bool,
    pub(super) hidden: u32,
    pub(super) settle: u32,
    pub(super) free: u32,
    pub(super) captured: u32,
    pub(super) events: u32,
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn dt(&self) -> f32 { self.dt }
    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool { self.visible }
    #[wasm_bindgen(getter)]
    pub fn hidden(&self) -> u32 { self.hidden }
    #[wasm_bindgen(getter)]
    pub fn settle(&self) -> u32 { self.settle }
    #[wasm_bindgen(getter)]
    pub fn free(&self) -> u32 { self.free }
    #[wasm_bindgen(getter)]
    pub fn captured(&self) -> u32 { self.captured }
    #[wasm_bindgen(getter)]
    pub fn events(&self) -> u32 { self.events }
}

impl TickStats {
    pub(crate) fn record_regimes(&mut self, counts: RegimeCounts) {
        self.hidden = counts.hidden as u32;
        self.settle = counts.settle as u32;
        self.free = counts.free as u32;
        self.captured = counts.captured as u32;
    }
}
