use wasm_bindgen::prelude::*;

use crate::core::random;
use crate::domain::{BodyTransform, PointerKind, PointerSample, Ray, SimConfig, ViewportGeometry};
use crate::systems::{HitTest, SphereHitTest};

use super::tick_stats::TickStats;
use super::SimulationCore;

/// Hit test answered by a JS callback: `(Float32Array[ox,oy,oz,dx,dy,dz]) => index | undefined`
struct JsHitTest<'a> {
    callback: &'a js_sys::Function,
}

impl HitTest for JsHitTest<'_> {
    fn nearest_hit(&mut self, ray: &Ray, _transforms: &[BodyTransform]) -> Option<usize> {
        let packed = [
            ray.origin.x,
            ray.origin.y,
            ray.origin.z,
            ray.direction.x,
            ray.direction.y,
            ray.direction.z,
        ];
        let arg = js_sys::Float32Array::from(&packed[..]);
        let result = match self.callback.call1(&JsValue::NULL, &arg) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = ?err, "hit test callback threw");
                return None;
            }
        };
        let index = result.as_f64()?;
        (index.is_finite() && index >= 0.0).then_some(index as usize)
    }
}

#[wasm_bindgen]
pub struct Simulation {
    core: SimulationCore,
    hit_callback: Option<js_sys::Function>,
    pick_radius: f32,
}

fn rng_for(seed: Option<u32>) -> random::SimRng {
    match seed {
        Some(seed) => random::seeded(u64::from(seed)),
        None => random::from_entropy(),
    }
}

#[wasm_bindgen]
impl Simulation {
    /// Create a simulation with the default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(body_count: u32, seed: Option<u32>) -> Self {
        Self::with_config(body_count as usize, SimConfig::default(), seed)
    }

    /// Create a simulation from a JSON config (missing fields use defaults)
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(body_count: u32, json: String, seed: Option<u32>) -> Result<Simulation, JsValue> {
        let config = SimConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(body_count as usize, config, seed))
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool { self.core.visible() }

    /// Index of the held body, or -1
    #[wasm_bindgen(getter)]
    pub fn captured_body(&self) -> i32 {
        self.core.captured().map_or(-1, |i| i as i32)
    }

    pub fn is_free(&self, index: u32) -> bool {
        self.core.bodies().get(index as usize).is_some_and(|b| b.is_free)
    }

    /// Update canvas size and camera (call on resize)
    pub fn set_viewport(&mut self, width_px: f32, height_px: f32, fov_deg: f32, aspect: f32, camera_distance: f32) {
        self.core.set_viewport(ViewportGeometry { width_px, height_px, fov_deg, aspect, camera_distance });
    }

    /// Route picking through the render bridge
    pub fn set_hit_test(&mut self, callback: js_sys::Function) {
        self.hit_callback = Some(callback);
    }

    /// Fall back to bounding-sphere picking
    pub fn clear_hit_test(&mut self) {
        self.hit_callback = None;
    }

    /// Advance one frame. `dt` in seconds (clamped to 0.1).
    pub fn tick(&mut self, dt: f32, scroll_fraction: f32) {
        let viewport = *self.core.viewport();
        match &self.hit_callback {
            Some(callback) => {
                let mut hit = JsHitTest { callback };
                self.core.tick(dt, scroll_fraction, viewport, &[], &mut hit);
            }
            None => {
                let mut hit = SphereHitTest { radius: self.pick_radius };
                self.core.tick(dt, scroll_fraction, viewport, &[], &mut hit);
            }
        }
    }

    /// Returns true while a body is held (host should preventDefault)
    pub fn pointer_down(&mut self, x: f32, y: f32, touch: bool, time_ms: f64) -> bool {
        self.pointer(PointerKind::Down, x, y, touch, time_ms)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, touch: bool, time_ms: f64) -> bool {
        self.pointer(PointerKind::Move, x, y, touch, time_ms)
    }

    pub fn pointer_up(&mut self, time_ms: f64) {
        self.pointer(PointerKind::Up, 0.0, 0.0, false, time_ms);
    }

    /// Pointer left the tracking area: release without a nudge
    pub fn pointer_cancel(&mut self, time_ms: f64) {
        self.pointer(PointerKind::Cancel, 0.0, 0.0, false, time_ms);
    }

    /// Pointer to the flat transform buffer (7 floats per body)
    pub fn transforms_ptr(&self) -> *const f32 {
        self.core.transforms_ptr()
    }

    pub fn transforms_len(&self) -> usize {
        self.core.transforms_buffer().len()
    }

    pub fn tick_stats(&self) -> TickStats {
        self.core.stats()
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    pub fn snapshot_json(&self) -> String {
        self.core.snapshot_json()
    }
}

impl Simulation {
    pub fn with_config(body_count: usize, config: SimConfig, seed: Option<u32>) -> Self {
        let pick_radius = config.pick_radius;
        Self {
            core: SimulationCore::new(body_count, config, rng_for(seed)),
            hit_callback: None,
            pick_radius,
        }
    }

    fn pointer(&mut self, kind: PointerKind, x: f32, y: f32, touch: bool, time_ms: f64) -> bool {
        let mut sample = PointerSample::new(kind, x, y, time_ms);
        if touch {
            sample = sample.touch();
        }
        let response = match &self.hit_callback {
            Some(callback) => self.core.pointer(&sample, &mut JsHitTest { callback }),
            None => self.core.pointer(&sample, &mut SphereHitTest { radius: self.pick_radius }),
        };
        response.captured
    }
}
