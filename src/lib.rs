//! Glyphdrift Engine - force-driven glyph animation in WASM
//!
//! A fixed set of rigid bodies (one per rendered glyph) sinks out of view
//! until the page is scrolled to the bottom, then springs up into a row
//! along the bottom edge. Glyphs can be grabbed, dragged and thrown; a
//! quick tap nudges them instead.
//!
//! Architecture:
//! - core/        - logging and random source
//! - domain/      - config, bodies, viewport, pointer input
//! - systems/     - registry, world, modes, interaction
//! - simulation/  - owned aggregate + JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine (info-level console logging)
#[wasm_bindgen]
pub fn init() {
    init_with_log_level("info".to_string());
}

/// Initialize the engine with a log level ("trace" .. "error")
#[wasm_bindgen]
pub fn init_with_log_level(level: String) {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = crate::core::logging::parse_level(&level);
    if crate::core::logging::init_logging(level) {
        tracing::info!(%level, "glyphdrift engine initialized");
    } else {
        web_sys::console::log_1(&"glyphdrift engine already initialized".into());
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// `(scrolled + viewport_height) / content_height`
#[wasm_bindgen]
pub fn scroll_fraction(scrolled: f32, viewport_height: f32, content_height: f32) -> f32 {
    domain::scroll_fraction(scrolled, viewport_height, content_height)
}

// Re-export main types
pub use crate::core::random::SimRng;
pub use domain::{
    Body, BodyTransform, ConfigError, PointerKind, PointerOrigin, PointerSample, Ray, SimConfig,
    ViewportGeometry,
};
pub use simulation::{Simulation, SimulationCore, TickStats, MAX_DT};
pub use systems::{HitTest, PointerPhase, PointerResponse, Regime, Release, SphereHitTest};
