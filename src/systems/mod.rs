//! Systems: body storage, integration, force regimes and pointer interaction

pub mod interaction;
pub mod modes;
pub mod registry;
pub mod world;

pub use interaction::{HitTest, InteractionContext, InteractionController, PointerPhase, PointerResponse, Release, SphereHitTest};
pub use modes::{spread_target_x, ModeController, Regime, RegimeCounts};
pub use registry::BodyRegistry;
pub use world::PhysicsWorld;
