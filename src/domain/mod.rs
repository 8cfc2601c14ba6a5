//! Domain data: configuration, bodies, viewport and pointer input

pub mod body;
pub mod config;
pub mod pointer;
pub mod viewport;

pub use body::{Body, BodyTransform, TRANSFORM_STRIDE};
pub use config::{ConfigError, SimConfig};
pub use pointer::{PointerKind, PointerOrigin, PointerSample, Ray};
pub use viewport::{is_visible, scroll_fraction, ViewportGeometry, VisibleExtent};
