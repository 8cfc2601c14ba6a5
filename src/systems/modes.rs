//! Mode controller - picks a force regime per body every tick
//!
//! The regime is recomputed from scratch each tick from the visibility
//! signal and the body's `is_free` latch; nothing else carries over.

use glam::Vec3;

use crate::domain::{SimConfig, VisibleExtent};

use super::registry::BodyRegistry;
use super::world::PhysicsWorld;

const HIDDEN_LATERAL_GAIN: f32 = 0.1;
const HIDDEN_VERTICAL_SCALE: f32 = 4.0;
/// Lateral pull toward the row slot, shared by x and z
const SETTLE_LATERAL_GAIN: f32 = 0.2;
/// Share of the visible width the settled row spans
const SPREAD_FILL: f32 = 0.95;
/// Settle line height above the bottom edge, in glyph sizes
const SETTLE_LIFT: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// Page not scrolled far enough: sink below the viewport
    HiddenAttract,
    /// Visible and never touched: line up along the bottom edge
    SettleAttract,
    /// Visible and touched at least once: weak pull to the origin
    FreeDrift,
}

impl Regime {
    pub fn select(visible: bool, is_free: bool) -> Self {
        match (visible, is_free) {
            (false, _) => Regime::HiddenAttract,
            (true, false) => Regime::SettleAttract,
            (true, true) => Regime::FreeDrift,
        }
    }
}

/// Bodies per regime after one `apply`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegimeCounts {
    pub hidden: usize,
    pub settle: usize,
    pub free: usize,
    pub captured: usize,
}

/// x of body `index` when `count` bodies spread across `width`
pub fn spread_target_x(index: usize, count: usize, width: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    (index as f32 / (count - 1) as f32 - 0.5) * (width * SPREAD_FILL)
}

/// Force and damping a body gets under a regime
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeOutput {
    pub force: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

pub struct ModeController;

impl ModeController {
    /// Force law for one body. `index`/`count` place it in the settled row.
    pub fn evaluate(
        config: &SimConfig,
        regime: Regime,
        position: Vec3,
        index: usize,
        count: usize,
        extent: &VisibleExtent,
    ) -> RegimeOutput {
        match regime {
            Regime::HiddenAttract => {
                let target_y = extent.bottom() - config.hidden_drop;
                let vertical = config.hide_force * HIDDEN_VERTICAL_SCALE;
                RegimeOutput {
                    force: Vec3::new(
                        -position.x * HIDDEN_LATERAL_GAIN,
                        (target_y - position.y) * vertical,
                        -position.z * HIDDEN_LATERAL_GAIN,
                    ),
                    linear_damping: config.hidden_damping,
                    angular_damping: config.hidden_damping,
                }
            }
            Regime::SettleAttract => {
                let target_x = spread_target_x(index, count, extent.width);
                let target_y = extent.bottom() + config.glyph_size * SETTLE_LIFT;
                RegimeOutput {
                    force: Vec3::new(
                        (target_x - position.x) * SETTLE_LATERAL_GAIN,
                        (target_y - position.y) * config.spring_force,
                        -position.z * SETTLE_LATERAL_GAIN,
                    ),
                    linear_damping: config.linear_damping,
                    angular_damping: config.angular_damping,
                }
            }
            Regime::FreeDrift => RegimeOutput {
                force: -position * config.centering_force,
                linear_damping: config.linear_damping,
                angular_damping: config.angular_damping,
            },
        }
    }

    /// Assign damping and forces to every body except `captured`
    pub fn apply(
        config: &SimConfig,
        world: &mut PhysicsWorld,
        bodies: &mut BodyRegistry,
        visible: bool,
        extent: &VisibleExtent,
        captured: Option<usize>,
    ) -> RegimeCounts {
        let count = bodies.len();
        let mut counts = RegimeCounts::default();

        for index in 0..count {
            if captured == Some(index) {
                counts.captured += 1;
                continue;
            }
            let Some(body) = bodies.get_mut(index) else {
                continue;
            };

            let regime = Regime::select(visible, body.is_free);
            match regime {
                Regime::HiddenAttract => counts.hidden += 1,
                Regime::SettleAttract => counts.settle += 1,
                Regime::FreeDrift => counts.free += 1,
            }

            let out = Self::evaluate(config, regime, body.position, index, count, extent);
            body.linear_damping = out.linear_damping;
            body.angular_damping = out.angular_damping;
            world.apply_force(bodies, index, out.force);
        }

        counts
    }
}
