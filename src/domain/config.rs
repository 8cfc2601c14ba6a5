use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{field}` {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Tuning for the glyph animation. Fixed for the life of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Glyph height in world units
    pub glyph_size: f32,
    /// Linear damping while visible
    pub linear_damping: f32,
    /// Angular damping while visible
    pub angular_damping: f32,
    /// Linear and angular damping while hidden (fast settle)
    pub hidden_damping: f32,
    /// Vertical gain toward the settle line
    pub spring_force: f32,
    /// Vertical gain toward the hide line (multiplied by 4)
    pub hide_force: f32,
    /// Peak nudge impulse on a tap
    pub nudge_force: f32,
    /// Peak spin (rad/s about z) added on a tap; 0 keeps the nudge a pure x/y push
    pub nudge_spin: f32,
    /// Gain pulling free bodies back to the origin
    pub centering_force: f32,
    pub max_velocity: f32,
    pub max_angular_velocity: f32,
    pub body_mass: f32,
    /// Distance below the viewport bottom where hidden glyphs park
    pub hidden_drop: f32,
    /// Scroll fraction above which glyphs are shown (strict `>`)
    pub visibility_threshold: f32,
    /// Releases shorter than this (ms) without movement count as taps
    pub tap_max_ms: f64,
    /// Pointer samples per time unit assumed when turning deltas into velocity
    pub drag_sample_rate: f32,
    /// Bounding sphere radius for the built-in hit test
    pub pick_radius: f32,

    // Spawn box (below the screen)
    pub spawn_spread_x: f32,
    pub spawn_floor_y: f32,
    pub spawn_depth_y: f32,
    pub spawn_spread_z: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            glyph_size: 4.0,
            linear_damping: 0.99,
            angular_damping: 0.99,
            hidden_damping: 0.4,
            spring_force: 1.5,
            hide_force: 1.0,
            nudge_force: 5.0,
            nudge_spin: 0.0,
            centering_force: 0.001,
            max_velocity: 15.0,
            max_angular_velocity: 2.0,
            body_mass: 1.0,
            hidden_drop: 10.0,
            visibility_threshold: 0.85,
            tap_max_ms: 200.0,
            drag_sample_rate: 60.0,
            pick_radius: 2.0,
            spawn_spread_x: 30.0,
            spawn_floor_y: -15.0,
            spawn_depth_y: 10.0,
            spawn_spread_z: 10.0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("glyph_size", self.glyph_size),
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
            ("hidden_damping", self.hidden_damping),
            ("spring_force", self.spring_force),
            ("hide_force", self.hide_force),
            ("nudge_force", self.nudge_force),
            ("nudge_spin", self.nudge_spin),
            ("centering_force", self.centering_force),
            ("max_velocity", self.max_velocity),
            ("max_angular_velocity", self.max_angular_velocity),
            ("body_mass", self.body_mass),
            ("hidden_drop", self.hidden_drop),
            ("visibility_threshold", self.visibility_threshold),
            ("drag_sample_rate", self.drag_sample_rate),
            ("pick_radius", self.pick_radius),
            ("spawn_spread_x", self.spawn_spread_x),
            ("spawn_floor_y", self.spawn_floor_y),
            ("spawn_depth_y", self.spawn_depth_y),
            ("spawn_spread_z", self.spawn_spread_z),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, reason: "must be finite" });
            }
        }
        if !self.tap_max_ms.is_finite() || self.tap_max_ms < 0.0 {
            return Err(ConfigError::Invalid { field: "tap_max_ms", reason: "must be a finite, non-negative duration" });
        }

        let positive = [
            ("body_mass", self.body_mass),
            ("max_velocity", self.max_velocity),
            ("max_angular_velocity", self.max_angular_velocity),
            ("drag_sample_rate", self.drag_sample_rate),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::Invalid { field, reason: "must be positive" });
            }
        }

        let unit = [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
            ("hidden_damping", self.hidden_damping),
            ("visibility_threshold", self.visibility_threshold),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid { field, reason: "must lie in [0, 1]" });
            }
        }

        if self.pick_radius < 0.0 || self.nudge_force < 0.0 || self.nudge_spin < 0.0 {
            return Err(ConfigError::Invalid { field: "pick_radius/nudge", reason: "must not be negative" });
        }
        Ok(())
    }
}
