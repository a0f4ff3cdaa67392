//! Game configuration
//!
//! Tunable constants with units. Loaded from JSON (partial overrides allowed)
//! or taken from `Default`, then treated as immutable for a run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration load/validation failure
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Input was not valid JSON for `GameConfig`
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Jump ===
    /// Peak height of the jump arc (world units)
    pub jump_height: f32,
    /// Flight time of every jump (seconds)
    pub jump_duration: f32,

    // === Geometry ===
    /// Platform extent along x (world units)
    pub platform_width: f32,
    /// Platform thickness along y (world units)
    pub platform_height: f32,
    /// Platform extent along z (world units)
    pub platform_depth: f32,
    /// Edge length of the character cube (world units)
    pub character_size: f32,

    // === Placement ===
    /// Minimum forward gap between consecutive platform centers (world units)
    pub min_distance: f32,
    /// Maximum forward gap between consecutive platform centers (world units)
    pub max_distance: f32,

    // === Scoring ===
    /// Landing-to-center distance below which a landing is perfect (world units)
    pub perfect_range: f32,

    // === Particles ===
    /// Downward acceleration applied to burst particles (world units per tick²,
    /// scaled by `consts::PARTICLE_GRAVITY_SCALE`)
    pub gravity: f32,
    /// Slowest burst particle (world units per tick)
    pub particle_speed_min: f32,
    /// Fastest burst particle (world units per tick)
    pub particle_speed_max: f32,
    /// Shortest particle lifetime (seconds)
    pub particle_lifetime_min: f32,
    /// Longest particle lifetime (seconds)
    pub particle_lifetime_max: f32,

    // === Palettes (0xRRGGBB) ===
    pub platform_colors: Vec<u32>,
    pub particle_colors: Vec<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            jump_height: 100.0,
            jump_duration: 0.8,

            platform_width: 60.0,
            platform_height: 15.0,
            platform_depth: 60.0,
            character_size: 12.0,

            min_distance: 80.0,
            max_distance: 160.0,

            perfect_range: 10.0,

            gravity: 9.8,
            particle_speed_min: 2.0,
            particle_speed_max: 6.0,
            particle_lifetime_min: 1.0,
            particle_lifetime_max: 2.0,

            platform_colors: vec![
                0x67C23A, 0xE6A23C, 0xF56C6C, 0x909399, 0x409EFF, 0xB83AF7, 0x19D4AE, 0x7B7C7D,
            ],
            particle_colors: vec![0xFF0000, 0xFF7700, 0xFFFF00],
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        // JSON overflow (e.g. 1e39) parses to infinity, which sampling rejects
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }

        for (field, value) in [
            ("jump_height", self.jump_height),
            ("jump_duration", self.jump_duration),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("platform_depth", self.platform_depth),
            ("character_size", self.character_size),
            // A zero gap would leave the jump direction undefined
            ("min_distance", self.min_distance),
            ("particle_lifetime_min", self.particle_lifetime_min),
        ] {
            if value <= 0.0 {
                return invalid(field, "must be positive");
            }
        }

        for (field, value) in [
            ("perfect_range", self.perfect_range),
            ("gravity", self.gravity),
            ("particle_speed_min", self.particle_speed_min),
        ] {
            if value < 0.0 {
                return invalid(field, "must not be negative");
            }
        }

        if self.max_distance < self.min_distance {
            return invalid("max_distance", "must not be below min_distance");
        }
        if self.particle_speed_max < self.particle_speed_min {
            return invalid("particle_speed_max", "must not be below particle_speed_min");
        }
        if self.particle_lifetime_max < self.particle_lifetime_min {
            return invalid("particle_lifetime_max", "must not be below particle_lifetime_min");
        }
        if self.platform_colors.is_empty() {
            return invalid("platform_colors", "must not be empty");
        }
        if self.particle_colors.is_empty() {
            return invalid("particle_colors", "must not be empty");
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 14] {
        [
            ("jump_height", self.jump_height),
            ("jump_duration", self.jump_duration),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("platform_depth", self.platform_depth),
            ("character_size", self.character_size),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("perfect_range", self.perfect_range),
            ("gravity", self.gravity),
            ("particle_speed_min", self.particle_speed_min),
            ("particle_speed_max", self.particle_speed_max),
            ("particle_lifetime_min", self.particle_lifetime_min),
            ("particle_lifetime_max", self.particle_lifetime_max),
        ]
    }

    /// Height of the character's center when standing on a platform
    pub fn rest_height(&self) -> f32 {
        self.platform_height + self.character_size / 2.0
    }

    /// Jump duration in milliseconds (timestamps are ms)
    pub fn jump_duration_ms(&self) -> f64 {
        self.jump_duration as f64 * 1000.0
    }
}
