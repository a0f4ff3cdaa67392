//! Jump Jump - a charge-and-release platform hopping game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, trajectory, landing, particles)
//! - `config`: Tunable game constants
//! - `persistence`: Best-score storage
//! - `host`: Scene and HUD collaborator interfaces
//! - `app`: Drives the simulation and mirrors it onto the collaborators

pub mod app;
pub mod config;
pub mod host;
pub mod persistence;
pub mod sim;

pub use app::App;
pub use config::{ConfigError, GameConfig};
pub use persistence::{MemoryStore, ScoreStore};

use glam::{Vec2, Vec3};

/// Fixed gameplay rules (not tunable through `GameConfig`)
pub mod consts {
    /// Charge power gained per second of holding
    pub const CHARGE_RATE: f32 = 2.0;
    /// Jump distance as a fraction of the platform gap at zero power
    pub const BASE_REACH: f32 = 0.7;
    /// Extra reach fraction gained at full power (0.7 + 0.5 = 1.2 max)
    pub const POWER_REACH: f32 = 0.5;
    /// Character spin per tick while airborne (radians, visual only)
    pub const SPIN_PER_TICK: f32 = 0.1;

    /// Lateral jitter of a new platform, as a fraction of its forward distance
    pub const LATERAL_JITTER: f32 = 0.3;
    /// Platforms retained after an eviction
    pub const PLATFORM_WINDOW: usize = 3;

    /// Points for a regular landing
    pub const LANDING_POINTS: u32 = 10;
    /// Points for a landing inside the perfect range
    pub const PERFECT_POINTS: u32 = 20;

    /// Particles spawned by a failure burst
    pub const BURST_PARTICLE_COUNT: usize = 50;
    /// Fraction of `gravity` removed from particle vertical velocity per tick
    pub const PARTICLE_GRAVITY_SCALE: f32 = 0.02;
}

/// Symmetric quadratic ease-in-out on [0, 1]
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Convert (speed, azimuth, elevation) to a y-up velocity vector
#[inline]
pub fn spherical_to_cartesian(speed: f32, azimuth: f32, elevation: f32) -> Vec3 {
    Vec3::new(
        speed * azimuth.cos() * elevation.cos(),
        speed * elevation.sin(),
        speed * azimuth.sin() * elevation.cos(),
    )
}

/// Project a world position onto the ground plane as (x, z)
#[inline]
pub fn planar(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}
