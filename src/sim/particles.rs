//! Failure burst particles
//!
//! Purely visual. Velocities are expressed per simulation tick, while age and
//! lifetime are wall-clock so fade-out is independent of frame rate.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::GameConfig;
use crate::consts::{BURST_PARTICLE_COUNT, PARTICLE_GRAVITY_SCALE};
use crate::spherical_to_cartesian;

/// A single burst particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec3,
    /// World units per tick
    pub vel: Vec3,
    /// Spawn timestamp (ms)
    pub born_at: f64,
    /// Seconds
    pub lifetime: f32,
    pub color: u32,
    /// 1 at birth, falling linearly to 0 at `lifetime`
    pub opacity: f32,
}

impl Particle {
    /// Age in seconds at `now` (ms)
    pub fn age(&self, now: f64) -> f32 {
        (((now - self.born_at) / 1000.0) as f32).max(0.0)
    }

    /// Opacity at `age` seconds
    pub fn opacity_at(&self, age: f32) -> f32 {
        (1.0 - age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Live particles, in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    next_id: u32,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a burst of `BURST_PARTICLE_COUNT` particles from `origin`
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        origin: Vec3,
        now: f64,
        config: &GameConfig,
        rng: &mut R,
    ) {
        self.particles.reserve(BURST_PARTICLE_COUNT);
        for _ in 0..BURST_PARTICLE_COUNT {
            let speed = rng.random_range(config.particle_speed_min..=config.particle_speed_max);
            let azimuth = rng.random_range(0.0..TAU);
            let elevation = rng.random_range(-FRAC_PI_2..=FRAC_PI_2);
            let lifetime =
                rng.random_range(config.particle_lifetime_min..=config.particle_lifetime_max);
            let color = config
                .particle_colors
                .choose(rng)
                .copied()
                .unwrap_or(0xFFFFFF);

            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.particles.push(Particle {
                id,
                pos: origin,
                vel: spherical_to_cartesian(speed, azimuth, elevation),
                born_at: now,
                lifetime,
                color,
                opacity: 1.0,
            });
        }
        log::debug!(
            "Burst of {} particles at ({:.1}, {:.1}, {:.1})",
            BURST_PARTICLE_COUNT,
            origin.x,
            origin.y,
            origin.z
        );
    }

    /// Advance every particle one tick, dropping those at or past their lifetime
    pub fn tick(&mut self, now: f64, gravity: f32) {
        self.particles.retain_mut(|particle| {
            let age = particle.age(now);
            if age >= particle.lifetime {
                return false;
            }
            particle.pos += particle.vel;
            particle.vel.y -= gravity * PARTICLE_GRAVITY_SCALE;
            particle.opacity = particle.opacity_at(age);
            true
        });
    }

    /// Remove every particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
