//! Procedural platform placement and the active platform window
//!
//! Platforms march strictly along +x with a small lateral jitter. Only a few
//! are kept alive; the oldest is evicted once the window grows past
//! `PLATFORM_WINDOW`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::config::GameConfig;
use crate::consts::{LATERAL_JITTER, PLATFORM_WINDOW};

/// Fallback when a palette is empty (config validation normally prevents it)
const FALLBACK_COLOR: u32 = 0xFFFFFF;

/// Build a platform centered at `center`
pub fn platform_at<R: Rng + ?Sized>(
    center: Vec2,
    config: &GameConfig,
    id: u32,
    rng: &mut R,
) -> Platform {
    let color = config
        .platform_colors
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_COLOR);
    Platform {
        id,
        center,
        width: config.platform_width,
        depth: config.platform_depth,
        color,
    }
}

/// Place the successor of `current`
pub fn next_platform<R: Rng + ?Sized>(
    current: &Platform,
    config: &GameConfig,
    id: u32,
    rng: &mut R,
) -> Platform {
    let distance = rng.random_range(config.min_distance..=config.max_distance);
    let x = current.center.x + distance;
    let z = current.center.y + (rng.random::<f32>() - 0.5) * distance * LATERAL_JITTER;
    platform_at(Vec2::new(x, z), config, id, rng)
}

/// Bounded run of live platforms plus the one the character stands on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformWindow {
    platforms: VecDeque<Platform>,
    /// Index of the platform the character stands on
    current: usize,
    /// Next platform ID (monotonic across sessions)
    next_id: u32,
}

impl PlatformWindow {
    /// Window holding only the origin platform
    pub fn with_origin<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut window = Self {
            platforms: VecDeque::with_capacity(PLATFORM_WINDOW + 1),
            current: 0,
            next_id: 1,
        };
        window.reset(config, rng);
        window
    }

    /// Window over explicit platforms (tests only)
    #[cfg(test)]
    pub(crate) fn from_platforms(platforms: Vec<Platform>, current: usize) -> Self {
        let next_id = platforms.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            platforms: platforms.into(),
            current,
            next_id,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop every platform and place a fresh one at the origin
    pub fn reset<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) -> Platform {
        self.platforms.clear();
        self.current = 0;
        let id = self.next_entity_id();
        let origin = platform_at(Vec2::ZERO, config, id, rng);
        self.platforms.push_back(origin.clone());
        origin
    }

    /// Generate the successor of the current platform and append it
    pub fn spawn_next<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) -> Option<Platform> {
        let current = self.current()?.clone();
        let id = self.next_entity_id();
        let next = next_platform(&current, config, id, rng);
        log::debug!(
            "Platform {} at ({:.1}, {:.1})",
            next.id,
            next.center.x,
            next.center.y
        );
        self.platforms.push_back(next.clone());
        Some(next)
    }

    /// Step onto the target platform; false when there is none
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.platforms.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Evict the oldest platform if the window is over capacity
    ///
    /// The current index shifts down so it keeps naming the same platform.
    pub fn trim(&mut self) -> Option<Platform> {
        if self.platforms.len() <= PLATFORM_WINDOW || self.current == 0 {
            return None;
        }
        let evicted = self.platforms.pop_front()?;
        self.current -= 1;
        Some(evicted)
    }

    /// Platform the character stands on
    pub fn current(&self) -> Option<&Platform> {
        self.platforms.get(self.current)
    }

    /// Platform the next jump aims at
    pub fn target(&self) -> Option<&Platform> {
        self.platforms.get(self.current + 1)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }
}
