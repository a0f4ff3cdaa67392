//! Game state and core simulation types
//!
//! One `GameState` is one explicitly constructed session. Everything needed
//! to reproduce a run (seed, RNG, platforms, flight) lives here.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::landing::Footprint;
use super::particles::ParticleSystem;
use super::platforms::PlatformWindow;
use super::score::ScoreTracker;
use super::trajectory::FlightDescriptor;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing on a platform, waiting for a press
    Ready,
    /// Press held, power accumulating
    Charging,
    /// In the air
    Jumping,
    /// Missed; terminal until the next `start_session`
    GameOver,
}

/// A platform on the ground plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Center on the ground plane (x, z)
    pub center: Vec2,
    /// Extent along x
    pub width: f32,
    /// Extent along z
    pub depth: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Platform {
    /// Landing area
    pub fn footprint(&self) -> Footprint {
        Footprint::centered(self.center, self.width, self.depth)
    }
}

/// The player's cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec3,
    /// Rotation about x and y (radians, visual only)
    pub rotation: Vec2,
    pub visible: bool,
}

impl Character {
    /// Standing at rest on `platform`
    pub fn resting_on(platform: &Platform, rest_height: f32) -> Self {
        Self {
            pos: Vec3::new(platform.center.x, rest_height, platform.center.y),
            rotation: Vec2::ZERO,
            visible: true,
        }
    }
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fresh session: platforms and particles from before are gone
    SessionStarted,
    PlatformSpawned(Platform),
    PlatformEvicted { id: u32 },
    ChargeStarted,
    Launched { power: f32 },
    LandedInPlace,
    Landed {
        platform_id: u32,
        points: u32,
        perfect: bool,
    },
    ScoreChanged(u32),
    BestScoreChanged(u32),
    Missed { at: Vec3 },
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub platforms: PlatformWindow,
    pub character: Character,
    /// Press timestamp while charging (ms)
    pub charge_started_at: Option<f64>,
    /// Power of the last release, in [0, 1]
    pub power: f32,
    /// Active jump, only while `Jumping`
    pub flight: Option<FlightDescriptor>,
    pub scores: ScoreTracker,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Pre-session state: only the origin platform exists
    ///
    /// Presses before `start_session` revert to `Ready` with nothing to aim at.
    pub fn new(seed: u64, config: GameConfig, scores: ScoreTracker) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = PlatformWindow::with_origin(&config, &mut rng);
        let character = match platforms.current() {
            Some(origin) => Character::resting_on(origin, config.rest_height()),
            None => Character {
                pos: Vec3::new(0.0, config.rest_height(), 0.0),
                rotation: Vec2::ZERO,
                visible: true,
            },
        };

        Self {
            seed,
            config,
            rng,
            phase: GamePhase::Ready,
            platforms,
            character,
            charge_started_at: None,
            power: 0.0,
            flight: None,
            scores,
            particles: ParticleSystem::new(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Reset everything but the best score and lay out the first two platforms
    pub fn start_session(&mut self) {
        self.phase = GamePhase::Ready;
        self.charge_started_at = None;
        self.power = 0.0;
        self.flight = None;
        self.scores.reset();
        self.particles.clear();
        self.events.push(GameEvent::SessionStarted);

        let origin = self.platforms.reset(&self.config, &mut self.rng);
        self.character = Character::resting_on(&origin, self.config.rest_height());
        self.events.push(GameEvent::PlatformSpawned(origin));
        if let Some(next) = self.platforms.spawn_next(&self.config, &mut self.rng) {
            self.events.push(GameEvent::PlatformSpawned(next));
        }
        self.events.push(GameEvent::ScoreChanged(0));

        log::info!("Session started (seed {})", self.seed);
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
