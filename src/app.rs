//! Host shell
//!
//! Owns one `GameState` and the three collaborators. Pointer input is queued
//! between frames; each frame runs one simulation tick and mirrors the
//! emitted events onto the scene and HUD.

use std::collections::{HashMap, HashSet};

use glam::Vec3;

use crate::config::GameConfig;
use crate::host::{DrawableHandle, Hud, Scene};
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GameState, Platform, PointerEvent, ScoreTracker, TickInput, tick};

pub struct App<S: ScoreStore, R: Scene, H: Hud> {
    state: GameState,
    store: S,
    scene: R,
    hud: H,
    character: DrawableHandle,
    platforms: HashMap<u32, DrawableHandle>,
    particles: HashMap<u32, DrawableHandle>,
    input: TickInput,
}

impl<S: ScoreStore, R: Scene, H: Hud> App<S, R, H> {
    /// Load the best score, build the character and origin platform, and show
    /// the start screen
    pub fn new(config: GameConfig, seed: u64, store: S, mut scene: R, mut hud: H) -> Self {
        let scores = ScoreTracker::load(&store);
        let state = GameState::new(seed, config, scores);

        let character = scene.create_character_drawable(state.config.character_size);
        let mut platforms = HashMap::new();
        for platform in state.platforms.iter() {
            let handle = spawn_platform(&mut scene, platform, state.config.platform_height);
            platforms.insert(platform.id, handle);
        }

        hud.show_best_score(state.best_score());
        hud.set_start_screen_visible(true);
        hud.set_game_over_visible(false, 0);

        let mut app = Self {
            state,
            store,
            scene,
            hud,
            character,
            platforms,
            particles: HashMap::new(),
            input: TickInput::default(),
        };
        app.sync_character();
        app
    }

    /// Start (or restart) a session
    pub fn start(&mut self) {
        self.hud.set_start_screen_visible(false);
        self.hud.set_game_over_visible(false, 0);
        self.input.events.clear();
        self.state.start_session();
        self.apply_events();
        self.sync_character();
        self.sync_particles();
    }

    pub fn pointer_down(&mut self, at: f64) {
        self.input.events.push(PointerEvent::Down { at });
    }

    pub fn pointer_up(&mut self, at: f64) {
        self.input.events.push(PointerEvent::Up { at });
    }

    pub fn pointer_leave(&mut self, at: f64) {
        self.input.events.push(PointerEvent::Leave { at });
    }

    /// Run one tick at `now` (ms) and present the result
    pub fn frame(&mut self, now: f64) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, now, &mut self.store);

        self.apply_events();
        self.sync_character();
        self.sync_particles();
        self.scene.render_frame();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scene(&self) -> &R {
        &self.scene
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    fn apply_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SessionStarted => {
                    for (_, handle) in self.platforms.drain() {
                        self.scene.remove_drawable(handle);
                    }
                    for (_, handle) in self.particles.drain() {
                        self.scene.remove_drawable(handle);
                    }
                }
                GameEvent::PlatformSpawned(platform) => {
                    let handle = spawn_platform(
                        &mut self.scene,
                        &platform,
                        self.state.config.platform_height,
                    );
                    self.platforms.insert(platform.id, handle);
                }
                GameEvent::PlatformEvicted { id } => {
                    if let Some(handle) = self.platforms.remove(&id) {
                        self.scene.remove_drawable(handle);
                    }
                }
                GameEvent::ScoreChanged(score) => self.hud.show_score(score),
                GameEvent::BestScoreChanged(best) => self.hud.show_best_score(best),
                GameEvent::GameOver { score } => self.hud.set_game_over_visible(true, score),
                GameEvent::ChargeStarted
                | GameEvent::Launched { .. }
                | GameEvent::LandedInPlace
                | GameEvent::Landed { .. }
                | GameEvent::Missed { .. } => {}
            }
        }
    }

    fn sync_character(&mut self) {
        let character = &self.state.character;
        self.scene.set_position(self.character, character.pos);
        self.scene.set_rotation(self.character, character.rotation);
        self.scene.set_visible(self.character, character.visible);
    }

    /// Diff live particles against their drawables by id
    fn sync_particles(&mut self) {
        let live: HashSet<u32> = self.state.particles.iter().map(|p| p.id).collect();
        let scene = &mut self.scene;
        self.particles.retain(|id, handle| {
            let keep = live.contains(id);
            if !keep {
                scene.remove_drawable(*handle);
            }
            keep
        });

        for particle in self.state.particles.iter() {
            let handle = *self
                .particles
                .entry(particle.id)
                .or_insert_with(|| scene.create_particle_drawable(particle.pos, particle.color));
            scene.set_position(handle, particle.pos);
            scene.set_opacity(handle, particle.opacity);
        }
    }
}

fn spawn_platform<R: Scene>(scene: &mut R, platform: &Platform, height: f32) -> DrawableHandle {
    scene.create_platform_drawable(
        Vec3::new(platform.center.x, 0.0, platform.center.y),
        Vec3::new(platform.width, height, platform.depth),
        platform.color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::GamePhase;
    use glam::Vec2;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Platform,
        Character,
        Particle,
    }

    #[derive(Debug, Clone)]
    struct Drawable {
        kind: Kind,
        position: Vec3,
        visible: bool,
        opacity: f32,
    }

    #[derive(Default)]
    struct RecordingScene {
        next: u32,
        drawables: HashMap<DrawableHandle, Drawable>,
        frames: u32,
    }

    impl RecordingScene {
        fn add(&mut self, kind: Kind, position: Vec3) -> DrawableHandle {
            self.next += 1;
            let handle = DrawableHandle(self.next);
            self.drawables.insert(
                handle,
                Drawable {
                    kind,
                    position,
                    visible: true,
                    opacity: 1.0,
                },
            );
            handle
        }

        fn count(&self, kind: Kind) -> usize {
            self.drawables.values().filter(|d| d.kind == kind).count()
        }

        fn character(&self) -> Option<&Drawable> {
            self.drawables.values().find(|d| d.kind == Kind::Character)
        }
    }

    impl Scene for RecordingScene {
        fn create_platform_drawable(
            &mut self,
            position: Vec3,
            _size: Vec3,
            _color: u32,
        ) -> DrawableHandle {
            self.add(Kind::Platform, position)
        }

        fn create_character_drawable(&mut self, _size: f32) -> DrawableHandle {
            self.add(Kind::Character, Vec3::ZERO)
        }

        fn create_particle_drawable(&mut self, position: Vec3, _color: u32) -> DrawableHandle {
            self.add(Kind::Particle, position)
        }

        fn set_position(&mut self, handle: DrawableHandle, position: Vec3) {
            if let Some(d) = self.drawables.get_mut(&handle) {
                d.position = position;
            }
        }

        fn set_rotation(&mut self, _handle: DrawableHandle, _rotation: Vec2) {}

        fn set_visible(&mut self, handle: DrawableHandle, visible: bool) {
            if let Some(d) = self.drawables.get_mut(&handle) {
                d.visible = visible;
            }
        }

        fn set_opacity(&mut self, handle: DrawableHandle, opacity: f32) {
            if let Some(d) = self.drawables.get_mut(&handle) {
                d.opacity = opacity;
            }
        }

        fn remove_drawable(&mut self, handle: DrawableHandle) {
            self.drawables.remove(&handle);
        }

        fn render_frame(&mut self) {
            self.frames += 1;
        }
    }

    #[derive(Default)]
    struct RecordingHud {
        score: Option<u32>,
        best: Option<u32>,
        start_visible: bool,
        game_over: Option<u32>,
    }

    impl Hud for RecordingHud {
        fn show_score(&mut self, score: u32) {
            self.score = Some(score);
        }

        fn show_best_score(&mut self, best: u32) {
            self.best = Some(best);
        }

        fn set_start_screen_visible(&mut self, visible: bool) {
            self.start_visible = visible;
        }

        fn set_game_over_visible(&mut self, visible: bool, final_score: u32) {
            self.game_over = visible.then_some(final_score);
        }
    }

    type TestApp = App<MemoryStore, RecordingScene, RecordingHud>;

    fn app(config: GameConfig, best: u32) -> TestApp {
        App::new(
            config,
            42,
            MemoryStore::with_best(best),
            RecordingScene::default(),
            RecordingHud::default(),
        )
    }

    /// Platforms too small to reach with a zero-power hop
    fn tiny_platforms() -> GameConfig {
        GameConfig {
            platform_width: 10.0,
            platform_depth: 10.0,
            ..GameConfig::default()
        }
    }

    fn hop(app: &mut TestApp, at: f64, held_ms: f64) {
        app.pointer_down(at);
        app.frame(at);
        app.pointer_up(at + held_ms);
        app.frame(at + held_ms);
        app.frame(at + held_ms + 1_000.0);
    }

    #[test]
    fn test_new_shows_start_screen() {
        let app = app(GameConfig::default(), 70);
        assert!(app.hud().start_visible);
        assert_eq!(app.hud().best, Some(70));
        assert_eq!(app.hud().game_over, None);
        assert_eq!(app.scene().count(Kind::Character), 1);
        assert_eq!(app.scene().count(Kind::Platform), 1);
    }

    #[test]
    fn test_start_lays_out_platforms() {
        let mut app = app(GameConfig::default(), 0);
        app.start();
        assert!(!app.hud().start_visible);
        assert_eq!(app.hud().score, Some(0));
        assert_eq!(app.scene().count(Kind::Platform), 2);
        let character = app.scene().character().expect("character drawable");
        assert_eq!(character.position, Vec3::new(0.0, 21.0, 0.0));
    }

    #[test]
    fn test_perfect_jump_updates_hud() {
        let mut app = app(GameConfig::default(), 0);
        app.start();
        // 0.6 power reaches exactly the target center from the origin center
        hop(&mut app, 0.0, 300.0);

        assert_eq!(app.state().phase, GamePhase::Ready);
        assert_eq!(app.hud().score, Some(20));
        assert_eq!(app.scene().count(Kind::Platform), 3);
        assert!(app.scene().frames >= 3);

        let target = app.state().platforms.current().expect("landed platform");
        let character = app.scene().character().expect("character drawable");
        assert!((character.position.x - target.center.x).abs() < 1e-2);
        assert!((character.position.z - target.center.y).abs() < 1e-2);
    }

    #[test]
    fn test_miss_shows_game_over_and_fades_particles() {
        let mut app = app(tiny_platforms(), 0);
        app.start();
        hop(&mut app, 0.0, 300.0);
        assert_eq!(app.hud().score, Some(20));

        // Zero power falls short of any 10x10 target
        hop(&mut app, 2_000.0, 0.0);
        assert!(app.state().is_game_over());
        assert_eq!(app.hud().game_over, Some(20));
        assert_eq!(app.hud().best, Some(20));
        assert_eq!(app.store().best_score(), 20);
        assert_eq!(app.scene().count(Kind::Particle), 50);
        assert!(!app.scene().character().expect("character").visible);

        app.frame(5_000.0);
        assert_eq!(app.scene().count(Kind::Particle), 0);
    }

    #[test]
    fn test_restart_keeps_best_and_clears_scene() {
        let mut app = app(tiny_platforms(), 0);
        app.start();
        hop(&mut app, 0.0, 300.0);
        hop(&mut app, 2_000.0, 0.0);
        assert!(app.state().is_game_over());

        app.start();
        assert_eq!(app.hud().game_over, None);
        assert_eq!(app.hud().score, Some(0));
        assert_eq!(app.hud().best, Some(20));
        assert_eq!(app.state().best_score(), 20);
        assert_eq!(app.scene().count(Kind::Particle), 0);
        assert_eq!(app.scene().count(Kind::Platform), 2);
        assert!(app.scene().character().expect("character").visible);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut app = app(tiny_platforms(), 0);
        app.start();
        hop(&mut app, 0.0, 0.0);
        assert!(app.state().is_game_over());

        hop(&mut app, 2_000.0, 300.0);
        assert!(app.state().is_game_over());
        assert_eq!(app.hud().game_over, Some(0));
    }
}
