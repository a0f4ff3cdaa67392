//! Jump Jump entry point
//!
//! Native builds run a headless demo: an aiming bot plays a few sessions
//! against logging collaborators. Pass a JSON file path to override the
//! default config.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::{Vec2, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use jump_jump::consts::{BASE_REACH, CHARGE_RATE, POWER_REACH};
    use jump_jump::host::{DrawableHandle, Hud, Scene};
    use jump_jump::sim::GamePhase;
    use jump_jump::{App, GameConfig, MemoryStore, planar};

    const FRAME_MS: f64 = 16.0;
    const SESSIONS: u32 = 3;
    /// Hold-time jitter grows with every jump so sessions always end
    const JITTER_BASE_MS: f64 = 10.0;
    const JITTER_PER_JUMP_MS: f64 = 8.0;

    /// Scene that only counts drawables and logs changes
    #[derive(Default)]
    pub struct LogScene {
        next: u32,
        live: usize,
        frames: u64,
    }

    impl LogScene {
        fn alloc(&mut self) -> DrawableHandle {
            self.next += 1;
            self.live += 1;
            DrawableHandle(self.next)
        }
    }

    impl Scene for LogScene {
        fn create_platform_drawable(
            &mut self,
            position: Vec3,
            size: Vec3,
            color: u32,
        ) -> DrawableHandle {
            let handle = self.alloc();
            log::debug!(
                "Platform {:?} at ({:.1}, {:.1}) size {:.0}x{:.0} color #{:06X}",
                handle,
                position.x,
                position.z,
                size.x,
                size.z,
                color
            );
            handle
        }

        fn create_character_drawable(&mut self, size: f32) -> DrawableHandle {
            log::debug!("Character cube {:.0}", size);
            self.alloc()
        }

        fn create_particle_drawable(&mut self, _position: Vec3, _color: u32) -> DrawableHandle {
            self.alloc()
        }

        fn set_position(&mut self, _handle: DrawableHandle, _position: Vec3) {}

        fn set_rotation(&mut self, _handle: DrawableHandle, _rotation: Vec2) {}

        fn set_visible(&mut self, _handle: DrawableHandle, _visible: bool) {}

        fn set_opacity(&mut self, _handle: DrawableHandle, _opacity: f32) {}

        fn remove_drawable(&mut self, _handle: DrawableHandle) {
            self.live = self.live.saturating_sub(1);
        }

        fn render_frame(&mut self) {
            self.frames += 1;
        }
    }

    #[derive(Default)]
    pub struct LogHud;

    impl Hud for LogHud {
        fn show_score(&mut self, score: u32) {
            log::debug!("Score: {}", score);
        }

        fn show_best_score(&mut self, best: u32) {
            log::info!("Best: {}", best);
        }

        fn set_start_screen_visible(&mut self, visible: bool) {
            if visible {
                log::info!("Press to start");
            }
        }

        fn set_game_over_visible(&mut self, visible: bool, final_score: u32) {
            if visible {
                log::info!("GAME OVER - final score {}", final_score);
            }
        }
    }

    type DemoApp = App<MemoryStore, LogScene, LogHud>;

    fn load_config() -> GameConfig {
        let Some(path) = std::env::args().nth(1) else {
            return GameConfig::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("Using default config ({}): {}", path, err);
                GameConfig::default()
            }
        }
    }

    fn seed_from_clock() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Hold time that would land the character on the target center
    fn aim_hold_ms(app: &DemoApp) -> Option<f64> {
        let state = app.state();
        let current = state.platforms.current()?;
        let target = state.platforms.target()?;
        let gap = target.center - current.center;
        let distance = gap.length();
        if distance <= f32::EPSILON {
            return None;
        }
        let direction = gap / distance;
        let wanted = (target.center - planar(state.character.pos)).dot(direction);
        let power = ((wanted / distance - BASE_REACH) / POWER_REACH).clamp(0.0, 1.0);
        Some(f64::from(power / CHARGE_RATE) * 1000.0)
    }

    /// Play one session to game over, returning the final score
    fn play_session(app: &mut DemoApp, rng: &mut Pcg32, now: &mut f64) -> u32 {
        app.start();
        let mut jumps = 0u32;

        while app.state().phase != GamePhase::GameOver {
            let Some(hold) = aim_hold_ms(app) else {
                log::warn!("Nothing to aim at");
                break;
            };
            let jitter = JITTER_BASE_MS + JITTER_PER_JUMP_MS * f64::from(jumps);
            let hold = (hold + rng.random_range(-jitter..=jitter)).max(0.0);

            app.pointer_down(*now);
            app.frame(*now);
            let release_at = *now + hold;
            while *now + FRAME_MS < release_at {
                *now += FRAME_MS;
                app.frame(*now);
            }
            *now = release_at;
            app.pointer_up(*now);
            app.frame(*now);

            while app.state().phase == GamePhase::Jumping {
                *now += FRAME_MS;
                app.frame(*now);
            }
            jumps += 1;
        }

        // Let the burst fade out
        while !app.state().particles.is_empty() {
            *now += FRAME_MS;
            app.frame(*now);
        }

        log::info!(
            "Session over after {} jumps: score {}, {} frames rendered, {} drawables live",
            jumps,
            app.state().score(),
            app.scene().frames,
            app.scene().live
        );
        app.state().score()
    }

    pub fn run() {
        let config = load_config();
        let seed = seed_from_clock();
        log::info!("Jump Jump (headless) seed {}", seed);

        let mut bot_rng = Pcg32::seed_from_u64(seed.rotate_left(17));
        let mut app = App::new(
            config,
            seed,
            MemoryStore::new(),
            LogScene::default(),
            LogHud,
        );

        let mut now = 0.0;
        for session in 1..=SESSIONS {
            let score = play_session(&mut app, &mut bot_rng, &mut now);
            log::info!("Session {}: {}", session, score);
        }
        log::info!("Best score: {}", app.state().best_score());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `App` directly
}
