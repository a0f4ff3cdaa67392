//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Wall-clock timestamps (ms) passed in, never read
//! - No rendering or platform dependencies

pub mod error;
pub mod landing;
pub mod particles;
pub mod platforms;
pub mod score;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use error::GameError;
pub use landing::{Footprint, LandingOutcome, evaluate_landing, landing_points};
pub use particles::{Particle, ParticleSystem};
pub use platforms::{PlatformWindow, next_platform};
pub use score::ScoreTracker;
pub use state::{Character, GameEvent, GamePhase, GameState, Platform};
pub use tick::{PointerEvent, TickInput, handle_pointer, tick};
pub use trajectory::{FlightDescriptor, FlightSample, charge_power, jump_distance};
