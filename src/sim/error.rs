//! Recoverable simulation errors
//!
//! None of these end a session; the state machine logs them and stays
//! playable.

use thiserror::Error;

use super::state::GamePhase;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Input that has no meaning in the current phase
    #[error("{event} ignored while {phase:?}")]
    InvalidTransition {
        phase: GamePhase,
        event: &'static str,
    },

    /// Release with no platform ahead to aim at
    #[error("no platform ahead to jump to")]
    NoNextPlatform,

    /// `Jumping` without an active flight
    #[error("jumping without an active flight")]
    UninitializedFlight,

    /// Source and target platforms share a center
    #[error("jump direction undefined: platforms share a center")]
    DegenerateJump,
}
