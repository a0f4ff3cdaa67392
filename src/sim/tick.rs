//! Simulation tick
//!
//! Applies queued pointer input in order, advances the active flight by
//! wall-clock time, resolves landings, and ages particles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::landing::{LandingOutcome, evaluate_landing};
use super::state::{GameEvent, GamePhase, GameState};
use super::trajectory::{FlightDescriptor, charge_power};
use crate::consts::SPIN_PER_TICK;
use crate::persistence::ScoreStore;
use crate::planar;

/// Pointer input from any source (mouse, touch), timestamped in ms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { at: f64 },
    Up { at: f64 },
    /// Pointer left the play area; acts as a release while charging
    Leave { at: f64 },
}

/// Input collected since the previous tick, oldest first
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<PointerEvent>,
}

/// Advance the game by one frame at wall-clock time `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64, store: &mut dyn ScoreStore) {
    state.time_ticks += 1;

    for event in &input.events {
        if let Err(err) = handle_pointer(state, *event) {
            match err {
                GameError::InvalidTransition { .. } => log::debug!("{:?}: {}", event, err),
                _ => log::warn!("{:?}: {}", event, err),
            }
        }
    }

    if state.phase == GamePhase::Jumping {
        if let Err(err) = advance_flight(state, now, store) {
            log::warn!("Flight recovery: {}", err);
        }
    }

    // Particles keep animating in every phase
    state.particles.tick(now, state.config.gravity);
}

/// Apply one pointer event
pub fn handle_pointer(state: &mut GameState, event: PointerEvent) -> Result<(), GameError> {
    match event {
        PointerEvent::Down { at } => press(state, at),
        PointerEvent::Up { at } => release(state, at),
        PointerEvent::Leave { at } => {
            if state.phase == GamePhase::Charging {
                release(state, at)
            } else {
                Ok(())
            }
        }
    }
}

fn press(state: &mut GameState, at: f64) -> Result<(), GameError> {
    if state.phase != GamePhase::Ready {
        return Err(GameError::InvalidTransition {
            phase: state.phase,
            event: "press",
        });
    }
    state.phase = GamePhase::Charging;
    state.charge_started_at = Some(at);
    state.events.push(GameEvent::ChargeStarted);
    Ok(())
}

fn release(state: &mut GameState, at: f64) -> Result<(), GameError> {
    if state.phase != GamePhase::Charging {
        return Err(GameError::InvalidTransition {
            phase: state.phase,
            event: "release",
        });
    }

    let started_at = state.charge_started_at.take().unwrap_or(at);
    state.power = charge_power(started_at, at);

    let (Some(current), Some(target)) = (state.platforms.current(), state.platforms.target())
    else {
        state.phase = GamePhase::Ready;
        return Err(GameError::NoNextPlatform);
    };

    let Some(flight) = FlightDescriptor::plan(
        current.center,
        target.center,
        planar(state.character.pos),
        state.power,
        at,
    ) else {
        state.phase = GamePhase::Ready;
        return Err(GameError::DegenerateJump);
    };

    log::debug!(
        "Jump: power {:.2}, gap {:.1}, reach {:.1}",
        state.power,
        flight.distance,
        flight.jump_distance
    );
    state.flight = Some(flight);
    state.phase = GamePhase::Jumping;
    state.events.push(GameEvent::Launched { power: state.power });
    Ok(())
}

/// Move the character along the active flight; land it once progress hits 1
fn advance_flight(
    state: &mut GameState,
    now: f64,
    store: &mut dyn ScoreStore,
) -> Result<(), GameError> {
    let Some(flight) = state.flight else {
        state.phase = GamePhase::Ready;
        return Err(GameError::UninitializedFlight);
    };

    let progress = flight.progress(now, state.config.jump_duration_ms());
    let sample = flight.sample(progress, state.config.jump_height);
    state.character.pos = Vec3::new(
        sample.planar.x,
        state.config.rest_height() + sample.height,
        sample.planar.y,
    );
    state.character.rotation.y += SPIN_PER_TICK;

    if progress >= 1.0 {
        state.flight = None;
        resolve_landing(state, now, store)?;
    }
    Ok(())
}

/// Apply the landing outcome at the character's current position
fn resolve_landing(
    state: &mut GameState,
    now: f64,
    store: &mut dyn ScoreStore,
) -> Result<(), GameError> {
    let landing = planar(state.character.pos);
    let (Some(current), Some(target)) = (state.platforms.current(), state.platforms.target())
    else {
        state.character.pos.y = state.config.rest_height();
        state.phase = GamePhase::Ready;
        return Err(GameError::NoNextPlatform);
    };
    let target_id = target.id;
    let outcome = evaluate_landing(landing, current, target, state.config.perfect_range);

    match outcome {
        LandingOutcome::InPlace => {
            state.character.pos.y = state.config.rest_height();
            state.phase = GamePhase::Ready;
            state.events.push(GameEvent::LandedInPlace);
        }

        LandingOutcome::Hit {
            points, perfect, ..
        } => {
            state.character.pos.y = state.config.rest_height();
            state.platforms.advance();
            let score = state.scores.apply(points);
            log::debug!(
                "Landed on platform {} (+{}{})",
                target_id,
                points,
                if perfect { ", perfect" } else { "" }
            );
            state.events.push(GameEvent::Landed {
                platform_id: target_id,
                points,
                perfect,
            });
            state.events.push(GameEvent::ScoreChanged(score));

            if let Some(next) = state.platforms.spawn_next(&state.config, &mut state.rng) {
                state.events.push(GameEvent::PlatformSpawned(next));
            }
            if let Some(evicted) = state.platforms.trim() {
                state.events.push(GameEvent::PlatformEvicted { id: evicted.id });
            }
            state.phase = GamePhase::Ready;
        }

        LandingOutcome::Miss => {
            let at = state.character.pos;
            state
                .particles
                .spawn_burst(at, now, &state.config, &mut state.rng);
            state.character.visible = false;
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::Missed { at });

            if let Some(best) = state.scores.finalize(store) {
                state.events.push(GameEvent::BestScoreChanged(best));
            }
            let score = state.scores.score();
            state.events.push(GameEvent::GameOver { score });
            log::info!("Game over with {} points after {} ticks", score, state.time_ticks);
        }
    }
    Ok(())
}
