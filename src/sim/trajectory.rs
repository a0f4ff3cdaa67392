//! Jump trajectory
//!
//! Charge power scales the jump between 70% and 120% of the gap between
//! platform centers. The planar path is an eased lerp from the character's
//! take-off point; height is a sine arc, not integrated from gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ease_in_out_quad;

/// Charge power for a press held from `started_at` to `released_at` (ms)
///
/// Clamped to [0, 1]; out-of-order timestamps give 0.
pub fn charge_power(started_at: f64, released_at: f64) -> f32 {
    let held_secs = ((released_at - started_at) / 1000.0) as f32;
    (held_secs * CHARGE_RATE).clamp(0.0, 1.0)
}

/// Actual jump distance for a platform gap `distance` and charge `power`
#[inline]
pub fn jump_distance(distance: f32, power: f32) -> f32 {
    distance * (BASE_REACH + POWER_REACH * power)
}

/// Character placement along a flight at some progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSample {
    /// Ground-plane position (x, z)
    pub planar: Vec2,
    /// Height above the resting height
    pub height: f32,
}

/// One jump, from launch to landing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightDescriptor {
    /// Launch timestamp (ms)
    pub started_at: f64,
    /// Take-off point (x, z)
    pub start: Vec2,
    /// Touch-down point (x, z)
    pub target: Vec2,
    /// Unit vector from source to target platform center
    pub direction: Vec2,
    /// Gap between source and target platform centers
    pub distance: f32,
    /// Distance actually covered by this jump
    pub jump_distance: f32,
}

impl FlightDescriptor {
    /// Plan a jump between two platform centers for a character at `character`
    ///
    /// The touch-down point is offset from the character, not from the source
    /// center, so repeated in-place hops drift. Returns `None` when the two
    /// centers coincide.
    pub fn plan(
        source: Vec2,
        target: Vec2,
        character: Vec2,
        power: f32,
        started_at: f64,
    ) -> Option<Self> {
        let delta = target - source;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            return None;
        }

        let direction = delta / distance;
        let jump_distance = jump_distance(distance, power);

        Some(Self {
            started_at,
            start: character,
            target: character + direction * jump_distance,
            direction,
            distance,
            jump_distance,
        })
    }

    /// Linear progress in [0, 1] at `now` for a flight lasting `duration_ms`
    pub fn progress(&self, now: f64, duration_ms: f64) -> f32 {
        let elapsed = now - self.started_at;
        ((elapsed / duration_ms) as f32).clamp(0.0, 1.0)
    }

    /// Position and arc height at linear `progress`
    pub fn sample(&self, progress: f32, peak_height: f32) -> FlightSample {
        let eased = ease_in_out_quad(progress.clamp(0.0, 1.0));
        FlightSample {
            planar: self.start + (self.target - self.start) * eased,
            height: (eased * std::f32::consts::PI).sin() * peak_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flight(power: f32) -> FlightDescriptor {
        FlightDescriptor::plan(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            Vec2::ZERO,
            power,
            1_000.0,
        )
        .expect("non-degenerate gap")
    }

    #[test]
    fn test_charge_power_caps_at_one() {
        // 0.6s held -> 1.2 -> capped
        assert_eq!(charge_power(0.0, 600.0), 1.0);
        assert!((charge_power(0.0, 250.0) - 0.5).abs() < 1e-6);
        assert_eq!(charge_power(500.0, 400.0), 0.0);
    }

    #[test]
    fn test_reach_by_power() {
        assert!((flight(0.0).target.x - 70.0).abs() < 1e-3);
        assert!((flight(0.5).target.x - 95.0).abs() < 1e-3);
        assert!((flight(1.0).target.x - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_target_offset_from_character() {
        let f = FlightDescriptor::plan(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            Vec2::new(12.0, 5.0),
            0.0,
            0.0,
        )
        .expect("non-degenerate gap");
        assert!((f.target - Vec2::new(12.0, 75.0)).length() < 1e-3);
        assert_eq!(f.direction, Vec2::new(0.0, 1.0));
        assert_eq!(f.distance, 100.0);
    }

    #[test]
    fn test_degenerate_gap() {
        let f = FlightDescriptor::plan(Vec2::ONE, Vec2::ONE, Vec2::ZERO, 0.5, 0.0);
        assert!(f.is_none());
    }

    #[test]
    fn test_progress_clamped() {
        let f = flight(0.5);
        assert_eq!(f.progress(900.0, 800.0), 0.0);
        assert_eq!(f.progress(1_400.0, 800.0), 0.5);
        assert_eq!(f.progress(99_999.0, 800.0), 1.0);
    }

    #[test]
    fn test_arc_shape() {
        let f = flight(0.5);
        let start = f.sample(0.0, 100.0);
        let mid = f.sample(0.5, 100.0);
        let end = f.sample(1.0, 100.0);

        assert_eq!(start.planar, Vec2::ZERO);
        assert!(start.height.abs() < 1e-4);
        assert!((mid.height - 100.0).abs() < 1e-3);
        assert!((mid.planar.x - 47.5).abs() < 1e-3);
        assert!((end.planar.x - 95.0).abs() < 1e-3);
        assert!(end.height.abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn jump_distance_within_reach(power in 0.0f32..=1.0, distance in 0.001f32..1_000.0) {
            let jd = jump_distance(distance, power);
            prop_assert!(jd >= 0.7 * distance * (1.0 - 1e-5));
            prop_assert!(jd <= 1.2 * distance * (1.0 + 1e-5));
        }

        #[test]
        fn charge_power_in_unit_range(start in 0.0f64..1e7, held in -1e4f64..1e4) {
            let p = charge_power(start, start + held);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
