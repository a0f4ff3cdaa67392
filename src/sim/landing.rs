//! Landing evaluation and scoring
//!
//! Platforms are axis-aligned boxes on the ground plane. A touch-down point on
//! any edge counts as landed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::consts::{LANDING_POINTS, PERFECT_POINTS};

/// Axis-aligned ground footprint (x, z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min: Vec2,
    pub max: Vec2,
}

impl Footprint {
    pub fn centered(center: Vec2, width: f32, depth: f32) -> Self {
        let half = Vec2::new(width / 2.0, depth / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive on all four edges
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// How a jump ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LandingOutcome {
    /// Came down on the platform it left from
    InPlace,
    /// Came down on the next platform
    Hit {
        points: u32,
        perfect: bool,
        distance_to_center: f32,
    },
    /// Came down on neither
    Miss,
}

/// Points for a hit `distance_to_center` away from the target center
pub fn landing_points(distance_to_center: f32, perfect_range: f32) -> u32 {
    if distance_to_center < perfect_range {
        PERFECT_POINTS
    } else {
        LANDING_POINTS
    }
}

/// Decide where a jump that touched down at `landing` ended up
///
/// The source platform is checked first, so a short hop that also overlaps
/// the target counts as in place.
pub fn evaluate_landing(
    landing: Vec2,
    current: &Platform,
    target: &Platform,
    perfect_range: f32,
) -> LandingOutcome {
    if current.footprint().contains(landing) {
        return LandingOutcome::InPlace;
    }

    if target.footprint().contains(landing) {
        let distance_to_center = landing.distance(target.center);
        let points = landing_points(distance_to_center, perfect_range);
        return LandingOutcome::Hit {
            points,
            perfect: points == PERFECT_POINTS,
            distance_to_center,
        };
    }

    LandingOutcome::Miss
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn platform(id: u32, x: f32, z: f32) -> Platform {
        Platform {
            id,
            center: Vec2::new(x, z),
            width: 60.0,
            depth: 60.0,
            color: 0,
        }
    }

    fn land_at(x: f32, z: f32) -> LandingOutcome {
        evaluate_landing(
            Vec2::new(x, z),
            &platform(1, 0.0, 0.0),
            &platform(2, 100.0, 0.0),
            10.0,
        )
    }

    #[test]
    fn test_lower_edge_counts() {
        match land_at(70.0, 0.0) {
            LandingOutcome::Hit {
                points,
                perfect,
                distance_to_center,
            } => {
                assert_eq!(points, 10);
                assert!(!perfect);
                assert_eq!(distance_to_center, 30.0);
            }
            other => panic!("expected hit, got {:?}", other),
        }
    }

    #[test]
    fn test_perfect_near_center() {
        assert!(matches!(
            land_at(95.0, 0.0),
            LandingOutcome::Hit {
                points: 20,
                perfect: true,
                ..
            }
        ));
    }

    #[test]
    fn test_far_side_is_regular() {
        assert!(matches!(
            land_at(120.0, 0.0),
            LandingOutcome::Hit { points: 10, .. }
        ));
    }

    #[test]
    fn test_all_edges_inclusive() {
        for (x, z) in [(70.0, 0.0), (130.0, 0.0), (100.0, -30.0), (100.0, 30.0), (130.0, 30.0)] {
            assert!(
                matches!(land_at(x, z), LandingOutcome::Hit { .. }),
                "({}, {}) should land",
                x,
                z
            );
        }
    }

    #[test]
    fn test_overshoot_misses() {
        assert_eq!(land_at(140.0, 0.0), LandingOutcome::Miss);
        assert_eq!(land_at(100.0, 30.5), LandingOutcome::Miss);
        assert_eq!(land_at(50.0, 0.0), LandingOutcome::Miss);
    }

    #[test]
    fn test_source_platform_wins_overlap() {
        let current = platform(1, 0.0, 0.0);
        let target = platform(2, 40.0, 0.0);
        let outcome = evaluate_landing(Vec2::new(28.0, 0.0), &current, &target, 10.0);
        assert_eq!(outcome, LandingOutcome::InPlace);
    }

    #[test]
    fn test_exactly_perfect_range_is_regular() {
        assert_eq!(landing_points(10.0, 10.0), 10);
        assert_eq!(landing_points(9.999, 10.0), 20);
    }

    proptest! {
        #[test]
        fn points_are_ten_or_twenty(x in 70.0f32..=130.0, z in -30.0f32..=30.0) {
            match land_at(x, z) {
                LandingOutcome::Hit { points, distance_to_center, .. } => {
                    prop_assert!(points == 10 || points == 20);
                    prop_assert_eq!(points == 20, distance_to_center < 10.0);
                }
                other => prop_assert!(false, "expected hit, got {:?}", other),
            }
        }
    }
}
