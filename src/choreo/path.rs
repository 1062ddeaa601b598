//! Waypoint paths.
//!
//! A piece changing squares never travels in a straight line: it lifts off,
//! slides out of the board stack, crosses open space beside the stack to
//! the destination level, slides back in and sets down. That keeps it from
//! passing through the boards in between.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Vec3};

/// Timing curve for one leg, applied by the playback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerate, then decelerate.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// One straight segment of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    /// Where the leg ends.
    pub to: Vec3,
    /// How long the leg takes.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

/// Distances and base durations used to build paths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathParams {
    /// Height a piece lifts above a square before sliding away.
    pub lift_height: f32,
    /// Distance a piece slides out of the board stack.
    pub clear_depth: f32,
    /// Duration of the lift and set-down legs, in milliseconds.
    pub lift_ms: u64,
    /// Duration of the slide legs and base of the crossing leg, in milliseconds.
    pub base_speed_ms: u64,
    /// Duration of an attack board slide, in milliseconds.
    pub board_slide_ms: u64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            lift_height: 0.6,
            clear_depth: 6.0,
            lift_ms: 200,
            base_speed_ms: 300,
            board_slide_ms: 500,
        }
    }
}

impl PathParams {
    /// Duration of the crossing leg for a vertical move from `from_y` to `to_y`.
    ///
    /// One base duration plus one more per main level crossed.
    #[must_use]
    pub fn crossing_duration(&self, from_y: f32, to_y: f32) -> Duration {
        let base = Duration::from_millis(self.base_speed_ms);
        base + base.mul_f32(geometry::levels_crossed(from_y, to_y))
    }
}

/// An ordered list of legs for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choreography {
    legs: Vec<Leg>,
}

impl Choreography {
    /// Build from explicit legs.
    #[must_use]
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// A single eased leg straight to `to`.
    #[must_use]
    pub fn direct(to: Vec3, duration: Duration) -> Self {
        Self::new(vec![Leg {
            to,
            duration,
            easing: Easing::EaseInOut,
        }])
    }

    /// The five-leg path that carries a piece from `from` to `to`.
    #[must_use]
    pub fn piece_path(from: Vec3, to: Vec3, params: &PathParams) -> Self {
        let lift = Vec3::up(params.lift_height);
        let clear = Vec3::depth(-params.clear_depth);
        let lift_time = Duration::from_millis(params.lift_ms);
        let slide_time = Duration::from_millis(params.base_speed_ms);

        let m1 = from + lift;
        let m2 = m1 + clear;
        let m4 = to + lift;
        let m3 = m4 + clear;

        Self::new(vec![
            Leg {
                to: m1,
                duration: lift_time,
                easing: Easing::Linear,
            },
            Leg {
                to: m2,
                duration: slide_time,
                easing: Easing::EaseInOut,
            },
            Leg {
                to: m3,
                duration: params.crossing_duration(from.y, to.y),
                easing: Easing::EaseInOut,
            },
            Leg {
                to: m4,
                duration: slide_time,
                easing: Easing::EaseInOut,
            },
            Leg {
                to,
                duration: lift_time,
                easing: Easing::Linear,
            },
        ])
    }

    /// The legs in order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Leg end points in order.
    pub fn waypoints(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.legs.iter().map(|leg| leg.to)
    }

    /// Leg durations in order.
    pub fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        self.legs.iter().map(|leg| leg.duration)
    }

    /// Sum of all leg durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.durations().sum()
    }

    /// Final resting point.
    #[must_use]
    pub fn destination(&self) -> Option<Vec3> {
        self.legs.last().map(|leg| leg.to)
    }

    /// Position `elapsed` into the path for an entity that started at `start`.
    #[must_use]
    pub fn sample(&self, start: Vec3, elapsed: Duration) -> Vec3 {
        let mut leg_start = start;
        let mut remaining = elapsed;
        for leg in &self.legs {
            if remaining < leg.duration {
                let t = remaining.as_secs_f32() / leg.duration.as_secs_f32();
                return leg_start.lerp(leg.to, leg.easing.apply(t));
            }
            remaining -= leg.duration;
            leg_start = leg.to;
        }
        leg_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LEVEL_HEIGHT, LEVEL_Y};

    const EPS: f32 = 1e-4;

    fn at_level(level: usize) -> Vec3 {
        Vec3::new(1.0, LEVEL_Y[level], 2.0)
    }

    #[test]
    fn test_piece_path_waypoints() {
        let params = PathParams::default();
        let from = Vec3::new(0.0, 0.0, 0.0);
        let to = Vec3::new(5.0, LEVEL_HEIGHT, 3.0);
        let path = Choreography::piece_path(from, to, &params);
        let points: Vec<Vec3> = path.waypoints().collect();

        assert_eq!(points.len(), 5);
        assert!(points[0].approx_eq(Vec3::new(0.0, 0.6, 0.0), EPS));
        assert!(points[1].approx_eq(Vec3::new(0.0, 0.6, -6.0), EPS));
        assert!(points[2].approx_eq(Vec3::new(5.0, LEVEL_HEIGHT + 0.6, -3.0), EPS));
        assert!(points[3].approx_eq(Vec3::new(5.0, LEVEL_HEIGHT + 0.6, 3.0), EPS));
        assert!(points[4].approx_eq(to, EPS));
    }

    #[test]
    fn test_piece_path_fixed_leg_durations() {
        let params = PathParams::default();
        let path = Choreography::piece_path(at_level(0), at_level(1), &params);
        let durations: Vec<Duration> = path.durations().collect();

        assert_eq!(durations[0], Duration::from_millis(200));
        assert_eq!(durations[1], Duration::from_millis(300));
        assert_eq!(durations[3], Duration::from_millis(300));
        assert_eq!(durations[4], Duration::from_millis(200));
    }

    #[test]
    fn test_crossing_leg_grows_with_levels() {
        let params = PathParams::default();
        let flat = Choreography::piece_path(at_level(0), at_level(0), &params);
        let one = Choreography::piece_path(at_level(0), at_level(1), &params);
        let two = Choreography::piece_path(at_level(0), at_level(2), &params);

        let crossing = |path: &Choreography| path.legs()[2].duration;
        assert_eq!(crossing(&flat), Duration::from_millis(300));
        assert!(crossing(&two) > crossing(&one));
        assert!(crossing(&one) > crossing(&flat));

        let expected = 0.3 + 0.3 * 2.0;
        assert!((crossing(&two).as_secs_f32() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_crossing_is_symmetric() {
        let params = PathParams::default();
        let up = Choreography::piece_path(at_level(0), at_level(2), &params);
        let down = Choreography::piece_path(at_level(2), at_level(0), &params);
        assert_eq!(up.legs()[2].duration, down.legs()[2].duration);
    }

    #[test]
    fn test_direct_is_single_leg() {
        let to = Vec3::new(1.0, 2.0, 3.0);
        let path = Choreography::direct(to, Duration::from_millis(500));
        assert_eq!(path.legs().len(), 1);
        assert_eq!(path.destination(), Some(to));
        assert_eq!(path.total_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_sample_walks_the_legs() {
        let start = Vec3::ZERO;
        let path = Choreography::new(vec![
            Leg {
                to: Vec3::new(0.0, 2.0, 0.0),
                duration: Duration::from_secs(1),
                easing: Easing::Linear,
            },
            Leg {
                to: Vec3::new(4.0, 2.0, 0.0),
                duration: Duration::from_secs(2),
                easing: Easing::Linear,
            },
        ]);

        assert!(path.sample(start, Duration::ZERO).approx_eq(start, EPS));
        assert!(path
            .sample(start, Duration::from_millis(500))
            .approx_eq(Vec3::new(0.0, 1.0, 0.0), EPS));
        assert!(path
            .sample(start, Duration::from_secs(2))
            .approx_eq(Vec3::new(2.0, 2.0, 0.0), EPS));
        assert!(path
            .sample(start, Duration::from_secs(10))
            .approx_eq(Vec3::new(4.0, 2.0, 0.0), EPS));
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert!(Easing::EaseInOut.apply(0.0).abs() < EPS);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < EPS);
        assert!((Easing::EaseInOut.apply(1.0) - 1.0).abs() < EPS);
        assert!(Easing::EaseInOut.apply(0.1) < 0.1);
    }
}
