//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D world position (simulation units, y grows downward as authored).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Facing angle in radians. The craft art is authored pointing "up",
/// so an angle of zero faces (0, -1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Squared distance to another position.
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        self.0.distance_squared(other.0)
    }
}

/// Ship-forward unit vector for a given heading.
pub fn forward(angle: f64) -> DVec2 {
    DVec2::new(angle.sin(), -angle.cos())
}

/// Ship-lateral (rightward) unit vector for a given heading.
pub fn lateral(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Squared distance from `point` to the segment `a`..`b`.
pub fn point_segment_distance_sq(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return point.distance_squared(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance_squared(a + ab * t)
}

/// Round timer bookkeeping.
///
/// Invariant: `elapsed + remaining == round_length` until the round ends
/// early and the clock is frozen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoundClock {
    pub elapsed: f64,
    pub remaining: f64,
}

impl RoundClock {
    pub fn new(round_seconds: f64) -> Self {
        Self {
            elapsed: 0.0,
            remaining: round_seconds,
        }
    }

    /// Advance by `dt`. Returns true once remaining time is exhausted;
    /// remaining never goes negative. Callers stop advancing a finished
    /// clock, so the completion edge fires a single transition.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}
