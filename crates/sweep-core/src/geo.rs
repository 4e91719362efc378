//! Continuous building coordinates.
//!
//! `Point` is a plan-view position in metres.  Responders move in continuous
//! space; the grid maps points to cells (see `sweep-grid`).

use serde::{Deserialize, Serialize};

/// A plan-view position in metres, `x` to the east and `y` to the south.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move at most `max_step` metres towards `target`.
    ///
    /// Returns the new position and the distance actually covered.  Never
    /// overshoots: if `target` is closer than `max_step` the result is
    /// exactly `target`.
    pub fn step_towards(self, target: Point, max_step: f32) -> (Point, f32) {
        let d = self.distance(target);
        if d <= max_step || d <= f32::EPSILON {
            return (target, d);
        }
        let t = max_step / d;
        let next = Point::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        );
        (next, max_step)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
