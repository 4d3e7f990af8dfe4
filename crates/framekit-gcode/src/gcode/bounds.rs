//! Bounding-box accumulation
//!
//! Straight moves are bounded by their endpoints. Arcs are bounded by their
//! endpoints plus whichever of the circle's four cardinal extreme points lie
//! inside the swept angle.

use framekit_core::Point2D;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use tracing::trace;

use super::interpreter::{MoveKind, ResolvedMove};

/// Axis-aligned XY rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Box that contains nothing yet
    pub fn empty() -> Self {
        Self {
            min: Point2D::new(f64::INFINITY, f64::INFINITY),
            max: Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_corners(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// True until the first point is included
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn include(&mut self, point: Point2D) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Widen the box to cover a resolved move
    pub fn include_move(&mut self, motion: &ResolvedMove) {
        self.include(motion.start);
        self.include(motion.end);

        if let MoveKind::Arc { center, clockwise } = motion.kind {
            for extreme in arc_extremes(motion.start, motion.end, center, clockwise) {
                trace!("Arc extreme {} inside sweep", extreme);
                self.include(extreme);
            }
        }
    }

    /// Replace the empty sentinel with a zero-size box at the origin
    pub fn finalize(self) -> Self {
        if self.is_empty() {
            Self::from_corners(Point2D::ORIGIN, Point2D::ORIGIN)
        } else {
            self
        }
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }
}

/// Normalize an angle into `[0, 2π)`
fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Angle of `point` around `center`, counter-clockwise from +X, in `[0, 2π)`
fn angle_around(center: Point2D, point: Point2D) -> f64 {
    normalize_angle((point.y - center.y).atan2(point.x - center.x))
}

/// Whether `theta` lies on the sweep from `start` to `end`.
///
/// All angles are in `[0, 2π)`. Equal start and end angles describe a full
/// circle. The far end of the sweep is unwrapped past 2π, and `theta` is
/// tested both as given and one turn later so extremes beyond the 0/2π seam
/// are found.
pub fn sweep_contains(start: f64, end: f64, theta: f64, clockwise: bool) -> bool {
    let (low, high) = if clockwise {
        let start = if start <= end { start + TAU } else { start };
        (end, start)
    } else {
        let end = if end <= start { end + TAU } else { end };
        (start, end)
    };

    let within = |angle: f64| low <= angle && angle <= high;
    within(theta) || within(theta + TAU)
}

/// Cardinal extreme points of an arc's circle that fall inside its sweep
pub fn arc_extremes(
    start: Point2D,
    end: Point2D,
    center: Point2D,
    clockwise: bool,
) -> Vec<Point2D> {
    let radius = start.distance_to(center);
    if radius <= 0.0 || !radius.is_finite() {
        // Start sits on the center: the arc collapses to a point already included
        return Vec::new();
    }

    let start_angle = angle_around(center, start);
    let end_angle = angle_around(center, end);

    let cardinals = [
        (Point2D::new(center.x + radius, center.y), 0.0),
        (Point2D::new(center.x, center.y + radius), FRAC_PI_2),
        (Point2D::new(center.x - radius, center.y), PI),
        (Point2D::new(center.x, center.y - radius), 3.0 * FRAC_PI_2),
    ];

    cardinals
        .into_iter()
        .filter(|&(_, theta)| sweep_contains(start_angle, end_angle, theta, clockwise))
        .map(|(point, _)| point)
        .collect()
}
