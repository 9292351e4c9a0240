//! Straight lines through two points, in `a·x + b·y + c = 0` form.

use crate::FloatPoint;
use serde::{Deserialize, Serialize};

/// A line through two points.
///
/// The two defining points are kept alongside the coefficients because
/// intersection works on the direction vector `p2 - p1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    p1: FloatPoint,
    p2: FloatPoint,
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Creates the line through `p1` and `p2`.
    pub fn new(p1: FloatPoint, p2: FloatPoint) -> Self {
        let a = p1.y() - p2.y();
        let b = p2.x() - p1.x();
        let c = p1.x() * p2.y() - p2.x() * p1.y();
        Self { p1, p2, a, b, c }
    }

    /// Perpendicular bisector of the segment `p1`–`p2`.
    ///
    /// Built from the midpoint and the midpoint shifted by the difference
    /// vector rotated by 90°.
    pub fn perpendicular_bisector(p1: FloatPoint, p2: FloatPoint) -> Self {
        let midpoint = p1.midpoint(p2);
        let diff = p1 - p2;
        let gradient = FloatPoint::new(diff.y(), -diff.x());
        Self::new(midpoint, midpoint + gradient)
    }

    /// Intersection with `other`, or `None` when the lines are parallel
    /// or coincident.
    ///
    /// The determinant test is exact: only a determinant of `0.0` counts
    /// as parallel.
    pub fn intersection(&self, other: &Line) -> Option<FloatPoint> {
        let f1 = self.p2.x() - self.p1.x();
        let g1 = self.p2.y() - self.p1.y();
        let f2 = other.p2.x() - other.p1.x();
        let g2 = other.p2.y() - other.p1.y();

        let det = f2 * g1 - f1 * g2;
        if det == 0.0 {
            return None;
        }

        let dx = other.p1.x() - self.p1.x();
        let dy = other.p1.y() - self.p1.y();
        let t1 = (f2 * dy - g2 * dx) / det;

        Some(FloatPoint::new(self.p1.x() + f1 * t1, self.p1.y() + g1 * t1))
    }

    /// Coefficient of `x`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Coefficient of `y`.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Constant term.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Returns `true` if `p` satisfies `a·x + b·y + c = 0` exactly.
    pub fn contains(&self, p: FloatPoint) -> bool {
        self.a * p.x() + self.b * p.y() + self.c == 0.0
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x + {}y + {} = 0", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let line = Line::new(FloatPoint::new(0.0, 2.0), FloatPoint::new(2.0, 2.0));
        assert_eq!(line.a(), 0.0);
        assert_eq!(line.b(), 2.0);
        assert_eq!(line.c(), -4.0);
        assert!(line.contains(FloatPoint::new(5.0, 2.0)));
    }

    #[test]
    fn test_bisectors_meet_at_circumcenter() {
        let p1 = FloatPoint::new(0.0, 0.0);
        let p2 = FloatPoint::new(2.0, 0.0);
        let p3 = FloatPoint::new(0.0, 2.0);
        let l12 = Line::perpendicular_bisector(p1, p2);
        let l23 = Line::perpendicular_bisector(p2, p3);
        assert_eq!(l12.intersection(&l23), Some(FloatPoint::new(1.0, 1.0)));
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let l1 = Line::new(FloatPoint::new(0.0, 0.0), FloatPoint::new(1.0, 1.0));
        let l2 = Line::new(FloatPoint::new(0.0, 1.0), FloatPoint::new(1.0, 2.0));
        assert_eq!(l1.intersection(&l2), None);
    }
}
