//! Concyclic / collinear decision for four stones.

use crate::{FloatPoint, Line, Point};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Absolute tolerance on the difference between two radii.
pub const RADIUS_TOLERANCE: f64 = 1e-7;

/// The figure four stones share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case", tag = "kind")]
#[strum(serialize_all = "snake_case")]
pub enum KyouenShape {
    /// All four stones lie on one circle.
    Oval {
        /// Circle center.
        center: FloatPoint,
        /// Circle radius.
        radius: f64,
    },
    /// All four stones lie on one straight line.
    Line {
        /// The line through the first two stones.
        line: Line,
    },
}

/// Four stones forming a kyouen, and the figure they form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct KyouenResult {
    /// The four stones, in the order they were tested.
    points: [Point; 4],
    /// Circle or line through them.
    shape: KyouenShape,
}

impl KyouenResult {
    /// Returns `true` for a line kyouen.
    pub fn is_line(&self) -> bool {
        matches!(self.shape, KyouenShape::Line { .. })
    }

    /// Circle center, for an oval kyouen.
    pub fn center(&self) -> Option<FloatPoint> {
        match self.shape {
            KyouenShape::Oval { center, .. } => Some(center),
            KyouenShape::Line { .. } => None,
        }
    }

    /// Circle radius, for an oval kyouen.
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            KyouenShape::Oval { radius, .. } => Some(radius),
            KyouenShape::Line { .. } => None,
        }
    }

    /// The common line, for a line kyouen.
    pub fn line(&self) -> Option<&Line> {
        match &self.shape {
            KyouenShape::Line { line } => Some(line),
            KyouenShape::Oval { .. } => None,
        }
    }
}

impl std::fmt::Display for KyouenResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [p1, p2, p3, p4] = self.points;
        write!(f, "{} kyouen {p1} {p2} {p3} {p4}", self.shape)?;
        match self.shape {
            KyouenShape::Oval { center, radius } => write!(f, " center={center} radius={radius}"),
            KyouenShape::Line { line } => write!(f, " line: {line}"),
        }
    }
}

/// Decides whether `p1..p4` lie on a common circle or line.
///
/// The circle candidate is the intersection of the perpendicular
/// bisectors of `p1p2` and `p2p3`; the stones are concyclic when `p4`
/// lies at the same distance from it as `p1`, within
/// [`RADIUS_TOLERANCE`].
///
/// When `p1, p2, p3` are collinear the quadruple only counts if `p2, p3,
/// p4` are collinear too. Other groupings are not retried, so the result
/// depends on argument order.
pub fn check_kyouen(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<KyouenResult> {
    let fp1 = FloatPoint::from(p1);
    let fp2 = FloatPoint::from(p2);
    let fp3 = FloatPoint::from(p3);
    let fp4 = FloatPoint::from(p4);

    let l12 = Line::perpendicular_bisector(fp1, fp2);
    let l23 = Line::perpendicular_bisector(fp2, fp3);

    let shape = match l12.intersection(&l23) {
        None => {
            let l34 = Line::perpendicular_bisector(fp3, fp4);
            match l23.intersection(&l34) {
                None => KyouenShape::Line {
                    line: Line::new(fp1, fp2),
                },
                Some(_) => return None,
            }
        }
        Some(center) => {
            let d1 = fp1.distance(center);
            let d4 = fp4.distance(center);
            if (d1 - d4).abs() < RADIUS_TOLERANCE {
                KyouenShape::Oval { center, radius: d1 }
            } else {
                return None;
            }
        }
    };

    Some(KyouenResult {
        points: [p1, p2, p3, p4],
        shape,
    })
}
