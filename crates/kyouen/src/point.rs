//! Grid coordinates and their floating-point counterparts.

use serde::{Deserialize, Serialize};

/// A stone position on the grid.
///
/// `x` grows to the right, `y` grows downward; the row-major cell index
/// of a point is `y * size + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    x: usize,
    y: usize,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Returns the row.
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Creates the point for a row-major cell index.
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }

    /// Returns the row-major cell index of this point.
    pub const fn to_index(self, size: usize) -> usize {
        self.y * size + self.x
    }

    /// Returns `true` if both coordinates lie in `[0, size)`.
    pub const fn within(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in the continuous plane, used for geometric constructions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatPoint {
    x: f64,
    y: f64,
}

impl FloatPoint {
    /// Creates a new floating-point point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Midpoint of the segment between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let diff = self - other;
        diff.x.hypot(diff.y)
    }
}

impl std::ops::Add for FloatPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for FloatPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<Point> for FloatPoint {
    fn from(p: Point) -> Self {
        Self {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

impl std::fmt::Display for FloatPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
