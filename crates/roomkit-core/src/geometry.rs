//! Point and segment math.
//!
//! Everything in here is stateless. Coordinates are world units where one
//! unit is one full grid cell at unit 1.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing grid coordinates and offsets.
pub const OFFSET_EPSILON: f64 = 1e-6;

/// Minimum length of a wall or door segment.
pub const SEGMENT_EPSILON: f64 = 1e-4;

/// Number of decimal digits kept by [`normalize_coord`].
pub const PRECISION_DIGITS: u32 = 6;

const PRECISION_SCALE: f64 = 1_000_000.0;

/// Magnitude beyond which every f64 already has at most
/// [`PRECISION_DIGITS`] decimals (2^53 / 10^6).
const PRECISION_LIMIT: f64 = 9_007_199_254.740_992;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns the point moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Returns both coordinates rounded to the fixed precision.
    pub fn normalized(&self) -> Point {
        Point::new(normalize_coord(self.x), normalize_coord(self.y))
    }

    /// Expresses this point relative to `origin`, rounded to the fixed precision.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(
            normalize_coord(self.x - origin.x),
            normalize_coord(self.y - origin.y),
        )
    }

    /// True when both coordinates are integer multiples of `unit`.
    pub fn is_aligned_to(&self, unit: f64) -> bool {
        is_multiple_of_unit(self.x, unit) && is_multiple_of_unit(self.y, unit)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Rounds a coordinate to [`PRECISION_DIGITS`] decimals and folds `-0` into `0`.
///
/// Values at or above [`PRECISION_LIMIT`] in magnitude are returned as is,
/// since scaling them could overflow and rounding cannot change them.
pub fn normalize_coord(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= PRECISION_LIMIT {
        return value;
    }
    let rounded = (value * PRECISION_SCALE).round() / PRECISION_SCALE;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn segment_length(start: Point, end: Point) -> f64 {
    start.distance_to(&end)
}

/// A segment is valid when it is longer than [`SEGMENT_EPSILON`].
pub fn is_segment_valid(start: Point, end: Point) -> bool {
    segment_length(start, end) > SEGMENT_EPSILON
}

/// Shortest distance from `point` to the segment `start..end`.
///
/// Degenerate segments fall back to the distance to `start`.
pub fn distance_point_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= SEGMENT_EPSILON * SEGMENT_EPSILON {
        return point.distance_to(&start);
    }
    let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq;
    let t = t.clamp(0.0, 1.0);
    let projected = Point::new(start.x + t * dx, start.y + t * dy);
    point.distance_to(&projected)
}

pub fn is_multiple_of_unit(value: f64, unit: f64) -> bool {
    if unit <= 0.0 {
        return false;
    }
    let ratio = value / unit;
    (ratio - ratio.round()).abs() <= OFFSET_EPSILON
}

/// Floors `value` to the nearest lower multiple of `step`.
///
/// Values within [`OFFSET_EPSILON`] below a multiple count as that multiple.
pub fn snap_down(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return normalize_coord(value);
    }
    normalize_coord(((value + OFFSET_EPSILON) / step).floor() * step)
}

/// Rounds `value` to the nearest multiple of `step`.
pub fn snap_nearest(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return normalize_coord(value);
    }
    normalize_coord((value / step).round() * step)
}

/// Bounding box of a set of cells.
///
/// `min_*`/`max_*` are the origins of the extreme cells, `width`/`height`
/// include the extent of the last cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Builds the bounds of cells whose origins are `origins`, each `unit` wide.
    ///
    /// An empty iterator yields the zero bounds.
    pub fn from_cell_origins<I>(origins: I, unit: f64) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in origins {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if !min_x.is_finite() || !min_y.is_finite() || !max_x.is_finite() || !max_y.is_finite() {
            return Self::default();
        }

        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: normalize_coord(max_x - min_x + unit),
            height: normalize_coord(max_y - min_y + unit),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Closed containment test against the full extent.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x
            && p.x <= self.min_x + self.width
            && p.y >= self.min_y
            && p.y <= self.min_y + self.height
    }

    /// Half-open containment test, shifted by `offset`, used for pointer hits.
    pub fn contains_with_offset(&self, p: Point, offset: Point) -> bool {
        let min_x = self.min_x + offset.x;
        let min_y = self.min_y + offset.y;
        p.x >= min_x - OFFSET_EPSILON
            && p.x < min_x + self.width + OFFSET_EPSILON
            && p.y >= min_y - OFFSET_EPSILON
            && p.y < min_y + self.height + OFFSET_EPSILON
    }
}
