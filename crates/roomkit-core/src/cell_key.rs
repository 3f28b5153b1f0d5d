//! Canonical cell keys.
//!
//! A cell is addressed by its bottom-left corner. Coordinates are stored
//! already normalized (six decimal digits, no negative zero) so that equal
//! values always hash and order identically, no matter how they were
//! computed. The text form is
//! `"x,y"` with the shortest decimal representation of each coordinate
//! (`"0.5,-2"`), which is also the serialized form.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeyError;
use crate::geometry::{normalize_coord, Point, OFFSET_EPSILON};

/// Canonical key of one grid cell.
///
/// Equality, hashing and ordering work on the bit pattern of the normalized
/// coordinates, ordered by `f64::total_cmp` (x first, then y).
#[derive(Debug, Clone, Copy)]
pub struct CellKey {
    x: f64,
    y: f64,
}

impl PartialEq for CellKey {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for CellKey {}

impl Hash for CellKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CellKey {
    /// Builds a key from world coordinates, rounding to the fixed precision.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: normalize_coord(x),
            y: normalize_coord(y),
        }
    }

    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Bottom-left corner of the cell.
    pub fn origin(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Key of the cell shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x() + dx, self.y() + dy)
    }

    /// The four edge neighbours at `unit`: right, left, up, down.
    pub fn neighbors(&self, unit: f64) -> [CellKey; 4] {
        [
            self.offset(unit, 0.0),
            self.offset(-unit, 0.0),
            self.offset(0.0, unit),
            self.offset(0.0, -unit),
        ]
    }

    /// Origin of the `target`-sized block containing this cell.
    pub fn group_base(&self, target: f64) -> Self {
        Self::new(
            ((self.x() + OFFSET_EPSILON) / target).floor() * target,
            ((self.y() + OFFSET_EPSILON) / target).floor() * target,
        )
    }

    /// True when both coordinates are multiples of `unit`.
    pub fn is_aligned_to(&self, unit: f64) -> bool {
        self.origin().is_aligned_to(unit)
    }
}

impl From<Point> for CellKey {
    fn from(p: Point) -> Self {
        Self::from_point(p)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display already prints the shortest round-trip form ("1", "0.5").
        write!(f, "{},{}", self.x(), self.y())
    }
}

impl FromStr for CellKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            tracing::debug!("Malformed cell key {:?}", s);
            KeyError::Malformed { key: s.to_string() }
        };
        let (xs, ys) = s.split_once(',').ok_or_else(malformed)?;
        let x: f64 = xs.trim().parse().map_err(|_| malformed())?;
        let y: f64 = ys.trim().parse().map_err(|_| malformed())?;
        if !x.is_finite() || !y.is_finite() {
            tracing::debug!("Non-finite cell key {:?}", s);
            return Err(KeyError::NonFinite { key: s.to_string() });
        }
        Ok(CellKey::new(x, y))
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Encodes a coordinate pair as its canonical key text.
pub fn encode(x: f64, y: f64) -> String {
    CellKey::new(x, y).to_string()
}

/// Parses key text back into rounded coordinates.
pub fn decode(key: &str) -> Result<(f64, f64), KeyError> {
    let key: CellKey = key.parse()?;
    Ok((key.x(), key.y()))
}
