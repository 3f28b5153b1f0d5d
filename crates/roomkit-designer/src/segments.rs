//! Wall and door segments.
//!
//! Walls and doors are free-standing line segments in world coordinates. They
//! live in two separate [`SegmentStore`]s that share validity and
//! de-duplication rules: a segment must be longer than
//! [`SEGMENT_EPSILON`](roomkit_core::SEGMENT_EPSILON) and no two segments of
//! the same store may join the same (unordered) pair of endpoints.

use std::collections::HashSet;
use std::fmt;

use im::Vector;
use roomkit_core::{
    distance_point_to_segment, is_segment_valid, segment_length, Bounds, EditError, Point,
    SEGMENT_EPSILON,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a wall or door.
pub type SegmentId = Uuid;

/// A directed line segment with a stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Creates a segment with a fresh id.
    pub fn new(start: Point, end: Point) -> Self {
        Self::with_id(Uuid::new_v4(), start, end)
    }

    pub fn with_id(id: SegmentId, start: Point, end: Point) -> Self {
        Self { id, start, end }
    }

    pub fn length(&self) -> f64 {
        segment_length(self.start, self.end)
    }

    pub fn is_valid(&self) -> bool {
        is_segment_valid(self.start, self.end)
    }

    /// Orientation-independent identity of the endpoints.
    ///
    /// Endpoints are ordered by x, then y, and printed with four decimals,
    /// so `(0,0)->(2,0)` and `(2,0)->(0,0)` share one key.
    pub fn canonical_key(&self) -> String {
        let (a, b) = if (self.start.x, self.start.y) <= (self.end.x, self.end.y) {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        // `+ 0.0` folds -0 so it prints like 0.
        format!(
            "{:.4},{:.4}|{:.4},{:.4}",
            a.x + 0.0,
            a.y + 0.0,
            b.x + 0.0,
            b.y + 0.0
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            id: self.id,
            start: self.start.translated(dx, dy),
            end: self.end.translated(dx, dy),
        }
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        distance_point_to_segment(point, self.start, self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    /// True when both endpoints lie inside `bounds` (edges included).
    pub fn is_within(&self, bounds: &Bounds) -> bool {
        bounds.contains(self.start) && bounds.contains(self.end)
    }

    pub fn is_aligned_to(&self, unit: f64) -> bool {
        self.start.is_aligned_to(unit) && self.end.is_aligned_to(unit)
    }

    pub fn orientation(&self) -> DoorOrientation {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        if dy.abs() <= SEGMENT_EPSILON {
            DoorOrientation::Horizontal
        } else if dx.abs() <= SEGMENT_EPSILON {
            DoorOrientation::Vertical
        } else {
            DoorOrientation::Diagonal
        }
    }
}

/// Display classification of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorOrientation {
    Horizontal,
    Vertical,
    Diagonal,
}

impl fmt::Display for DoorOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
            Self::Diagonal => write!(f, "Diagonal"),
        }
    }
}

/// Which collection a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Wall,
    Door,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall => write!(f, "Wall"),
            Self::Door => write!(f, "Door"),
        }
    }
}

/// Ordered, persistent collection of walls or doors.
///
/// Cloning is cheap; every "modifying" method returns a new store.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStore {
    kind: SegmentKind,
    items: Vector<Segment>,
}

impl SegmentStore {
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            items: Vector::new(),
        }
    }

    /// Builds a store from raw segments without any cleanup.
    pub fn from_segments<I>(kind: SegmentKind, segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        Self {
            kind,
            items: segments.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<Segment> {
        self.items.iter().cloned().collect()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn contains_id(&self, id: SegmentId) -> bool {
        self.get(id).is_some()
    }

    /// True when a stored segment joins the same endpoints as `candidate`.
    pub fn contains_endpoints(&self, candidate: &Segment) -> bool {
        let key = candidate.canonical_key();
        self.items.iter().any(|s| s.canonical_key() == key)
    }

    /// Drops invalid segments and later duplicates, keeping first occurrences.
    pub fn sanitized(&self) -> Self {
        let mut seen = HashSet::new();
        let items = self
            .items
            .iter()
            .filter(|s| s.is_valid() && seen.insert(s.canonical_key()))
            .cloned()
            .collect();
        Self {
            kind: self.kind,
            items,
        }
    }

    /// Drops invalid segments only.
    pub fn without_invalid(&self) -> Self {
        Self {
            kind: self.kind,
            items: self.items.iter().filter(|s| s.is_valid()).cloned().collect(),
        }
    }

    /// The cleanup applied before a store is committed.
    ///
    /// Walls are fully sanitized; doors only lose zero-length entries.
    pub fn settled(&self) -> Self {
        match self.kind {
            SegmentKind::Wall => self.sanitized(),
            SegmentKind::Door => self.without_invalid(),
        }
    }

    /// Returns a store with `candidate` appended.
    ///
    /// Rejects zero-length candidates and candidates that duplicate stored
    /// endpoints.
    pub fn with_added(&self, candidate: Segment) -> Result<Self, EditError> {
        if !candidate.is_valid() {
            return Err(EditError::invalid_geometry(self.kind.to_string()));
        }
        if self.contains_endpoints(&candidate) {
            return Err(EditError::duplicate_geometry(self.kind.to_string()));
        }
        let mut items = self.items.clone();
        items.push_back(candidate);
        Ok(Self {
            kind: self.kind,
            items,
        }
        .settled())
    }

    /// Returns a sanitized store without the segment `id`.
    pub fn with_removed(&self, id: SegmentId) -> Result<Self, EditError> {
        if !self.contains_id(id) {
            return Err(EditError::stale(format!(
                "This {} was already removed",
                self.kind.to_string().to_lowercase()
            )));
        }
        Ok(self.without_ids(&HashSet::from([id])).sanitized())
    }

    /// Store with every segment whose id is in `ids` dropped.
    pub fn without_ids(&self, ids: &HashSet<SegmentId>) -> Self {
        Self {
            kind: self.kind,
            items: self
                .items
                .iter()
                .filter(|s| !ids.contains(&s.id))
                .cloned()
                .collect(),
        }
    }

    /// Store with `extra` appended after the existing segments.
    pub fn extended<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut items = self.items.clone();
        items.extend(extra);
        Self {
            kind: self.kind,
            items,
        }
    }

    /// Segments whose endpoints both fall within `bounds`.
    pub fn within(&self, bounds: &Bounds) -> Vec<Segment> {
        self.items
            .iter()
            .filter(|s| s.is_within(bounds))
            .cloned()
            .collect()
    }

    /// Closest segment to `point` no farther than `tolerance`.
    pub fn nearest_at(&self, point: Point, tolerance: f64) -> Option<&Segment> {
        let mut closest: Option<(&Segment, f64)> = None;
        for segment in self.items.iter() {
            let distance = segment.distance_to(point);
            if distance <= tolerance && closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((segment, distance));
            }
        }
        closest.map(|(segment, _)| segment)
    }

    /// True when every endpoint is a multiple of `unit`.
    pub fn all_aligned_to(&self, unit: f64) -> bool {
        self.items.iter().all(|s| s.is_aligned_to(unit))
    }
}
