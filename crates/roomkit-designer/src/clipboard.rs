//! Origin-normalized clipboard payload for area copy/paste.

use roomkit_core::{normalize_coord, CellKey, Point};

use crate::selection::AreaSelection;
use crate::segments::Segment;

/// Copied area, expressed relative to its bounding-box minimum corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    pub width: f64,
    pub height: f64,
    /// Cell unit at copy time.
    pub unit: f64,
    /// Cell origins relative to the bounding box.
    pub cells: Vec<Point>,
    pub walls: Vec<(Point, Point)>,
    pub doors: Vec<(Point, Point)>,
}

impl Clipboard {
    /// Captures an area selection.
    pub fn from_area(area: &AreaSelection) -> Self {
        let origin = area.bounds.origin();
        let relative = |s: &Segment| (s.start.relative_to(origin), s.end.relative_to(origin));
        Self {
            width: area.bounds.width,
            height: area.bounds.height,
            unit: area.unit,
            cells: area
                .cells
                .iter()
                .map(|key| key.origin().relative_to(origin))
                .collect(),
            walls: area.walls.iter().map(relative).collect(),
            doors: area.doors.iter().map(relative).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.walls.is_empty() && self.doors.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Absolute cell keys with the payload placed at `origin`.
    pub fn cells_at(&self, origin: Point) -> Vec<CellKey> {
        self.cells
            .iter()
            .map(|p| CellKey::new(origin.x + p.x, origin.y + p.y))
            .collect()
    }

    /// Absolute segments at `origin`, each with a fresh id.
    pub fn walls_at(&self, origin: Point) -> Vec<Segment> {
        Self::segments_at(&self.walls, origin)
    }

    pub fn doors_at(&self, origin: Point) -> Vec<Segment> {
        Self::segments_at(&self.doors, origin)
    }

    fn segments_at(segments: &[(Point, Point)], origin: Point) -> Vec<Segment> {
        segments
            .iter()
            .map(|(start, end)| Segment::new(place(*start, origin), place(*end, origin)))
            .collect()
    }
}

fn place(relative: Point, origin: Point) -> Point {
    Point::new(
        normalize_coord(origin.x + relative.x),
        normalize_coord(origin.y + relative.y),
    )
}
