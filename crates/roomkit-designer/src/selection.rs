//! Selection state.
//!
//! A selection is one of five exclusive kinds. Area and free selections own a
//! snapshot of their cell keys plus a pending drag offset; wall and door
//! selections only hold an id.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use roomkit_core::{Bounds, CellKey, Point, OFFSET_EPSILON};

use crate::grid::Grid;
use crate::segments::{Segment, SegmentId, SegmentStore};

/// Kind tag of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    None,
    Area,
    Free,
    Wall,
    Door,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Area => write!(f, "Area"),
            Self::Free => write!(f, "Free"),
            Self::Wall => write!(f, "Wall"),
            Self::Door => write!(f, "Door"),
        }
    }
}

/// A connected region plus the walls and doors inside its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSelection {
    pub cells: Vec<CellKey>,
    pub walls: Vec<Segment>,
    pub doors: Vec<Segment>,
    pub bounds: Bounds,
    /// Pending drag offset, zero when not moving.
    pub offset: Point,
    /// Cell unit when the selection was built.
    pub unit: f64,
}

impl AreaSelection {
    /// Builds the selection for `cells`, capturing every segment whose
    /// endpoints both fall inside the cells' bounding box.
    pub fn capture(
        cells: Vec<CellKey>,
        grid: &Grid,
        walls: &SegmentStore,
        doors: &SegmentStore,
    ) -> Self {
        let bounds = grid.bounds_of(cells.iter());
        Self {
            walls: walls.within(&bounds),
            doors: doors.within(&bounds),
            cells,
            bounds,
            offset: Point::ORIGIN,
            unit: grid.unit(),
        }
    }

    pub fn wall_ids(&self) -> HashSet<SegmentId> {
        self.walls.iter().map(|s| s.id).collect()
    }

    pub fn door_ids(&self) -> HashSet<SegmentId> {
        self.doors.iter().map(|s| s.id).collect()
    }
}

/// A user-painted set of cells, possibly disconnected.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSelection {
    pub cells: Vec<CellKey>,
    pub bounds: Bounds,
    pub offset: Point,
    pub unit: f64,
}

impl FreeSelection {
    pub fn new(cells: Vec<CellKey>, grid: &Grid) -> Self {
        let bounds = grid.bounds_of(cells.iter());
        Self {
            cells,
            bounds,
            offset: Point::ORIGIN,
            unit: grid.unit(),
        }
    }
}

/// Current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Area(AreaSelection),
    Free(FreeSelection),
    Wall(SegmentId),
    Door(SegmentId),
}

impl Selection {
    pub fn kind(&self) -> SelectionKind {
        match self {
            Self::None => SelectionKind::None,
            Self::Area(_) => SelectionKind::Area,
            Self::Free(_) => SelectionKind::Free,
            Self::Wall(_) => SelectionKind::Wall,
            Self::Door(_) => SelectionKind::Door,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Cell keys owned by an area or free selection.
    pub fn cell_keys(&self) -> &[CellKey] {
        match self {
            Self::Area(area) => &area.cells,
            Self::Free(free) => &free.cells,
            _ => &[],
        }
    }

    /// Cell keys as a set, for render highlighting.
    pub fn cell_set(&self) -> BTreeSet<CellKey> {
        self.cell_keys().iter().copied().collect()
    }

    /// Area and free selections accept textures.
    pub fn allows_texture(&self) -> bool {
        matches!(self, Self::Area(_) | Self::Free(_))
    }

    /// Pending drag offset of an area selection.
    pub fn offset(&self) -> Point {
        match self {
            Self::Area(area) => area.offset,
            Self::Free(free) => free.offset,
            _ => Point::ORIGIN,
        }
    }

    /// True when `point` hits the offset bounds of an area selection.
    pub fn area_contains(&self, point: Point) -> bool {
        match self {
            Self::Area(area) => area.bounds.contains_with_offset(point, area.offset),
            _ => false,
        }
    }

    pub fn selected_wall(&self) -> Option<SegmentId> {
        match self {
            Self::Wall(id) => Some(*id),
            _ => None,
        }
    }

    pub fn selected_door(&self) -> Option<SegmentId> {
        match self {
            Self::Door(id) => Some(*id),
            _ => None,
        }
    }

    /// True when a wall is highlighted, directly or as part of an area.
    pub fn highlights_wall(&self, id: SegmentId) -> bool {
        match self {
            Self::Wall(selected) => *selected == id,
            Self::Area(area) => area.walls.iter().any(|s| s.id == id),
            _ => false,
        }
    }

    /// True when a door is highlighted, directly or as part of an area.
    pub fn highlights_door(&self, id: SegmentId) -> bool {
        match self {
            Self::Door(selected) => *selected == id,
            Self::Area(area) => area.doors.iter().any(|s| s.id == id),
            _ => false,
        }
    }

    /// True when the selection refers to state that no longer exists.
    ///
    /// Cell selections go stale when the unit changes or any key is gone;
    /// wall and door selections when their id is gone.
    pub fn is_stale(&self, grid: &Grid, walls: &SegmentStore, doors: &SegmentStore) -> bool {
        let cells_stale = |cells: &[CellKey], unit: f64| {
            (unit - grid.unit()).abs() > OFFSET_EPSILON
                || cells.iter().any(|key| !grid.contains(key))
        };
        match self {
            Self::None => false,
            Self::Area(area) => {
                cells_stale(&area.cells, area.unit)
                    || area.walls.iter().any(|s| !walls.contains_id(s.id))
                    || area.doors.iter().any(|s| !doors.contains_id(s.id))
            }
            Self::Free(free) => cells_stale(&free.cells, free.unit),
            Self::Wall(id) => !walls.contains_id(*id),
            Self::Door(id) => !doors.contains_id(*id),
        }
    }

    /// Short label for the inspector, e.g. `"Area (4 blocks)"`.
    pub fn label(&self) -> String {
        match self {
            Self::None => "Nothing selected".to_string(),
            Self::Area(area) => format!("Area ({} blocks)", area.cells.len()),
            Self::Free(free) => format!("Free selection ({} blocks)", free.cells.len()),
            Self::Wall(_) => "Wall".to_string(),
            Self::Door(_) => "Door".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::SegmentKind;

    fn setup() -> (Grid, SegmentStore, SegmentStore) {
        let mut grid = Grid::new(1.0);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0)] {
            grid.insert(CellKey::new(x, y));
        }
        let walls = SegmentStore::new(SegmentKind::Wall)
            .with_added(Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0)))
            .unwrap()
            .with_added(Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 3.0)))
            .unwrap();
        (grid, walls, SegmentStore::new(SegmentKind::Door))
    }

    #[test]
    fn test_area_capture_uses_bounds() {
        let (grid, walls, doors) = setup();
        let cells = grid.connected_from(CellKey::new(0.0, 0.0));
        let area = AreaSelection::capture(cells, &grid, &walls, &doors);
        assert_eq!(area.cells.len(), 2);
        assert_eq!(area.walls.len(), 1);
        assert_eq!(area.bounds.width, 2.0);
        assert_eq!(area.bounds.height, 1.0);
    }

    #[test]
    fn test_area_contains_follows_offset() {
        let (grid, walls, doors) = setup();
        let mut area = AreaSelection::capture(vec![CellKey::new(0.0, 0.0)], &grid, &walls, &doors);
        area.offset = Point::new(3.0, 0.0);
        let selection = Selection::Area(area);
        assert!(!selection.area_contains(Point::new(0.5, 0.5)));
        assert!(selection.area_contains(Point::new(3.5, 0.5)));
    }

    #[test]
    fn test_staleness() {
        let (mut grid, walls, doors) = setup();
        let selection = Selection::Free(FreeSelection::new(vec![CellKey::new(1.0, 0.0)], &grid));
        assert!(!selection.is_stale(&grid, &walls, &doors));
        grid.remove(&CellKey::new(1.0, 0.0));
        assert!(selection.is_stale(&grid, &walls, &doors));

        let wall = walls.iter().next().map(|s| s.id).unwrap();
        assert!(!Selection::Wall(wall).is_stale(&grid, &walls, &doors));
        assert!(Selection::Door(wall).is_stale(&grid, &walls, &doors));
    }

    #[test]
    fn test_kind_capabilities() {
        assert!(!Selection::None.allows_texture());
        assert_eq!(Selection::default().kind(), SelectionKind::None);
        assert_eq!(SelectionKind::Area.to_string(), "Area");
        assert!(Selection::None.cell_keys().is_empty());
    }
}
