//! Picking, free selection, move and delete.

use std::collections::HashSet;

use roomkit_core::{CellKey, EditError, Point, OFFSET_EPSILON};

use super::InteriorEditor;
use crate::selection::{AreaSelection, FreeSelection, Selection, SelectionKind};
use crate::segments::SegmentId;

impl InteriorEditor {
    /// Picks whatever lies under `point`: a door, then a wall, then the
    /// connected area of an occupied cell. Clears the selection when nothing
    /// is found.
    pub fn select_at(&mut self, point: Point) -> SelectionKind {
        let tolerance = self.config.pick_tolerance;

        if let Some(door) = self.state.doors.nearest_at(point, tolerance) {
            self.selection = Selection::Door(door.id);
            self.inform("Door selected. Press Delete to remove it.");
            return SelectionKind::Door;
        }

        if let Some(wall) = self.state.walls.nearest_at(point, tolerance) {
            let text = format!(
                "Wall selected ({:.2} u). Press Delete to remove it.",
                wall.length()
            );
            self.selection = Selection::Wall(wall.id);
            self.inform(text);
            return SelectionKind::Wall;
        }

        if self.select_area_at(point).is_ok() {
            return SelectionKind::Area;
        }

        self.selection = Selection::None;
        self.inform("Nothing found. Click filled blocks, doors or walls.");
        SelectionKind::None
    }

    /// Selects the connected region containing `point`. Returns its size.
    pub fn select_area_at(&mut self, point: Point) -> Result<usize, EditError> {
        let Some(seed) = self.state.grid.find_cell_at(point) else {
            return self.reject(EditError::selection_unavailable(
                "Click a filled block to select its area",
            ));
        };

        let cells = self.state.grid.connected_from(seed);
        let count = cells.len();
        self.selection = Selection::Area(AreaSelection::capture(
            cells,
            &self.state.grid,
            &self.state.walls,
            &self.state.doors,
        ));
        self.inform("Area selected. Drag to move it or press Delete to remove it.");
        Ok(count)
    }

    /// Selects the occupied cells among `keys` as a free selection.
    pub fn select_free<I>(&mut self, keys: I) -> Result<usize, EditError>
    where
        I: IntoIterator<Item = CellKey>,
    {
        let mut seen = HashSet::new();
        let cells: Vec<CellKey> = keys
            .into_iter()
            .filter(|key| self.state.grid.contains(key) && seen.insert(*key))
            .collect();

        if cells.is_empty() {
            self.selection = Selection::None;
            return self.reject(EditError::empty("No blocks selected"));
        }

        let count = cells.len();
        self.selection = Selection::Free(FreeSelection::new(cells, &self.state.grid));
        self.inform(format!(
            "Free selection finished with {} block{}.",
            count,
            if count == 1 { "" } else { "s" }
        ));
        Ok(count)
    }

    pub fn select_wall(&mut self, id: SegmentId) -> Result<(), EditError> {
        if !self.state.walls.contains_id(id) {
            self.selection = Selection::None;
            return self.reject(EditError::stale("This wall was already removed"));
        }
        self.selection = Selection::Wall(id);
        self.inform("Wall selected.");
        Ok(())
    }

    pub fn select_door(&mut self, id: SegmentId) -> Result<(), EditError> {
        if !self.state.doors.contains_id(id) {
            self.selection = Selection::None;
            return self.reject(EditError::stale("This door was already removed"));
        }
        self.selection = Selection::Door(id);
        self.inform("Door selected.");
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_none() {
            self.selection = Selection::None;
            self.inform("Selection cleared.");
        }
    }

    /// Sets the pending drag offset of an area selection, aligned to the cell unit.
    pub fn set_selection_offset(&mut self, offset: Point) -> Result<Point, EditError> {
        let aligned = Point::new(
            self.align_to_cell_unit(offset.x),
            self.align_to_cell_unit(offset.y),
        );
        match &mut self.selection {
            Selection::Area(area) => {
                area.offset = aligned;
                Ok(aligned)
            }
            _ => self.reject(EditError::selection_unavailable(
                "Only areas can be moved",
            )),
        }
    }

    /// Commits the pending offset of the area selection.
    ///
    /// Returns `Ok(false)` for a zero offset, which only resets the offset and
    /// adds no history. Otherwise the cells and captured walls/doors move, the
    /// result is committed, and the selection follows the moved content.
    pub fn commit_move(&mut self) -> Result<bool, EditError> {
        let area = match &mut self.selection {
            Selection::Area(area) => area,
            _ => {
                return self.reject(EditError::selection_unavailable(
                    "Only areas can be moved",
                ))
            }
        };

        let offset = area.offset;
        if offset.x.abs() <= OFFSET_EPSILON && offset.y.abs() <= OFFSET_EPSILON {
            area.offset = Point::ORIGIN;
            return Ok(false);
        }
        let area = area.clone();
        let (dx, dy) = (offset.x, offset.y);

        let mut next = self.state.clone();
        let (moved, texture_moves) = next.grid.relocate(&area.cells, dx, dy);

        let moved_walls = area.walls.iter().map(|s| s.translated(dx, dy));
        next.walls = next
            .walls
            .without_ids(&area.wall_ids())
            .extended(moved_walls)
            .sanitized();

        let moved_doors = area.doors.iter().map(|s| s.translated(dx, dy));
        next.doors = next
            .doors
            .without_ids(&area.door_ids())
            .extended(moved_doors)
            .without_invalid();

        self.commit(next, "Area moved.", &texture_moves);
        self.reseed_area(moved.first().copied());
        Ok(true)
    }

    /// Moves the area selection by `(dx, dy)` in one step.
    pub fn move_selection(&mut self, dx: f64, dy: f64) -> Result<bool, EditError> {
        let current = self.selection.offset();
        self.set_selection_offset(Point::new(current.x + dx, current.y + dy))?;
        self.commit_move()
    }

    /// Deletes whatever is selected. Returns the number of removed cells or
    /// segments.
    pub fn delete_selection(&mut self) -> Result<usize, EditError> {
        let selection = std::mem::take(&mut self.selection);
        match selection {
            Selection::None => self.reject(EditError::selection_unavailable(
                "Nothing selected to delete",
            )),
            Selection::Area(area) => {
                let mut next = self.state.clone();
                for key in &area.cells {
                    next.grid.remove(key);
                }
                next.walls = next.walls.without_ids(&area.wall_ids()).sanitized();
                next.doors = next.doors.without_ids(&area.door_ids()).without_invalid();
                let count = area.cells.len() + area.walls.len() + area.doors.len();
                self.commit(next, "Selection removed.", &[]);
                Ok(count)
            }
            Selection::Free(free) => {
                let mut next = self.state.clone();
                for key in &free.cells {
                    next.grid.remove(key);
                }
                self.commit(next, "Selection removed.", &[]);
                Ok(free.cells.len())
            }
            Selection::Wall(id) => self.remove_wall(id).map(|_| 1),
            Selection::Door(id) => self.remove_door(id).map(|_| 1),
        }
    }
}
