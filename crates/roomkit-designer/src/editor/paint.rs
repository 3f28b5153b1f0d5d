//! Rectangle paint/erase and wall/door drawing.

use roomkit_core::{snap_down, CellKey, EditError, Point, OFFSET_EPSILON};

use super::InteriorEditor;
use crate::segments::{Segment, SegmentId};

/// Cell origins covering the half-open rectangle spanned by `a` and `b`.
///
/// The minimum corner is floored to `step`; the maximum corner is exclusive.
/// Rectangles of more than `limit` cells are rejected.
fn rect_cells(a: Point, b: Point, step: f64, limit: usize) -> Result<Vec<CellKey>, EditError> {
    let min_x = snap_down(a.x.min(b.x), step);
    let min_y = snap_down(a.y.min(b.y), step);
    let max_x = a.x.max(b.x);
    let max_y = a.y.max(b.y);

    let oversized = || EditError::oversized("Area", limit);
    let count = |min: f64, max: f64| -> Result<usize, EditError> {
        let count = ((max - min) / step - OFFSET_EPSILON).ceil().max(0.0);
        if !count.is_finite() || count > limit as f64 {
            return Err(oversized());
        }
        Ok(count as usize)
    };
    let (count_x, count_y) = (count(min_x, max_x)?, count(min_y, max_y)?);
    let total = count_x
        .checked_mul(count_y)
        .filter(|total| *total <= limit)
        .ok_or_else(oversized)?;

    let mut cells = Vec::with_capacity(total);
    for ix in 0..count_x {
        for iy in 0..count_y {
            cells.push(CellKey::new(min_x + ix as f64 * step, min_y + iy as f64 * step));
        }
    }
    Ok(cells)
}

impl InteriorEditor {
    /// Cell size used for rectangle paint and erase.
    ///
    /// The snap step (or one unit when free), never coarser than the cell unit.
    pub fn paint_step(&self) -> f64 {
        let step = self.snap_step();
        let step = if step > 0.0 { step } else { 1.0 };
        step.min(self.unit())
    }

    /// Fills the rectangle between two opposite corners. Returns the number
    /// of cells added at the paint step.
    pub fn paint_rect(&mut self, a: Point, b: Point) -> Result<usize, EditError> {
        let step = self.paint_step();
        let cells = match rect_cells(a, b, step, self.config.max_rect_cells) {
            Ok(cells) => cells,
            Err(err) => return self.reject(err),
        };
        if cells.is_empty() {
            return self.reject(EditError::empty("Drag to cover at least one block"));
        }

        let mut draft = self.draft_at(step);
        let added = cells
            .into_iter()
            .filter(|key| draft.grid.insert(*key))
            .count();
        if added == 0 {
            return self.reject(EditError::empty(
                "All blocks in this area are already filled",
            ));
        }

        self.commit(draft, &format!("Area expanded with {} blocks.", added), &[]);
        Ok(added)
    }

    /// Empties the rectangle between two opposite corners. Returns the number
    /// of cells removed at the paint step.
    pub fn erase_rect(&mut self, a: Point, b: Point) -> Result<usize, EditError> {
        let step = self.paint_step();
        let cells = match rect_cells(a, b, step, self.config.max_rect_cells) {
            Ok(cells) => cells,
            Err(err) => return self.reject(err),
        };
        if cells.is_empty() {
            return self.reject(EditError::empty("Drag to cover at least one block"));
        }

        let mut draft = self.draft_at(step);
        let removed = cells
            .iter()
            .filter(|key| draft.grid.remove(key))
            .count();
        if removed == 0 {
            return self.reject(EditError::empty("No blocks to remove in this area"));
        }

        draft.walls = draft.walls.sanitized();
        draft.doors = draft.doors.without_invalid();
        self.commit(draft, &format!("Removed {} blocks.", removed), &[]);
        Ok(removed)
    }

    /// Adds a wall. Rejects zero-length and duplicate walls.
    pub fn add_wall(&mut self, start: Point, end: Point) -> Result<SegmentId, EditError> {
        let candidate = Segment::new(start.normalized(), end.normalized());
        let walls = match self.state.walls.with_added(candidate.clone()) {
            Ok(walls) => walls,
            Err(err) => return self.reject(err),
        };

        let mut next = self.state.clone();
        next.walls = walls;
        self.commit(
            next,
            &format!("Wall added ({:.2} u).", candidate.length()),
            &[],
        );
        Ok(candidate.id)
    }

    /// Adds a door. Rejects zero-length and duplicate doors.
    pub fn add_door(&mut self, start: Point, end: Point) -> Result<SegmentId, EditError> {
        let candidate = Segment::new(start.normalized(), end.normalized());
        let doors = match self.state.doors.with_added(candidate.clone()) {
            Ok(doors) => doors,
            Err(err) => return self.reject(err),
        };

        let mut next = self.state.clone();
        next.doors = doors;
        self.commit(
            next,
            &format!("Door added ({:.2} u).", candidate.length()),
            &[],
        );
        Ok(candidate.id)
    }

    pub fn remove_wall(&mut self, id: SegmentId) -> Result<(), EditError> {
        let walls = match self.state.walls.with_removed(id) {
            Ok(walls) => walls,
            Err(err) => {
                self.revalidate_selection();
                return self.reject(err);
            }
        };
        let mut next = self.state.clone();
        next.walls = walls;
        next.doors = next.doors.without_invalid();
        self.commit(next, "Wall removed.", &[]);
        Ok(())
    }

    pub fn remove_door(&mut self, id: SegmentId) -> Result<(), EditError> {
        let doors = match self.state.doors.with_removed(id) {
            Ok(doors) => doors,
            Err(err) => {
                self.revalidate_selection();
                return self.reject(err);
            }
        };
        let mut next = self.state.clone();
        next.doors = doors;
        self.commit(next, "Door removed.", &[]);
        Ok(())
    }
}
