//! Copy, cut and paste of area selections.

use roomkit_core::{snap_nearest, unit_factor, CellKey, EditError, Point};

use super::InteriorEditor;
use crate::clipboard::Clipboard;
use crate::selection::Selection;

/// Splits keys laid out at `coarse` into the `fine` cells they cover.
fn expand_cells(keys: Vec<CellKey>, coarse: f64, fine: f64) -> Vec<CellKey> {
    let factor = match unit_factor(coarse, fine) {
        Some(factor) if factor > 1 => factor,
        _ => return keys,
    };
    let mut cells = Vec::with_capacity(keys.len() * factor * factor);
    for key in keys {
        for i in 0..factor {
            for j in 0..factor {
                cells.push(key.offset(i as f64 * fine, j as f64 * fine));
            }
        }
    }
    cells
}

impl InteriorEditor {
    /// Copies the area selection. Returns the number of copied blocks.
    pub fn copy_selection(&mut self) -> Result<usize, EditError> {
        let Selection::Area(area) = &self.selection else {
            return self.reject(EditError::selection_unavailable("Select an area to copy"));
        };

        let clipboard = Clipboard::from_area(area);
        let count = clipboard.block_count();
        tracing::debug!(
            "Copied {} cells, {} walls, {} doors",
            count,
            clipboard.walls.len(),
            clipboard.doors.len()
        );
        self.clipboard = Some(clipboard);
        self.inform("Area copied. Use Paste or Ctrl+V to duplicate it.");
        Ok(count)
    }

    /// Copies the area selection, then deletes it.
    pub fn cut_selection(&mut self) -> Result<usize, EditError> {
        if !matches!(self.selection, Selection::Area(_)) {
            return self.reject(EditError::selection_unavailable("Only areas can be cut"));
        }
        let count = self.copy_selection()?;
        self.delete_selection()?;
        self.inform(format!("Area cut ({} blocks).", count));
        Ok(count)
    }

    /// Default paste origin: the clipboard centered on the viewport, snapped
    /// to the active step and aligned to the cell unit.
    pub fn paste_target(&self) -> Option<Point> {
        let clipboard = self.clipboard.as_ref()?;
        let center = self.viewport.center_world();
        let x = self.snap_value(center.x - clipboard.width / 2.0);
        let y = self.snap_value(center.y - clipboard.height / 2.0);
        Some(Point::new(
            self.align_to_cell_unit(x),
            self.align_to_cell_unit(y),
        ))
    }

    /// Pastes the clipboard around the viewport center.
    pub fn paste(&mut self) -> Result<usize, EditError> {
        match self.paste_target() {
            Some(origin) => self.paste_at(origin),
            None => self.reject(EditError::selection_unavailable("Copy an area before pasting")),
        }
    }

    /// Pastes the clipboard with its bounding-box corner at `origin`.
    ///
    /// Returns the number of pasted blocks. The clipboard itself is left
    /// untouched, so repeated pastes produce identical copies.
    pub fn paste_at(&mut self, origin: Point) -> Result<usize, EditError> {
        let Some(clipboard) = self.clipboard.clone() else {
            return self.reject(EditError::selection_unavailable("Copy an area before pasting"));
        };

        let mut draft = self.draft_at(clipboard.unit.min(self.unit()));
        let unit = draft.unit();
        let origin = Point::new(snap_nearest(origin.x, unit), snap_nearest(origin.y, unit));

        let cells = expand_cells(clipboard.cells_at(origin), clipboard.unit, unit);
        let added = cells.iter().filter(|key| draft.grid.insert(**key)).count();

        let aligned = |p: Point| Point::new(snap_nearest(p.x, unit), snap_nearest(p.y, unit));
        let (walls_before, doors_before) = (draft.walls.len(), draft.doors.len());
        draft.walls = draft
            .walls
            .extended(clipboard.walls_at(origin).into_iter().map(|mut s| {
                s.start = aligned(s.start);
                s.end = aligned(s.end);
                s
            }))
            .sanitized();
        draft.doors = draft
            .doors
            .extended(clipboard.doors_at(origin).into_iter().map(|mut s| {
                s.start = aligned(s.start);
                s.end = aligned(s.end);
                s
            }))
            .without_invalid();

        if added == 0 && draft.walls.len() == walls_before && draft.doors.len() == doors_before {
            return self.reject(EditError::empty("The pasted area is already filled"));
        }

        let count = clipboard.block_count();
        self.commit(draft, &format!("Area pasted ({} blocks).", count), &[]);
        self.reseed_area(cells.first().copied());
        Ok(count)
    }

    pub fn can_copy(&self) -> bool {
        matches!(self.selection, Selection::Area(_))
    }

    pub fn can_cut(&self) -> bool {
        self.can_copy()
    }

    pub fn can_paste(&self) -> bool {
        self.clipboard.as_ref().is_some_and(|c| !c.is_empty())
    }
}
