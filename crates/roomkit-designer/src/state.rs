//! Canonical editor state, one value per history entry.

use roomkit_core::{is_cell_unit, snap_denominator_for_unit, CellKey, OFFSET_EPSILON};

use crate::grid::Grid;
use crate::segments::{SegmentKind, SegmentStore};

/// Everything undo/redo restores: the grid, the snap denominator and both
/// segment collections.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorState {
    pub grid: Grid,
    pub snap_denominator: u32,
    pub walls: SegmentStore,
    pub doors: SegmentStore,
}

impl InteriorState {
    /// Empty state at `unit`.
    pub fn empty(unit: f64, snap_denominator: u32) -> Self {
        Self {
            grid: Grid::new(unit),
            snap_denominator,
            walls: SegmentStore::new(SegmentKind::Wall),
            doors: SegmentStore::new(SegmentKind::Door),
        }
    }

    pub fn unit(&self) -> f64 {
        self.grid.unit()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() && self.walls.is_empty() && self.doors.is_empty()
    }

    /// Normalizes a candidate next state.
    ///
    /// Texture moves are applied first, then the grid is raised to its
    /// coarsest consistent unit and the snap denominator follows the unit.
    /// Returns the settled state and whether the unit changed.
    pub fn settled(mut self, texture_moves: &[(CellKey, CellKey)]) -> (Self, bool) {
        let previous_unit = self.grid.unit();
        self.grid.apply_texture_moves(texture_moves);

        let optimized = self.grid.optimized(&self.walls, &self.doors);
        // an emptied grid jumps to the largest unit silently
        let unit_changed = optimized.unit_changed
            && !optimized.grid.is_empty()
            && (optimized.grid.unit() - previous_unit).abs() > OFFSET_EPSILON;
        self.grid = optimized.grid;
        self.snap_denominator = snap_denominator_for_unit(self.grid.unit(), self.snap_denominator);
        (self, unit_changed)
    }

    /// Same state refined down to `unit`, or `None` when it is already that fine.
    pub fn refined_to(&self, unit: f64) -> Option<Self> {
        if !is_cell_unit(unit) || self.grid.unit() <= unit + OFFSET_EPSILON {
            return None;
        }
        Some(Self {
            grid: self.grid.refined(unit),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_coarsens_and_tracks_snap() {
        let mut state = InteriorState::empty(0.5, 2);
        for (x, y) in [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (0.5, 0.5)] {
            state.grid.insert(CellKey::new(x, y));
        }
        let mut extra = state.clone();
        extra.grid.insert(CellKey::new(3.0, 0.0));
        let (settled, changed) = state.settled(&[]);
        assert!(changed);
        assert_eq!(settled.unit(), 1.0);
        assert_eq!(settled.snap_denominator, 1);

        // an incomplete group keeps the unit fine
        let (settled, changed) = extra.settled(&[]);
        assert!(!changed);
        assert_eq!(settled.unit(), 0.5);
    }

    #[test]
    fn test_free_snap_stays_free() {
        let state = InteriorState::empty(1.0, 0);
        let (settled, _) = state.settled(&[]);
        assert_eq!(settled.snap_denominator, 0);
    }

    #[test]
    fn test_refined_to() {
        let mut state = InteriorState::empty(1.0, 1);
        state.grid.insert(CellKey::new(0.0, 0.0));
        let fine = state.refined_to(0.25).unwrap();
        assert_eq!(fine.grid.len(), 16);
        assert!(fine.refined_to(0.25).is_none());
        assert!(state.refined_to(0.3).is_none());
    }
}
