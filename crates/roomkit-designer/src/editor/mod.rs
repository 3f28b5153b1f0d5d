//! Interior editor facade.
//!
//! [`InteriorEditor`] owns the canonical state and is the only thing that
//! mutates it. Every grid-changing operation builds a candidate
//! [`InteriorState`] and hands it to `commit`, which normalizes the
//! resolution, pushes history and reports the outcome. Operations return
//! `Result<_, EditError>`; a rejected operation leaves the state untouched and
//! records its message as the current status.
//!
//! The operations are split by concern:
//!
//! - `paint`: rectangle paint/erase, walls and doors
//! - `selection_ops`: picking, free selection, move and delete
//! - `clipboard_ops`: copy, cut and paste
//! - `textures`: texture loading and clearing
//! - `pointer_ops`: the pointer gesture state machine and keyboard shortcuts
//! - `view`: derived display data and inspection

mod clipboard_ops;
mod paint;
mod pointer_ops;
mod selection_ops;
mod textures;
mod view;

pub use view::{DoorInfo, DraftPreview, HoverCell, SegmentView};

use roomkit_core::{
    format_snap_label, format_unit_label, snap_down, snap_nearest, snap_step, CellKey, EditError,
    SnapFraction, OFFSET_EPSILON,
};
use roomkit_settings::{EditorConfig, SettingsResult};

use crate::clipboard::Clipboard;
use crate::grid::Grid;
use crate::history::History;
use crate::pointer::{PointerMode, Tool};
use crate::segments::SegmentStore;
use crate::selection::{AreaSelection, Selection};
use crate::snapshot::EditorSnapshot;
use crate::state::InteriorState;
use crate::status::StatusMessage;
use crate::viewport::Viewport;

/// Interior editing session.
#[derive(Debug, Clone)]
pub struct InteriorEditor {
    config: EditorConfig,
    state: InteriorState,
    history: History<InteriorState>,
    selection: Selection,
    clipboard: Option<Clipboard>,
    tool: Tool,
    pointer: PointerMode,
    active_pointer: Option<u32>,
    hover: Option<roomkit_core::Point>,
    viewport: Viewport,
    status: StatusMessage,
}

impl InteriorEditor {
    /// Creates an editor with the default configuration.
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Creates an editor after validating `config`.
    pub fn with_config(config: EditorConfig) -> SettingsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        let initial =
            InteriorState::empty(config.initial_cell_unit, config.initial_snap_denominator);
        Self {
            history: History::with_depth(initial.clone(), config.history_depth),
            state: initial,
            selection: Selection::None,
            clipboard: None,
            tool: Tool::default(),
            pointer: PointerMode::Idle,
            active_pointer: None,
            hover: None,
            viewport: Viewport::new(1200.0, 800.0, &config),
            status: StatusMessage::info("Pick a tool to get started."),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &InteriorState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn unit(&self) -> f64 {
        self.state.grid.unit()
    }

    pub fn walls(&self) -> &SegmentStore {
        &self.state.walls
    }

    pub fn doors(&self) -> &SegmentStore {
        &self.state.doors
    }

    pub fn snap_denominator(&self) -> u32 {
        self.state.snap_denominator
    }

    pub fn snap_fraction(&self) -> Option<SnapFraction> {
        SnapFraction::from_denominator(self.state.snap_denominator)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn pointer_mode(&self) -> &PointerMode {
        &self.pointer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    // ---------------------------------------------------------------------
    // Commit and history
    // ---------------------------------------------------------------------

    /// Normalizes `candidate`, makes it the live state and appends it to the
    /// history. Returns whether the cell unit changed.
    pub(crate) fn commit(
        &mut self,
        candidate: InteriorState,
        message: &str,
        texture_moves: &[(CellKey, CellKey)],
    ) -> bool {
        let (next, unit_changed) = candidate.settled(texture_moves);

        let text = if unit_changed {
            format!(
                "{} Grid adjusted to blocks of {}.",
                message,
                format_unit_label(next.unit())
            )
        } else {
            message.to_string()
        };

        tracing::info!(
            "Commit: {} ({} cells at unit {}, {} walls, {} doors)",
            message,
            next.grid.len(),
            next.unit(),
            next.walls.len(),
            next.doors.len()
        );

        self.state = next.clone();
        self.history.push(next);
        self.revalidate_selection();
        self.status = StatusMessage::info(text);
        unit_changed
    }

    /// Records `err` as the status and returns it.
    pub(crate) fn reject<T>(&mut self, err: EditError) -> Result<T, EditError> {
        tracing::debug!("Rejected: {}", err);
        self.status = StatusMessage::from(&err);
        Err(err)
    }

    pub(crate) fn inform(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::info(text);
    }

    /// Copies the live state over the current history entry.
    pub(crate) fn write_through(&mut self) {
        self.history.replace_current(self.state.clone());
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous history entry.
    pub fn undo(&mut self) -> Result<(), EditError> {
        let Some(entry) = self.history.undo() else {
            return self.reject(EditError::empty("Nothing to undo"));
        };
        let dropped = self.restore_entry(&entry);
        tracing::info!("Undo to entry {}", self.history.index());
        self.report_restored("Undone", dropped);
        Ok(())
    }

    /// Re-applies the next history entry.
    pub fn redo(&mut self) -> Result<(), EditError> {
        let Some(entry) = self.history.redo() else {
            return self.reject(EditError::empty("Nothing to redo"));
        };
        let dropped = self.restore_entry(&entry);
        tracing::info!("Redo to entry {}", self.history.index());
        self.report_restored("Redone", dropped);
        Ok(())
    }

    /// Makes `entry` live. Returns whether the selection had to be dropped.
    fn restore_entry(&mut self, entry: &InteriorState) -> bool {
        self.state = entry.clone();
        self.reset_pointer();
        self.revalidate_selection()
    }

    fn report_restored(&mut self, action: &str, dropped_selection: bool) {
        self.status = if dropped_selection {
            StatusMessage::warning(format!(
                "{}. Selection cleared: it refers to items that no longer exist.",
                action
            ))
        } else {
            StatusMessage::info(action)
        };
    }

    /// Clears a selection that refers to cells or segments that are gone.
    pub(crate) fn revalidate_selection(&mut self) -> bool {
        let stale =
            self.selection
                .is_stale(&self.state.grid, &self.state.walls, &self.state.doors);
        if stale {
            tracing::debug!("Dropping stale {} selection", self.selection.kind());
            self.selection = Selection::None;
        }
        stale
    }

    pub(crate) fn reset_pointer(&mut self) {
        self.pointer = PointerMode::Idle;
        self.active_pointer = None;
    }

    /// Commits the empty layout.
    pub fn clear_all(&mut self) -> Result<(), EditError> {
        if self.state.is_empty() {
            return self.reject(EditError::empty("Nothing to clear"));
        }
        self.reset_pointer();
        let empty = InteriorState::empty(self.unit(), self.state.snap_denominator);
        self.selection = Selection::None;
        self.commit(empty, "Project cleared. Draw a new area to start again.", &[]);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Snapping
    // ---------------------------------------------------------------------

    /// Active snap step in world units, `0.0` when free.
    pub fn snap_step(&self) -> f64 {
        snap_step(self.state.snap_denominator)
    }

    /// Step pointer previews and drags move in: the snap step, or the cell
    /// unit when snapping is free.
    pub fn hover_unit(&self) -> f64 {
        let step = self.snap_step();
        if step > 0.0 {
            step
        } else {
            self.unit()
        }
    }

    /// Rounds to the nearest multiple of the cell unit.
    pub fn align_to_cell_unit(&self, value: f64) -> f64 {
        snap_nearest(value, self.unit())
    }

    /// Rounds to the snap step, or aligns to the cell unit when free.
    pub fn snap_value(&self, value: f64) -> f64 {
        let step = self.snap_step();
        if step > 0.0 {
            snap_nearest(value, step)
        } else {
            self.align_to_cell_unit(value)
        }
    }

    /// Floors to the snap step, or to the cell unit when free.
    pub fn snap_value_down(&self, value: f64) -> f64 {
        snap_down(value, self.hover_unit())
    }

    /// Changes the snap fraction.
    ///
    /// A fraction finer than the cell unit refines the grid and every
    /// coarser history entry to `1/n`, and drops the selection and clipboard.
    pub fn set_snap(&mut self, fraction: SnapFraction) {
        let denominator = fraction.denominator();
        self.state.snap_denominator = denominator;

        if denominator > 1 {
            let target = 1.0 / f64::from(denominator);
            if let Some(refined) = self.state.refined_to(target) {
                self.state = refined;
                self.history.map_entries(|entry| entry.refined_to(target));
                self.write_through();
                self.selection = Selection::None;
                self.clipboard = None;
                self.reset_pointer();
                tracing::info!("Grid refined to unit {}", target);
                self.inform(format!(
                    "Grid refined to blocks of {}.",
                    format_unit_label(target)
                ));
                return;
            }
        }

        self.write_through();
        self.inform(format!("Snap set to {}.", format_snap_label(denominator)));
    }

    /// [`set_snap`](Self::set_snap) by raw denominator (0 for free).
    pub fn set_snap_denominator(&mut self, denominator: u32) -> roomkit_core::Result<()> {
        let fraction = SnapFraction::from_denominator(denominator).ok_or_else(|| {
            roomkit_core::Error::other(format!("Unsupported snap denominator: {}", denominator))
        })?;
        self.set_snap(fraction);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Serializable copy of the live state.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot::from_state(&self.state)
    }

    /// Replaces the layout and starts a fresh history.
    pub fn restore(&mut self, snapshot: EditorSnapshot) -> roomkit_core::Result<()> {
        let state = snapshot.into_state()?;
        tracing::info!(
            "Restored layout: {} cells at unit {}",
            state.grid.len(),
            state.unit()
        );
        self.history.reset(state.clone());
        self.state = state;
        self.selection = Selection::None;
        self.reset_pointer();
        self.inform(format!("Layout loaded ({} blocks).", self.state.grid.len()));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Shared helpers
    // ---------------------------------------------------------------------

    /// Copy of the live state at a unit no coarser than `unit`.
    pub(crate) fn draft_at(&self, unit: f64) -> InteriorState {
        if self.unit() > unit + OFFSET_EPSILON {
            self.state
                .refined_to(unit)
                .unwrap_or_else(|| self.state.clone())
        } else {
            self.state.clone()
        }
    }

    /// Area selection following content that was just committed.
    ///
    /// Seeds from the coarse cell containing `first`, falling back to any
    /// occupied cell; clears the selection when the grid is empty.
    pub(crate) fn reseed_area(&mut self, first: Option<CellKey>) {
        let grid = &self.state.grid;
        let seed = first
            .map(|key| key.group_base(grid.unit()))
            .filter(|base| grid.contains(base))
            .or_else(|| grid.cells().iter().next().copied());

        self.selection = match seed {
            Some(seed) => {
                let cells = grid.connected_from(seed);
                Selection::Area(AreaSelection::capture(
                    cells,
                    grid,
                    &self.state.walls,
                    &self.state.doors,
                ))
            }
            None => Selection::None,
        };
    }
}

impl Default for InteriorEditor {
    fn default() -> Self {
        Self::new()
    }
}
