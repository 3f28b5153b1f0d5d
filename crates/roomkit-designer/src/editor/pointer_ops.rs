//! Pointer gestures and keyboard shortcuts.
//!
//! A gesture starts on pointer down, updates its draft on move and ends on up,
//! cancel or leave. Only the pointer that started a gesture can drive it;
//! other pointers are ignored until it ends. Cancel and leave discard the
//! draft without committing anything.

use std::collections::BTreeSet;

use roomkit_core::Point;

use super::view::rect_extent;
use super::InteriorEditor;
use crate::keymap::{map_key, EditorAction, KeyInput};
use crate::pointer::{PointerInput, PointerMode, RectTool, Tool};
use crate::selection::{Selection, SelectionKind};

impl InteriorEditor {
    /// Switches the active tool, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.abandon_gesture();
        self.tool = tool;
        tracing::debug!("Tool set to {}", tool);
        self.inform(tool.hint());
    }

    /// Starts a gesture for the active tool. Returns whether the pointer was
    /// captured.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        if self.active_pointer.is_some() {
            tracing::debug!("Ignoring pointer {} during active gesture", input.pointer_id);
            return false;
        }
        self.hover = Some(input.world);

        let mode = if input.wants_pan() || self.tool == Tool::Pan {
            let Some(start_screen) = input.screen else {
                return false;
            };
            PointerMode::Panning {
                start_screen,
                origin: self.viewport.origin(),
            }
        } else {
            match self.tool {
                Tool::Pan => return false,
                Tool::Area => PointerMode::DrawingRect {
                    tool: RectTool::Paint,
                    start: input.world,
                    current: input.world,
                },
                Tool::Erase => PointerMode::DrawingRect {
                    tool: RectTool::Erase,
                    start: input.world,
                    current: input.world,
                },
                Tool::Wall => {
                    let start = self.snap_point(input.world);
                    PointerMode::DrawingWall {
                        start,
                        current: start,
                    }
                }
                Tool::Door => {
                    let start = self.snap_point(input.world);
                    PointerMode::DrawingDoor {
                        start,
                        current: start,
                    }
                }
                Tool::Select => match self.begin_select(input.world) {
                    Some(mode) => mode,
                    None => return false,
                },
                Tool::FreeSelect => {
                    self.selection = Selection::None;
                    let draft: BTreeSet<_> =
                        self.state.grid.find_cell_at(input.world).into_iter().collect();
                    if draft.is_empty() {
                        self.inform("Paint over filled blocks to add them to the selection.");
                    }
                    PointerMode::FreeSelecting { draft }
                }
            }
        };

        tracing::trace!("Pointer {} down: {}", input.pointer_id, mode.name());
        self.pointer = mode;
        self.active_pointer = Some(input.pointer_id);
        true
    }

    fn begin_select(&mut self, world: Point) -> Option<PointerMode> {
        if self.selection.area_contains(world) {
            self.inform("Drag to move the selection.");
            return Some(PointerMode::MovingSelection {
                start_world: world,
                initial_offset: self.selection.offset(),
            });
        }
        match self.select_at(world) {
            SelectionKind::Area => Some(PointerMode::MovingSelection {
                start_world: world,
                initial_offset: Point::ORIGIN,
            }),
            _ => None,
        }
    }

    /// Tracks the hover position and updates the draft of a captured gesture.
    pub fn pointer_move(&mut self, input: PointerInput) {
        self.hover = Some(input.world);
        if self.active_pointer != Some(input.pointer_id) {
            return;
        }

        let world = input.world;
        let mode = std::mem::take(&mut self.pointer);
        self.pointer = match mode {
            PointerMode::Panning {
                start_screen,
                origin,
            } => {
                if let Some((x, y)) = input.screen {
                    self.viewport.set_origin(
                        origin.0 + x - start_screen.0,
                        origin.1 + y - start_screen.1,
                    );
                }
                PointerMode::Panning {
                    start_screen,
                    origin,
                }
            }
            PointerMode::DrawingRect { tool, start, .. } => PointerMode::DrawingRect {
                tool,
                start,
                current: world,
            },
            PointerMode::DrawingWall { start, .. } => PointerMode::DrawingWall {
                start,
                current: self.snap_point(world),
            },
            PointerMode::DrawingDoor { start, .. } => PointerMode::DrawingDoor {
                start,
                current: self.snap_point(world),
            },
            PointerMode::MovingSelection {
                start_world,
                initial_offset,
            } => {
                self.drag_selection(start_world, initial_offset, world);
                PointerMode::MovingSelection {
                    start_world,
                    initial_offset,
                }
            }
            PointerMode::FreeSelecting { mut draft } => {
                if let Some(key) = self.state.grid.find_cell_at(world) {
                    draft.insert(key);
                }
                PointerMode::FreeSelecting { draft }
            }
            PointerMode::Idle => PointerMode::Idle,
        };
    }

    /// Live offset of a dragged area, in steps of the hover unit.
    fn drag_selection(&mut self, start: Point, initial: Point, world: Point) {
        let step = self.hover_unit();
        let delta_x = ((world.x - start.x) / step).round() * step;
        let delta_y = ((world.y - start.y) / step).round() * step;
        let offset = Point::new(
            self.align_to_cell_unit(initial.x + delta_x),
            self.align_to_cell_unit(initial.y + delta_y),
        );
        if let Selection::Area(area) = &mut self.selection {
            area.offset = offset;
        }
    }

    /// Finishes the captured gesture. Returns whether one was finished.
    ///
    /// Rejected commits are reported through the status line.
    pub fn pointer_up(&mut self, input: PointerInput) -> bool {
        if self.active_pointer != Some(input.pointer_id) {
            return false;
        }
        let mode = std::mem::take(&mut self.pointer);
        self.active_pointer = None;
        let world = input.world;

        match mode {
            PointerMode::Idle | PointerMode::Panning { .. } => {}
            PointerMode::DrawingRect { tool, start, .. } => {
                let (min, max) = rect_extent(start, world, self.paint_step());
                let _ = match tool {
                    RectTool::Paint => self.paint_rect(min, max),
                    RectTool::Erase => self.erase_rect(min, max),
                };
            }
            PointerMode::DrawingWall { start, .. } => {
                let end = self.snap_point(world);
                let _ = self.add_wall(start, end);
            }
            PointerMode::DrawingDoor { start, .. } => {
                let end = self.snap_point(world);
                let _ = self.add_door(start, end);
            }
            PointerMode::MovingSelection {
                start_world,
                initial_offset,
            } => {
                self.drag_selection(start_world, initial_offset, world);
                let _ = self.commit_move();
            }
            PointerMode::FreeSelecting { mut draft } => {
                if let Some(key) = self.state.grid.find_cell_at(world) {
                    draft.insert(key);
                }
                let _ = self.select_free(draft);
            }
        }
        true
    }

    /// Abandons the gesture of `pointer_id` without committing.
    pub fn pointer_cancel(&mut self, pointer_id: u32) {
        if self.active_pointer == Some(pointer_id) {
            self.abandon_gesture();
        }
    }

    /// The pointer left the canvas: abandons its gesture and drops the hover.
    pub fn pointer_leave(&mut self, pointer_id: u32) {
        self.pointer_cancel(pointer_id);
        self.hover = None;
    }

    fn abandon_gesture(&mut self) {
        if let PointerMode::MovingSelection { .. } = self.pointer {
            if let Selection::Area(area) = &mut self.selection {
                area.offset = Point::ORIGIN;
            }
        }
        if !self.pointer.is_idle() {
            tracing::debug!("Abandoned {} gesture", self.pointer.name());
        }
        self.reset_pointer();
    }

    /// Zooms the view one wheel step about a screen position.
    pub fn wheel(&mut self, screen_x: f64, screen_y: f64, delta_y: f64) {
        self.viewport.wheel(screen_x, screen_y, delta_y);
    }

    /// Runs the action bound to `input`, if any, and returns it.
    ///
    /// Clipboard and delete shortcuts are ignored while a gesture is in
    /// progress.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<EditorAction> {
        let action = map_key(input)?;
        let edits_selection = matches!(
            action,
            EditorAction::Delete | EditorAction::Copy | EditorAction::Cut | EditorAction::Paste
        );
        if edits_selection && !self.pointer.is_idle() {
            tracing::debug!(
                "Ignoring {:?} during {} gesture",
                action,
                self.pointer.name()
            );
            return None;
        }
        tracing::debug!("Key {} -> {:?}", input.key, action);

        let _ = match action {
            EditorAction::Delete => self.delete_selection().map(|_| ()),
            EditorAction::ClearSelection => {
                self.abandon_gesture();
                self.clear_selection();
                Ok(())
            }
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Copy => self.copy_selection().map(|_| ()),
            EditorAction::Paste => self.paste().map(|_| ()),
            EditorAction::Cut => self.cut_selection().map(|_| ()),
        };
        Some(action)
    }

    fn snap_point(&self, point: Point) -> Point {
        Point::new(self.snap_value(point.x), self.snap_value(point.y))
    }
}
