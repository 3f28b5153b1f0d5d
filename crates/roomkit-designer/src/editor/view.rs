//! Derived display data and inspection.
//!
//! Nothing here mutates the editor. Every value is recomputed from the live
//! state, selection and pointer mode on request.

use roomkit_core::{
    normalize_coord, snap_down, Bounds, CellKey, Point, OFFSET_EPSILON, SEGMENT_EPSILON,
};

use super::InteriorEditor;
use crate::outline::{aggregate_render_blocks, compute_outline, OutlineSegment, RenderBlock};
use crate::pointer::{PointerMode, RectTool};
use crate::segments::{DoorOrientation, Segment};
use crate::selection::Selection;
use crate::texture::TextureRef;

/// A wall or door with its highlight state.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    pub segment: Segment,
    pub selected: bool,
    pub orientation: DoorOrientation,
}

/// Geometry of the gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftPreview {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        tool: RectTool,
    },
    Wall {
        start: Point,
        end: Point,
    },
    Door {
        start: Point,
        end: Point,
    },
    FreeSelection(Vec<CellKey>),
}

/// Cell under the pointer at the hover step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCell {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Inspector data for the selected door.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorInfo {
    pub length: f64,
    pub orientation: DoorOrientation,
    pub midpoint: Point,
}

/// Origin of the `step`-wide cell containing `value`.
///
/// Steps below one unit index into the enclosing unit cell, so a value just
/// under an integer never spills into the next unit.
fn hover_axis(value: f64, step: f64) -> f64 {
    if step >= 1.0 {
        return snap_down(value, step);
    }
    let base = value.floor();
    let local = value - base;
    let last = ((1.0 - OFFSET_EPSILON) / step).floor();
    let index = (local / step).floor().clamp(0.0, last);
    normalize_coord(base + index * step)
}

/// Half-open rectangle covering both corners at `step`: the minimum corner is
/// floored, the maximum corner is floored and extended by one step.
pub(crate) fn rect_extent(a: Point, b: Point, step: f64) -> (Point, Point) {
    let min = Point::new(
        snap_down(a.x.min(b.x), step),
        snap_down(a.y.min(b.y), step),
    );
    let max = Point::new(
        normalize_coord(snap_down(a.x.max(b.x), step) + step),
        normalize_coord(snap_down(a.y.max(b.y), step) + step),
    );
    (min, max)
}

impl InteriorEditor {
    /// Merged boundary of the occupied region.
    pub fn outline(&self) -> Vec<OutlineSegment> {
        compute_outline(self.state.grid.cells(), self.unit())
    }

    /// Occupied cells grouped for drawing, with selection highlights.
    pub fn render_blocks(&self) -> Vec<RenderBlock> {
        let selected = self.selection.cell_set();
        let selected = (!selected.is_empty()).then_some(&selected);
        aggregate_render_blocks(
            self.state.grid.cells(),
            self.unit(),
            self.state.grid.textures(),
            selected,
        )
    }

    /// Bounds of the area or free selection, shifted by its pending offset.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        let (bounds, offset) = match &self.selection {
            Selection::Area(area) => (area.bounds, area.offset),
            Selection::Free(free) => (free.bounds, free.offset),
            _ => return None,
        };
        Some(Bounds {
            min_x: bounds.min_x + offset.x,
            min_y: bounds.min_y + offset.y,
            max_x: bounds.max_x + offset.x,
            max_y: bounds.max_y + offset.y,
            ..bounds
        })
    }

    pub fn wall_views(&self) -> Vec<SegmentView> {
        self.state
            .walls
            .iter()
            .map(|wall| SegmentView {
                segment: wall.clone(),
                selected: self.selection.highlights_wall(wall.id),
                orientation: wall.orientation(),
            })
            .collect()
    }

    pub fn door_views(&self) -> Vec<SegmentView> {
        self.state
            .doors
            .iter()
            .map(|door| SegmentView {
                segment: door.clone(),
                selected: self.selection.highlights_door(door.id),
                orientation: door.orientation(),
            })
            .collect()
    }

    /// Preview of the gesture in progress, if it has visible geometry.
    pub fn draft_preview(&self) -> Option<DraftPreview> {
        match &self.pointer {
            PointerMode::DrawingRect {
                tool,
                start,
                current,
            } => {
                let (min, max) = rect_extent(*start, *current, self.paint_step());
                Some(DraftPreview::Rect {
                    x: min.x,
                    y: min.y,
                    width: max.x - min.x,
                    height: max.y - min.y,
                    tool: *tool,
                })
            }
            PointerMode::DrawingWall { start, current } => {
                (start.distance_to(current) > SEGMENT_EPSILON).then_some(DraftPreview::Wall {
                    start: *start,
                    end: *current,
                })
            }
            PointerMode::DrawingDoor { start, current } => {
                (start.distance_to(current) > SEGMENT_EPSILON).then_some(DraftPreview::Door {
                    start: *start,
                    end: *current,
                })
            }
            PointerMode::FreeSelecting { draft } => {
                Some(DraftPreview::FreeSelection(draft.iter().copied().collect()))
            }
            _ => None,
        }
    }

    /// Cell at the hover step that contains `point`.
    pub fn hover_cell(&self, point: Point) -> HoverCell {
        let size = self.hover_unit();
        HoverCell {
            x: hover_axis(point.x, size),
            y: hover_axis(point.y, size),
            size,
        }
    }

    /// Hover cell under the last known pointer position.
    pub fn hovered_cell(&self) -> Option<HoverCell> {
        self.hover.map(|point| self.hover_cell(point))
    }

    pub fn selection_label(&self) -> String {
        self.selection.label()
    }

    pub fn selected_wall_length(&self) -> Option<f64> {
        let id = self.selection.selected_wall()?;
        self.state.walls.get(id).map(Segment::length)
    }

    pub fn selected_door_info(&self) -> Option<DoorInfo> {
        let id = self.selection.selected_door()?;
        let door = self.state.doors.get(id)?;
        Some(DoorInfo {
            length: door.length(),
            orientation: door.orientation(),
            midpoint: door.midpoint(),
        })
    }

    /// Texture of the first selected cell that has one.
    pub fn selection_texture(&self) -> Option<TextureRef> {
        self.selection
            .cell_keys()
            .iter()
            .find_map(|key| self.state.grid.texture(key).cloned())
    }

    pub fn can_delete(&self) -> bool {
        !self.selection.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{PointerInput, Tool};
    use roomkit_core::SnapFraction;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_hover_axis() {
        assert_eq!(hover_axis(1.3, 1.0), 1.0);
        assert_eq!(hover_axis(-0.2, 1.0), -1.0);
        assert_eq!(hover_axis(1.3, 0.25), 1.25);
        assert_eq!(hover_axis(1.99, 0.5), 1.5);
        assert_eq!(hover_axis(5.0, 2.0), 4.0);
    }

    #[test]
    fn test_rect_extent_includes_last_cell() {
        let (min, max) = rect_extent(p(2.5, 0.2), p(0.4, 1.7), 1.0);
        assert_eq!(min, p(0.0, 0.0));
        assert_eq!(max, p(3.0, 2.0));
    }

    #[test]
    fn test_hover_cell_follows_snap() {
        let mut editor = InteriorEditor::new();
        assert_eq!(
            editor.hover_cell(p(2.7, 0.3)),
            HoverCell {
                x: 2.0,
                y: 0.0,
                size: 1.0
            }
        );
        editor.set_snap(SnapFraction::Half);
        assert_eq!(editor.hover_cell(p(2.7, 0.3)).x, 2.5);
        assert!(editor.hovered_cell().is_none());
    }

    #[test]
    fn test_inspection() {
        let mut editor = InteriorEditor::new();
        editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        let wall = editor.add_wall(p(0.0, 0.0), p(0.0, 1.0)).unwrap();
        editor.add_door(p(0.0, 1.0), p(2.0, 1.0)).unwrap();

        editor.select_wall(wall).unwrap();
        assert_eq!(editor.selected_wall_length(), Some(1.0));
        assert!(editor.wall_views()[0].selected);
        assert!(editor.selected_door_info().is_none());

        editor.select_at(p(1.0, 1.0));
        let info = editor.selected_door_info().unwrap();
        assert_eq!(info.orientation, DoorOrientation::Horizontal);
        assert_eq!(info.midpoint, p(1.0, 1.0));
        assert_eq!(editor.selection_label(), "Door");
        assert!(editor.can_delete());
    }

    #[test]
    fn test_selection_bounds_and_render_blocks() {
        let mut editor = InteriorEditor::new();
        editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        assert!(editor.selection_bounds().is_none());

        editor.select_area_at(p(0.5, 0.5)).unwrap();
        let bounds = editor.selection_bounds().unwrap();
        assert_eq!((bounds.width, bounds.height), (2.0, 1.0));
        assert!(editor.render_blocks().iter().all(|block| block.selected));
        assert_eq!(editor.outline().len(), 4);
    }

    #[test]
    fn test_draft_preview() {
        let mut editor = InteriorEditor::new();
        editor.pointer_down(PointerInput::new(p(0.2, 0.2)));
        editor.pointer_move(PointerInput::new(p(1.6, 0.4)));
        assert_eq!(
            editor.draft_preview(),
            Some(DraftPreview::Rect {
                x: 0.0,
                y: 0.0,
                width: 2.0,
                height: 1.0,
                tool: RectTool::Paint
            })
        );
        editor.pointer_cancel(1);
        assert!(editor.draft_preview().is_none());

        editor.set_tool(Tool::Wall);
        editor.pointer_down(PointerInput::new(p(1.0, 1.0)));
        assert!(editor.draft_preview().is_none());
    }
}
