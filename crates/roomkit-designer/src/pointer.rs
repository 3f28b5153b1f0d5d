//! Pointer input types and the gesture state machine states.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use roomkit_core::{CellKey, Point};
use serde::{Deserialize, Serialize};

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Pan,
    /// Rectangle paint.
    #[default]
    Area,
    Erase,
    Select,
    FreeSelect,
    Wall,
    Door,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Pan,
        Tool::Area,
        Tool::Erase,
        Tool::Select,
        Tool::FreeSelect,
        Tool::Wall,
        Tool::Door,
    ];

    /// One-line usage hint for the toolbar.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Pan => "Drag to move the view",
            Self::Area => "Drag to paint a rectangle of blocks",
            Self::Erase => "Drag to erase a rectangle of blocks",
            Self::Select => "Click a block, wall or door to select it; drag a selection to move it",
            Self::FreeSelect => "Drag over blocks to select them",
            Self::Wall => "Drag to draw a wall",
            Self::Door => "Drag to draw a door",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pan => "pan",
            Self::Area => "area",
            Self::Erase => "erase",
            Self::Select => "select",
            Self::FreeSelect => "free-select",
            Self::Wall => "wall",
            Self::Door => "door",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pan" => Ok(Self::Pan),
            "area" => Ok(Self::Area),
            "erase" => Ok(Self::Erase),
            "select" => Ok(Self::Select),
            "free-select" => Ok(Self::FreeSelect),
            "wall" => Ok(Self::Wall),
            "door" => Ok(Self::Door),
            _ => Err(format!("Unknown tool: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

/// One pointer event, already converted to world coordinates by the shell.
///
/// The gesture it starts depends on the editor's active tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: u32,
    pub world: Point,
    /// Screen position in pixels, needed for panning.
    pub screen: Option<(f64, f64)>,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn new(world: Point) -> Self {
        Self {
            pointer_id: 1,
            world,
            screen: None,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub fn with_screen(mut self, x: f64, y: f64) -> Self {
        self.screen = Some((x, y));
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Secondary or middle button, or shift held, pans regardless of tool.
    pub fn wants_pan(&self) -> bool {
        self.button != PointerButton::Primary || self.modifiers.shift
    }
}

/// Rectangle draft kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectTool {
    Paint,
    Erase,
}

/// Gesture in progress. Entered on pointer down, left on up, cancel or leave.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerMode {
    #[default]
    Idle,
    Panning {
        start_screen: (f64, f64),
        origin: (f64, f64),
    },
    DrawingRect {
        tool: RectTool,
        start: Point,
        current: Point,
    },
    DrawingWall {
        start: Point,
        current: Point,
    },
    DrawingDoor {
        start: Point,
        current: Point,
    },
    MovingSelection {
        start_world: Point,
        initial_offset: Point,
    },
    FreeSelecting {
        draft: BTreeSet<CellKey>,
    },
}

impl PointerMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DrawingRect { .. } => "drawing-rect",
            Self::DrawingWall { .. } => "drawing-wall",
            Self::DrawingDoor { .. } => "drawing-door",
            Self::MovingSelection { .. } => "moving-selection",
            Self::FreeSelecting { .. } => "free-selecting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(tool.to_string().parse::<Tool>(), Ok(tool));
            assert!(!tool.hint().is_empty());
        }
        assert!("lasso".parse::<Tool>().is_err());
        assert_eq!(
            serde_json::to_string(&Tool::FreeSelect).unwrap(),
            "\"free-select\""
        );
    }

    #[test]
    fn test_wants_pan() {
        let input = PointerInput::new(Point::ORIGIN);
        assert!(!input.wants_pan());
        assert!(input.with_button(PointerButton::Middle).wants_pan());
        assert!(input
            .with_modifiers(Modifiers {
                shift: true,
                ..Modifiers::default()
            })
            .wants_pan());
    }
}
