//! Keyboard shortcuts.

/// A key press as reported by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyInput {
    /// Key name as in DOM `KeyboardEvent.key` ("Escape", "z", "Delete").
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    /// A text field has focus.
    pub editable_focus: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Same key with Ctrl held.
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_editable(mut self) -> Self {
        self.editable_focus = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Delete,
    ClearSelection,
    Undo,
    Redo,
    Copy,
    Paste,
    Cut,
}

/// Maps a key press to an editor action.
///
/// Escape works everywhere; every other shortcut is ignored while a text
/// field has focus.
pub fn map_key(input: &KeyInput) -> Option<EditorAction> {
    if input.key == "Escape" {
        return Some(EditorAction::ClearSelection);
    }
    if input.editable_focus {
        return None;
    }

    if matches!(input.key.as_str(), "Delete" | "Backspace") {
        return Some(EditorAction::Delete);
    }

    if !(input.ctrl || input.meta) {
        return None;
    }
    match input.key.to_lowercase().as_str() {
        "z" if input.shift => Some(EditorAction::Redo),
        "z" => Some(EditorAction::Undo),
        "y" => Some(EditorAction::Redo),
        "c" => Some(EditorAction::Copy),
        "v" => Some(EditorAction::Paste),
        "x" => Some(EditorAction::Cut),
        _ => None,
    }
}
