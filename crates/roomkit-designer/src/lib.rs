//! # RoomKit Designer
//!
//! This crate provides the interior editing engine: a sparse occupancy grid
//! that keeps itself at the coarsest self-consistent resolution, free-standing
//! walls and doors, selections, clipboard, textures and a bounded undo/redo
//! history.
//!
//! ## Core Components
//!
//! ### Model
//! - **Grid**: occupied cells at one cell unit, refined and coarsened on demand
//! - **Segments**: wall and door stores with validity and dedup rules
//! - **State**: one committable snapshot of grid, snap fraction, walls and doors
//! - **History**: linear, bounded undo/redo over shared snapshots
//!
//! ### Editing
//! - **Selection**: area, free, wall and door selections
//! - **Clipboard**: origin-normalized copies of area selections
//! - **Texture**: image validation and `data:` URI encoding
//! - **Editor**: the facade every mutation goes through
//!
//! ### Presentation
//! - **Outline**: merged boundary runs and aggregated render blocks
//! - **Viewport**: screen/world transform, pan and wheel zoom
//! - **Pointer/Keymap**: gesture and shortcut inputs
//!
//! ## Architecture
//!
//! ```text
//! InteriorEditor (facade)
//!   ├── InteriorState (grid, walls, doors, snap)
//!   │     └── commit → settle resolution → History
//!   ├── Selection / Clipboard
//!   ├── PointerMode (gesture state machine)
//!   └── Viewport
//!
//! Derived views (outline, render blocks, previews) never write back.
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use roomkit_core::Point;
//! use roomkit_designer::InteriorEditor;
//!
//! let mut editor = InteriorEditor::new();
//! editor.paint_rect(Point::new(0.0, 0.0), Point::new(2.0, 2.0)).unwrap();
//! assert_eq!(editor.unit(), 2.0);
//! ```

pub mod clipboard;
pub mod editor;
pub mod grid;
pub mod history;
pub mod keymap;
pub mod outline;
pub mod pointer;
pub mod segments;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod status;
pub mod texture;
pub mod viewport;

pub use clipboard::Clipboard;
pub use editor::{DoorInfo, DraftPreview, HoverCell, InteriorEditor, SegmentView};
pub use grid::{CellSet, Grid, Optimized, TextureMap};
pub use history::{History, DEFAULT_HISTORY_DEPTH};
pub use keymap::{map_key, EditorAction, KeyInput};
pub use outline::{
    aggregate_render_blocks, compute_outline, merge_segments, Axis, OutlineSegment, RenderBlock,
};
pub use pointer::{Modifiers, PointerButton, PointerInput, PointerMode, RectTool, Tool};
pub use segments::{DoorOrientation, Segment, SegmentId, SegmentKind, SegmentStore};
pub use selection::{AreaSelection, FreeSelection, Selection, SelectionKind};
pub use snapshot::EditorSnapshot;
pub use state::InteriorState;
pub use status::{StatusLevel, StatusMessage};
pub use texture::{encode_data_uri, is_image_mime, PendingTexture, TextureRef};
pub use viewport::Viewport;
