//! # RoomKit
//!
//! Interior grid and selection engine for a 2D level editor:
//! - Sparse occupancy grid kept at the coarsest consistent cell unit
//! - Free-standing walls and doors with dedup and validity rules
//! - Area and free selections, drag-move, copy/paste and textures
//! - Bounded linear undo/redo history
//!
//! ## Architecture
//!
//! RoomKit is organized as a workspace with multiple crates:
//!
//! 1. **roomkit-core** - Geometry, cell keys, unit tables, error taxonomy
//! 2. **roomkit-settings** - Editor configuration and validation
//! 3. **roomkit-designer** - Grid model, selections, history and the editor facade
//! 4. **roomkit** - Re-exports and logging setup for host shells

pub use roomkit_core::{
    CellKey, EditError, Error, KeyError, Point, Result, SnapFraction, CELL_UNIT_OPTIONS,
};
pub use roomkit_designer as designer;
pub use roomkit_settings as settings;

pub use roomkit_designer::{
    Clipboard, DraftPreview, EditorAction, EditorSnapshot, Grid, History, HoverCell,
    InteriorEditor, InteriorState, KeyInput, PointerInput, PointerMode, Segment, SegmentKind,
    Selection, SelectionKind, StatusLevel, StatusMessage, TextureRef, Tool, Viewport,
};
pub use roomkit_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logging initialized");
    Ok(())
}
