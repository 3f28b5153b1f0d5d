//! Editor configuration
//!
//! Tunables for the interior editor: history depth, pick tolerance, the
//! initial grid resolution and the viewport zoom range. Stored as TOML or JSON.

use std::path::{Path, PathBuf};

use roomkit_core::{is_cell_unit, SNAP_DENOMINATOR_OPTIONS};
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

fn default_history_depth() -> usize {
    200
}

fn default_pick_tolerance() -> f64 {
    0.35
}

fn default_initial_cell_unit() -> f64 {
    1.0
}

fn default_initial_snap_denominator() -> u32 {
    1
}

fn default_max_rect_cells() -> usize {
    250_000
}

fn default_grid_pixel_size() -> f64 {
    48.0
}

fn default_zoom_min() -> f64 {
    0.3
}

fn default_zoom_max() -> f64 {
    4.0
}

fn default_initial_zoom() -> f64 {
    0.85
}

/// Interior editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum number of history entries kept; the oldest is evicted first
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Wall/door pick distance in world units
    #[serde(default = "default_pick_tolerance")]
    pub pick_tolerance: f64,
    /// Largest number of cells one rectangle paint or erase may cover
    #[serde(default = "default_max_rect_cells")]
    pub max_rect_cells: usize,
    /// Cell unit of a fresh, empty interior
    #[serde(default = "default_initial_cell_unit")]
    pub initial_cell_unit: f64,
    /// Snap denominator of a fresh interior (0 = free)
    #[serde(default = "default_initial_snap_denominator")]
    pub initial_snap_denominator: u32,
    /// Pixels per world unit at zoom 1
    #[serde(default = "default_grid_pixel_size")]
    pub grid_pixel_size: f64,
    #[serde(default = "default_zoom_min")]
    pub zoom_min: f64,
    #[serde(default = "default_zoom_max")]
    pub zoom_max: f64,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: default_history_depth(),
            pick_tolerance: default_pick_tolerance(),
            max_rect_cells: default_max_rect_cells(),
            initial_cell_unit: default_initial_cell_unit(),
            initial_snap_denominator: default_initial_snap_denominator(),
            grid_pixel_size: default_grid_pixel_size(),
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            initial_zoom: default_initial_zoom(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("none").to_string(),
        )),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/roomkit/editor.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(base.join("roomkit").join("editor.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No editor config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history_depth == 0 {
            return Err(SettingsError::invalid("history_depth", "must be > 0"));
        }

        if !(self.pick_tolerance > 0.0) {
            return Err(SettingsError::invalid("pick_tolerance", "must be > 0"));
        }

        if self.max_rect_cells == 0 {
            return Err(SettingsError::invalid("max_rect_cells", "must be > 0"));
        }

        if !is_cell_unit(self.initial_cell_unit) {
            return Err(SettingsError::invalid(
                "initial_cell_unit",
                format!("{} is not a supported cell unit", self.initial_cell_unit),
            ));
        }

        if !SNAP_DENOMINATOR_OPTIONS.contains(&self.initial_snap_denominator) {
            return Err(SettingsError::invalid(
                "initial_snap_denominator",
                format!("{} is not one of 0, 1, 2, 4, 8", self.initial_snap_denominator),
            ));
        }

        if !(self.grid_pixel_size > 0.0) {
            return Err(SettingsError::invalid("grid_pixel_size", "must be > 0"));
        }

        if !(self.zoom_min > 0.0) || self.zoom_min >= self.zoom_max {
            return Err(SettingsError::invalid(
                "zoom_min",
                "must be > 0 and below zoom_max",
            ));
        }

        if self.initial_zoom < self.zoom_min || self.initial_zoom > self.zoom_max {
            return Err(SettingsError::invalid(
                "initial_zoom",
                "must lie within the zoom range",
            ));
        }

        Ok(())
    }
}
