//! RoomKit Settings Crate
//!
//! Handles editor configuration: defaults, validation and file I/O.

pub mod config;
pub mod error;

pub use config::EditorConfig;
pub use error::{SettingsError, SettingsResult};
