#[path = "features/clipboard.rs"]
mod clipboard;
#[path = "features/editing.rs"]
mod editing;
#[path = "features/persistence.rs"]
mod persistence;
#[path = "features/textures.rs"]
mod textures;
