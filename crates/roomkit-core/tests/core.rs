#[path = "core/cell_key.rs"]
mod cell_key;
#[path = "core/geometry.rs"]
mod geometry;
