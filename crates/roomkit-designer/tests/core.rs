#[path = "core/grid.rs"]
mod grid;
#[path = "core/outline.rs"]
mod outline;
#[path = "core/segments.rs"]
mod segments;
