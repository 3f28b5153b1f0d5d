//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between screen pixels and world coordinates. World units
//! are `grid_pixel_size` pixels wide at scale 1. Screen and world share the
//! same axis directions; the shell decides how the y axis is drawn.

use std::fmt;

use roomkit_core::{Bounds, Point};
use roomkit_settings::EditorConfig;

/// Zoom multiplier per wheel notch.
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Represents the viewport transformation state (scale and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    origin_x: f64,
    origin_y: f64,
    grid_pixel_size: f64,
    zoom_min: f64,
    zoom_max: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport with the world origin at the canvas centre.
    pub fn new(canvas_width: f64, canvas_height: f64, config: &EditorConfig) -> Self {
        Self {
            scale: config.initial_zoom.clamp(config.zoom_min, config.zoom_max),
            origin_x: canvas_width / 2.0,
            origin_y: canvas_height / 2.0,
            grid_pixel_size: config.grid_pixel_size,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale, clamped to the configured zoom range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.zoom_min, self.zoom_max);
    }

    pub fn grid_pixel_size(&self) -> f64 {
        self.grid_pixel_size
    }

    /// Pixels per world unit at the current scale.
    pub fn pixels_per_unit(&self) -> f64 {
        self.scale * self.grid_pixel_size
    }

    /// Screen position of the world origin.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Pans by a delta amount in pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.origin_x += dx;
        self.origin_y += dy;
    }

    /// Converts screen coordinates to world coordinates.
    ///
    /// ```text
    /// world = (screen - origin) / (scale * grid_pixel_size)
    /// ```
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> Point {
        let ppu = self.pixels_per_unit();
        Point::new(
            (screen_x - self.origin_x) / ppu,
            (screen_y - self.origin_y) / ppu,
        )
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> (f64, f64) {
        let ppu = self.pixels_per_unit();
        (
            world.x * ppu + self.origin_x,
            world.y * ppu + self.origin_y,
        )
    }

    /// Zooms to `new_scale`, keeping the world point under the screen position fixed.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, new_scale: f64) {
        let anchor = self.screen_to_world(screen_x, screen_y);
        self.set_scale(new_scale);
        let ppu = self.pixels_per_unit();
        self.origin_x = screen_x - anchor.x * ppu;
        self.origin_y = screen_y - anchor.y * ppu;
    }

    /// Applies one wheel step about the pointer. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, screen_x: f64, screen_y: f64, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_at(screen_x, screen_y, self.scale * factor);
    }

    /// World point at the centre of the canvas.
    pub fn center_world(&self) -> Point {
        self.screen_to_world(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point) {
        let ppu = self.pixels_per_unit();
        self.origin_x = self.canvas_width / 2.0 - world.x * ppu;
        self.origin_y = self.canvas_height / 2.0 - world.y * ppu;
    }

    /// Fits `bounds` into the canvas with `padding` (fraction of each side).
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - (padding * 2.0);
        let scale_x = (self.canvas_width * padding_factor) / (bounds.width * self.grid_pixel_size);
        let scale_y =
            (self.canvas_height * padding_factor) / (bounds.height * self.grid_pixel_size);
        self.set_scale(scale_x.min(scale_y));

        self.center_on(Point::new(
            bounds.min_x + bounds.width / 2.0,
            bounds.min_y + bounds.height / 2.0,
        ));
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.2}x | Origin: ({:.1}, {:.1})",
            self.scale, self.origin_x, self.origin_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0, &EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_screen_world_round_trip() {
        let mut viewport = Viewport::default();
        viewport.set_scale(1.0);
        let world = viewport.screen_to_world(648.0, 400.0);
        assert!(close(world.x, 1.0));
        assert!(close(world.y, 0.0));

        let (sx, sy) = viewport.world_to_screen(Point::new(2.5, -1.0));
        let back = viewport.screen_to_world(sx, sy);
        assert!(close(back.x, 2.5) && close(back.y, -1.0));
    }

    #[test]
    fn test_wheel_zoom_keeps_anchor() {
        let mut viewport = Viewport::default();
        let before = viewport.screen_to_world(100.0, 50.0);
        viewport.wheel(100.0, 50.0, -1.0);
        let after = viewport.screen_to_world(100.0, 50.0);
        assert!(close(before.x, after.x) && close(before.y, after.y));
        assert!(viewport.scale() > 0.85);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.wheel(0.0, 0.0, 1.0);
        }
        assert!(close(viewport.scale(), 0.3));
        viewport.set_scale(100.0);
        assert!(close(viewport.scale(), 4.0));
    }

    #[test]
    fn test_center_on_and_fit() {
        let mut viewport = Viewport::default();
        viewport.pan_by(37.0, -12.0);
        viewport.center_on(Point::new(4.0, 4.0));
        let center = viewport.center_world();
        assert!(close(center.x, 4.0) && close(center.y, 4.0));

        let bounds = Bounds::from_cell_origins([Point::new(0.0, 0.0), Point::new(9.0, 4.0)], 1.0);
        viewport.fit_to_bounds(&bounds, 0.05);
        let center = viewport.center_world();
        assert!(close(center.x, 5.0) && close(center.y, 2.5));
    }
}
