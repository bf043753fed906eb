//! Grid settings and snap quantization.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid cell size (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;
/// Smallest cell size the grid accepts.
pub const MIN_GRID_SIZE: f64 = 5.0;
/// Largest cell size the grid accepts.
pub const MAX_GRID_SIZE: f64 = 50.0;

/// Grid display and snapping policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Whether the grid is drawn.
    pub enabled: bool,
    /// Distance between grid lines in document units.
    pub cell_size: f64,
    /// Whether document points are quantized to the grid.
    pub snap_enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: GRID_SIZE,
            snap_enabled: false,
        }
    }
}

impl GridSettings {
    /// Toggle grid visibility.
    pub fn toggle_grid(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Toggle snapping.
    pub fn toggle_snap(&mut self) {
        self.snap_enabled = !self.snap_enabled;
    }

    /// Set the cell size, clamped to the accepted range.
    /// Non-finite sizes are ignored.
    pub fn set_cell_size(&mut self, size: f64) {
        if size.is_finite() {
            self.cell_size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        }
    }

    /// Snap a point according to these settings.
    pub fn snap(&self, point: Point) -> Point {
        snap_point(point, self)
    }
}

/// Snap a point to the nearest grid intersection.
///
/// Ties round half away from zero.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Snap a point based on the grid settings.
pub fn snap_point(point: Point, grid: &GridSettings) -> Point {
    if grid.snap_enabled && grid.cell_size > 0.0 {
        snap_to_grid(point, grid.cell_size)
    } else {
        point
    }
}
