//! Engine configuration.

use crate::shapes::ShapeStyle;
use crate::snap::{GRID_SIZE, GridSettings};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Settings a [`Canvas`](crate::Canvas) is constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Size of the live viewport in device pixels.
    pub viewport_size: Size,
    /// Initial grid settings.
    pub grid: GridSettings,
    /// Style given to newly drawn shapes.
    pub new_shape_style: ShapeStyle,
    /// Maximum number of history entries (`None` = unbounded).
    pub history_limit: Option<usize>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport_size: Size::new(800.0, 600.0),
            grid: GridSettings::default(),
            new_shape_style: ShapeStyle::default(),
            history_limit: None,
        }
    }
}

impl CanvasConfig {
    /// Bring loaded values back inside the engine's limits.
    ///
    /// The grid cell size is clamped like `setGridSize`; a non-finite size
    /// falls back to the default. A zero stroke width falls back to the
    /// default style's width.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        let requested = config.grid.cell_size;
        config.grid.cell_size = GRID_SIZE;
        config.grid.set_cell_size(requested);
        if config.grid.cell_size != requested {
            log::warn!(
                "grid cell size {requested} out of range, using {}",
                config.grid.cell_size
            );
        }

        if config.new_shape_style.stroke_width == 0 {
            let width = ShapeStyle::default().stroke_width;
            log::warn!("stroke width 0 is not allowed, using {width}");
            config.new_shape_style.stroke_width = width;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::{MAX_GRID_SIZE, MIN_GRID_SIZE};

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "history_limit": 50,
            "grid": {"enabled": false, "cell_size": 10.0, "snap_enabled": true}
        }"#;
        let config: CanvasConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.history_limit, Some(50));
        assert!(config.grid.snap_enabled);
        assert_eq!(config.viewport_size, Size::new(800.0, 600.0));
        assert_eq!(config.new_shape_style, ShapeStyle::default());
    }

    #[test]
    fn test_sanitized_clamps_cell_size() {
        let json = r#"{"grid": {"enabled": true, "cell_size": -20.0, "snap_enabled": true}}"#;
        let config: CanvasConfig = serde_json::from_str(json).unwrap();
        assert!((config.sanitized().grid.cell_size - MIN_GRID_SIZE).abs() < f64::EPSILON);

        let mut config = CanvasConfig::default();
        config.grid.cell_size = 500.0;
        assert!((config.sanitized().grid.cell_size - MAX_GRID_SIZE).abs() < f64::EPSILON);
        config.grid.cell_size = f64::NAN;
        assert!((config.sanitized().grid.cell_size - GRID_SIZE).abs() < f64::EPSILON);
        config.grid.cell_size = 25.0;
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_sanitized_rejects_zero_stroke_width() {
        let mut config = CanvasConfig::default();
        config.new_shape_style.stroke_width = 0;
        let sanitized = config.sanitized();
        assert_eq!(sanitized.new_shape_style.stroke_width, 2);
        assert_eq!(sanitized.grid, config.grid);
    }
}
