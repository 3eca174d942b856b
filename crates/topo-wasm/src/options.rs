//! Card options: the outer layer where viewport defaults live.

use serde::Deserialize;
use topo_viewport::ViewportConfig;

/// Options passed by the card element. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardOptions {
    pub min_pan_movement_threshold: f64,
    pub zoom_increment: f64,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    pub tooltip_offset_px: f64,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            min_pan_movement_threshold: 3.0,
            zoom_increment: 0.1,
            min_zoom_scale: 0.5,
            max_zoom_scale: 4.0,
            tooltip_offset_px: 12.0,
            log_level: "warn".to_string(),
        }
    }
}

impl CardOptions {
    /// Parse options JSON; blank input means all defaults.
    ///
    /// # Errors
    /// Returns the decode error message.
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("Invalid card options: {e}"))
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Warn)
    }

    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            min_pan_movement_threshold: self.min_pan_movement_threshold,
            zoom_increment: self.zoom_increment,
            min_zoom_scale: self.min_zoom_scale,
            max_zoom_scale: self.max_zoom_scale,
            tooltip_offset_px: self.tooltip_offset_px,
        }
    }
}
