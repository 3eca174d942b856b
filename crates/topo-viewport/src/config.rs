//! Viewport tuning.

use serde::Deserialize;

// ─── Config ───────────────────────────────────────────────────────────────

/// Numeric tuning consumed by the gesture engine.
///
/// Every field is required: the engine applies no defaults of its own, so
/// each call site decides its own feel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Pixels a pan must move on either axis before it counts as a drag.
    pub min_pan_movement_threshold: f64,
    /// Scale step for one wheel notch or zoom button press.
    pub zoom_increment: f64,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    /// Tooltip distance from the pointer on both axes.
    pub tooltip_offset_px: f64,
}

impl ViewportConfig {
    /// Check the ranges the engine relies on.
    ///
    /// # Errors
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("minPanMovementThreshold", self.min_pan_movement_threshold),
            ("zoomIncrement", self.zoom_increment),
            ("minZoomScale", self.min_zoom_scale),
            ("maxZoomScale", self.max_zoom_scale),
            ("tooltipOffsetPx", self.tooltip_offset_px),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be a finite number, got {value}"));
        }
        if self.min_zoom_scale <= 0.0 {
            return Err(format!(
                "minZoomScale must be positive, got {}",
                self.min_zoom_scale
            ));
        }
        if self.min_zoom_scale > self.max_zoom_scale {
            return Err(format!(
                "minZoomScale ({}) exceeds maxZoomScale ({})",
                self.min_zoom_scale, self.max_zoom_scale
            ));
        }
        if self.zoom_increment <= 0.0 {
            return Err(format!(
                "zoomIncrement must be positive, got {}",
                self.zoom_increment
            ));
        }
        if self.min_pan_movement_threshold < 0.0 {
            return Err(format!(
                "minPanMovementThreshold must not be negative, got {}",
                self.min_pan_movement_threshold
            ));
        }
        if self.tooltip_offset_px < 0.0 {
            return Err(format!(
                "tooltipOffsetPx must not be negative, got {}",
                self.tooltip_offset_px
            ));
        }
        Ok(())
    }

    /// Deserialize from JSON and validate.
    ///
    /// # Errors
    /// Returns the decode or validation message.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("Invalid viewport config: {e}"))?;
        config.validate()?;
        Ok(config)
    }
}
