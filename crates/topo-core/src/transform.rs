//! The viewport's pan/zoom transform.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Pan offset in pixels plus a uniform zoom factor.
///
/// Applied to the drawing with `transform-origin: 0 0`, so a drawing-space
/// point `p` lands at `(x + scale * p.x, y + scale * p.y)` in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// The pan offset as a point.
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(self.scale)
    }

    /// Map a viewport point back into drawing coordinates.
    pub fn screen_to_drawing(&self, p: Point) -> Point {
        if self.scale == 0.0 {
            return p;
        }
        self.to_affine().inverse() * p
    }

    /// CSS `transform` value for this transform.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.x, self.y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_transform_formats_compactly() {
        assert_eq!(
            ViewTransform::IDENTITY.css_transform(),
            "translate(0px, 0px) scale(1)"
        );
        assert_eq!(
            ViewTransform::new(12.5, -4.0, 1.5).css_transform(),
            "translate(12.5px, -4px) scale(1.5)"
        );
    }

    #[test]
    fn screen_to_drawing_inverts_pan_and_zoom() {
        let t = ViewTransform::new(100.0, 50.0, 2.0);
        let p = t.screen_to_drawing(Point::new(120.0, 70.0));
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn serde_roundtrip_for_persistence() {
        let t = ViewTransform::new(3.0, 4.0, 1.25);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"x":3.0,"y":4.0,"scale":1.25}"#);
        let back: ViewTransform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
