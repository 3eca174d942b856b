//! Input abstraction layer.
//!
//! Normalizes browser pointer, wheel, click, context-menu and keyboard
//! events into a single `InputEvent` enum consumed by the gesture engine.

use topo_core::Point;
use topo_core::model::ElementIndex;

/// Browser `PointerEvent.pointerId`.
pub type PointerId = i32;

/// One pointer sample with what was under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerInput {
    pub pointer_id: PointerId,
    /// Position in container pixels.
    pub position: Point,
    /// Hit path, innermost → outermost. May be empty (background, or
    /// synthetic events).
    pub path: Vec<ElementIndex>,
    /// The pointer is over a viewport control (zoom buttons) rather than
    /// the drawing.
    pub on_control: bool,
}

impl PointerInput {
    pub fn new(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            position: Point::new(x, y),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: Vec<ElementIndex>) -> Self {
        self.path = path;
        self
    }

    #[must_use]
    pub fn on_control(mut self) -> Self {
        self.on_control = true;
        self
    }

    /// The innermost hit element, if any.
    pub fn target(&self) -> Option<ElementIndex> {
        self.path.first().copied()
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    PointerCancel(PointerInput),
    /// Pointer left the container.
    PointerLeave,
    /// Wheel scroll; only the vertical delta matters.
    Wheel { delta_y: f64 },
    Click(PointerInput),
    ContextMenu(PointerInput),
    /// Keyboard event (`KeyboardEvent.key` plus the command modifiers).
    Key { key: String, ctrl: bool, meta: bool },
}

