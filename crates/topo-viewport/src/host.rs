//! Callback surface between the engine and whatever hosts the viewport.
//!
//! The engine never renders HTML. It tells the host what happened
//! (select, hover, context menu, transform changed, tooltip) and leaves
//! panels, menus and tooltips to it.

use serde::{Deserialize, Serialize};
use topo_core::{Edge, NodeName, Point, ViewTransform};

use crate::input::PointerId;

/// What a tooltip should display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TooltipContent {
    /// Pre-rendered HTML for a hovered edge.
    Edge { html: String },
    /// Plain text (a node name).
    Node { text: String },
}

/// Callbacks invoked by the gesture engine.
pub trait ViewportHost {
    fn select_node(&mut self, name: NodeName);
    fn hover_node(&mut self, name: Option<NodeName>);
    fn hover_edge(&mut self, edge: Option<&Edge>);
    /// Open the node context menu at `position` (container pixels).
    fn open_context_menu(&mut self, position: Point, name: NodeName);
    fn update_transform(&mut self, transform: ViewTransform);
    fn show_tooltip(&mut self, position: Point, content: TooltipContent);
    fn hide_tooltip(&mut self);

    /// Selection was cleared explicitly (Escape, back/reset).
    fn selection_cleared(&mut self) {}

    /// Route further events for `pointer_id` to the container.
    fn capture_pointer(&mut self, _pointer_id: PointerId) {}

    fn release_pointer(&mut self, _pointer_id: PointerId) {}
}

/// A recorded host callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostAction {
    SelectNode {
        name: NodeName,
    },
    HoverNode {
        name: Option<NodeName>,
    },
    HoverEdge {
        edge: Option<Edge>,
    },
    OpenContextMenu {
        x: f64,
        y: f64,
        name: NodeName,
    },
    UpdateTransform {
        transform: ViewTransform,
    },
    ShowTooltip {
        x: f64,
        y: f64,
        content: TooltipContent,
    },
    HideTooltip,
    ClearSelection,
    #[serde(rename_all = "camelCase")]
    CapturePointer {
        pointer_id: PointerId,
    },
    #[serde(rename_all = "camelCase")]
    ReleasePointer {
        pointer_id: PointerId,
    },
}

/// Host that records every callback, in order.
///
/// The WASM bridge drains it after each event and hands the batch to
/// JavaScript; tests assert on it directly.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Vec<HostAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[HostAction] {
        &self.actions
    }

    /// Drain the recorded actions.
    pub fn take(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn push(&mut self, action: HostAction) {
        self.actions.push(action);
    }
}

impl ViewportHost for ActionLog {
    fn select_node(&mut self, name: NodeName) {
        self.push(HostAction::SelectNode { name });
    }

    fn hover_node(&mut self, name: Option<NodeName>) {
        self.push(HostAction::HoverNode { name });
    }

    fn hover_edge(&mut self, edge: Option<&Edge>) {
        self.push(HostAction::HoverEdge {
            edge: edge.cloned(),
        });
    }

    fn open_context_menu(&mut self, position: Point, name: NodeName) {
        self.push(HostAction::OpenContextMenu {
            x: position.x,
            y: position.y,
            name,
        });
    }

    fn update_transform(&mut self, transform: ViewTransform) {
        self.push(HostAction::UpdateTransform { transform });
    }

    fn show_tooltip(&mut self, position: Point, content: TooltipContent) {
        self.push(HostAction::ShowTooltip {
            x: position.x,
            y: position.y,
            content,
        });
    }

    fn hide_tooltip(&mut self) {
        self.push(HostAction::HideTooltip);
    }

    fn selection_cleared(&mut self) {
        self.push(HostAction::ClearSelection);
    }

    fn capture_pointer(&mut self, pointer_id: PointerId) {
        self.push(HostAction::CapturePointer { pointer_id });
    }

    fn release_pointer(&mut self, pointer_id: PointerId) {
        self.push(HostAction::ReleasePointer { pointer_id });
    }
}
