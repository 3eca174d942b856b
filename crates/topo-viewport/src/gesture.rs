//! Viewport gesture engine.
//!
//! A state machine over the number of pointers down:
//!
//! - **Idle** (0 pointers): moves are hover; edges are resolved before
//!   nodes and drive the tooltip.
//! - **Panning** (1 pointer): the pan offset follows the pointer; moving
//!   past the threshold marks the gesture as a drag so the trailing click
//!   does not select.
//! - **Pinching** (2 pointers): scale follows the ratio of the current to
//!   the starting pointer distance.
//!
//! Wheel always zooms. Every transform change is painted onto the drawing
//! and reported to the host immediately; there is no batching.

use topo_core::geometry::{clamp_scale, offset_point};
use topo_core::model::ElementIndex;
use topo_core::{EdgeLookup, NodeName, Point, SvgDocument, ViewTransform};
use topo_render::edge::find_edge_from_target;
use topo_render::hit::element_at_point;
use topo_render::node::resolve_node_name;
use topo_render::tooltip::render_edge_tooltip;

use crate::config::ViewportConfig;
use crate::host::{TooltipContent, ViewportHost};
use crate::input::{InputEvent, PointerInput};
use crate::selection::SelectionState;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::state::{Gesture, ViewportState};
use crate::style::paint_transform;

/// What the engine consults and mutates at interaction time.
pub struct Scene<'a> {
    pub doc: &'a mut SvgDocument,
    pub edges: &'a EdgeLookup,
}

impl<'a> Scene<'a> {
    pub fn new(doc: &'a mut SvgDocument, edges: &'a EdgeLookup) -> Self {
        Self { doc, edges }
    }
}

/// One viewport's engine: configuration, gesture state, selection.
#[derive(Debug, Clone)]
pub struct ViewportEngine {
    config: ViewportConfig,
    state: ViewportState,
    selection: SelectionState,
}

impl ViewportEngine {
    /// Create an engine with validated configuration.
    ///
    /// # Errors
    /// Returns the validation message for out-of-range configuration.
    pub fn new(config: ViewportConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config,
            state: ViewportState::default(),
            selection: SelectionState::default(),
        })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn transform(&self) -> ViewTransform {
        self.state.transform
    }

    pub fn gesture(&self) -> Gesture {
        self.state.gesture()
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    pub fn pointer_down(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) {
        if input.on_control {
            return;
        }
        self.state.set_pointer(input.pointer_id, input.position);
        host.capture_pointer(input.pointer_id);

        match self.state.pointer_count() {
            1 => {
                let offset = self.state.transform.offset().to_vec2();
                self.state.is_panning = true;
                self.state.pan_moved = false;
                self.state.pan_start = Some(input.position - offset);
                log::trace!("pan start at {:?}", input.position);
            }
            2 => {
                self.state.pinch_start_distance = self.state.pinch_distance();
                self.state.pinch_start_scale = Some(self.state.transform.scale);
                self.state.is_panning = false;
                self.state.pan_start = None;
                log::trace!(
                    "pinch start: distance {:?} scale {}",
                    self.state.pinch_start_distance,
                    self.state.transform.scale
                );
            }
            _ => {}
        }
        self.repaint(scene.doc);
    }

    pub fn pointer_move(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) {
        if !self.state.move_pointer(input.pointer_id, input.position) {
            // Only a pointer that is down drives a gesture
            if self.state.pointer_count() == 0 {
                self.hover(scene, input, host);
            }
            return;
        }

        if let (Some(current), Some(start_distance), Some(start_scale)) = (
            self.state.pinch_distance(),
            self.state.pinch_start_distance,
            self.state.pinch_start_scale,
        ) {
            if start_distance <= 0.0 {
                return;
            }
            let factor = current / start_distance;
            self.state.transform.scale = self.clamp(start_scale * factor);
            self.state.pan_moved = true;
            self.apply_transform(scene.doc, host);
            return;
        }

        if self.state.is_panning
            && let Some(start) = self.state.pan_start
        {
            let next = input.position - start;
            let threshold = self.config.min_pan_movement_threshold;
            let t = self.state.transform;
            if (next.x - t.x).abs() >= threshold || (next.y - t.y).abs() >= threshold {
                self.state.pan_moved = true;
            }
            self.state.transform.x = next.x;
            self.state.transform.y = next.y;
            self.apply_transform(scene.doc, host);
        }
    }

    pub fn pointer_up(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) {
        if !self.state.remove_pointer(input.pointer_id) {
            return;
        }
        host.release_pointer(input.pointer_id);
        if self.state.pointer_count() < 2 {
            self.state.pinch_start_distance = None;
            self.state.pinch_start_scale = None;
        }
        if self.state.pointer_count() == 0 {
            self.state.is_panning = false;
            self.state.pan_start = None;
            log::trace!("gesture ended, moved: {}", self.state.pan_moved);
        }
        self.repaint(scene.doc);
    }

    pub fn pointer_cancel(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) {
        self.pointer_up(scene, input, host);
    }

    /// Pointer left the container: clear hover and tooltip whatever the
    /// gesture state.
    pub fn pointer_leave(&mut self, host: &mut dyn ViewportHost) {
        self.selection.clear_hover();
        host.hover_node(None);
        host.hover_edge(None);
        host.hide_tooltip();
    }

    /// Hover resolution: an edge wins over a node.
    fn hover(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) {
        let doc = &*scene.doc;
        let tooltip_at = offset_point(input.position, self.config.tooltip_offset_px);
        let target = self.target(doc, input);

        if let Some(edge) = target.and_then(|t| find_edge_from_target(doc, t, scene.edges)) {
            host.show_tooltip(
                tooltip_at,
                TooltipContent::Edge {
                    html: render_edge_tooltip(edge),
                },
            );
            if self.selection.set_hovered_edge(Some(edge.key())) {
                host.hover_edge(Some(edge));
            }
            if self.selection.set_hovered_node(None) {
                host.hover_node(None);
            }
            return;
        }

        if let Some(name) = self.resolve(doc, input) {
            host.show_tooltip(
                tooltip_at,
                TooltipContent::Node {
                    text: name.to_string(),
                },
            );
            if self.selection.set_hovered_edge(None) {
                host.hover_edge(None);
            }
            if self.selection.set_hovered_node(Some(name)) {
                host.hover_node(Some(name));
            }
            return;
        }

        host.hide_tooltip();
        if self.selection.set_hovered_edge(None) {
            host.hover_edge(None);
        }
        if self.selection.set_hovered_node(None) {
            host.hover_node(None);
        }
    }

    // ─── Click / context menu ────────────────────────────────────────────

    /// Select the node under a click. Returns the selected name.
    ///
    /// Clicks on controls, clicks ending a drag, and clicks on nothing are
    /// no-ops; only an explicit clear changes the selection otherwise.
    pub fn click(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) -> Option<NodeName> {
        if input.on_control || self.state.pan_moved {
            log::trace!("click suppressed (control or drag)");
            return None;
        }
        let name = self.resolve(scene.doc, input)?;
        self.selection.select(name);
        host.select_node(name);
        host.hide_tooltip();
        Some(name)
    }

    /// Open the node context menu. Returns true when the browser's native
    /// menu should be suppressed.
    pub fn context_menu(
        &mut self,
        scene: &mut Scene<'_>,
        input: &PointerInput,
        host: &mut dyn ViewportHost,
    ) -> bool {
        let Some(name) = self.resolve(scene.doc, input) else {
            return false;
        };
        host.open_context_menu(input.position, name);
        true
    }

    fn resolve(&self, doc: &SvgDocument, input: &PointerInput) -> Option<NodeName> {
        resolve_node_name(doc, &input.path, input.position, &self.state.transform)
    }

    /// The event target: innermost path element, else whatever is under
    /// the pointer.
    fn target(&self, doc: &SvgDocument, input: &PointerInput) -> Option<ElementIndex> {
        input
            .target()
            .or_else(|| element_at_point(doc, input.position, &self.state.transform))
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    /// Wheel zoom: negative `delta_y` zooms in, positive zooms out.
    pub fn wheel(&mut self, scene: &mut Scene<'_>, delta_y: f64, host: &mut dyn ViewportHost) {
        let step = if delta_y < 0.0 {
            self.config.zoom_increment
        } else if delta_y > 0.0 {
            -self.config.zoom_increment
        } else {
            return;
        };
        self.zoom_by(scene.doc, step, host);
    }

    pub fn zoom_in(&mut self, doc: &mut SvgDocument, host: &mut dyn ViewportHost) {
        self.zoom_by(doc, self.config.zoom_increment, host);
    }

    pub fn zoom_out(&mut self, doc: &mut SvgDocument, host: &mut dyn ViewportHost) {
        self.zoom_by(doc, -self.config.zoom_increment, host);
    }

    fn zoom_by(&mut self, doc: &mut SvgDocument, step: f64, host: &mut dyn ViewportHost) {
        self.state.transform.scale = self.clamp(self.state.transform.scale + step);
        log::trace!("zoom → {}", self.state.transform.scale);
        self.apply_transform(doc, host);
    }

    fn clamp(&self, scale: f64) -> f64 {
        clamp_scale(scale, self.config.min_zoom_scale, self.config.max_zoom_scale)
    }

    // ─── Transform ───────────────────────────────────────────────────────

    /// Back to identity. Pointer and pinch fields are left alone; they are
    /// driven by pointer events.
    pub fn reset_pan(&mut self, doc: &mut SvgDocument, host: &mut dyn ViewportHost) {
        self.state.transform = ViewTransform::IDENTITY;
        self.apply_transform(doc, host);
    }

    /// Restore a persisted transform. The scale is clamped and rounded;
    /// non-finite values are rejected.
    ///
    /// # Errors
    /// Returns a message when a component is NaN or infinite.
    pub fn set_transform(
        &mut self,
        doc: &mut SvgDocument,
        transform: ViewTransform,
        host: &mut dyn ViewportHost,
    ) -> Result<(), String> {
        if ![transform.x, transform.y, transform.scale]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(format!("Transform must be finite, got {transform:?}"));
        }
        self.state.transform = ViewTransform {
            scale: self.clamp(transform.scale),
            ..transform
        };
        self.apply_transform(doc, host);
        Ok(())
    }

    /// Paint the transform onto the drawing and report it to the host.
    pub fn apply_transform(&self, doc: &mut SvgDocument, host: &mut dyn ViewportHost) {
        self.repaint(doc);
        host.update_transform(self.state.transform);
    }

    /// Write transform and cursor into the drawing's style without
    /// notifying the host (cursor changes, freshly loaded drawings).
    pub fn repaint(&self, doc: &mut SvgDocument) {
        paint_transform(doc, &self.state.transform, self.state.is_panning);
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select a node programmatically (deep links, restored state).
    pub fn select(&mut self, name: NodeName, host: &mut dyn ViewportHost) {
        self.selection.select(name);
        host.select_node(name);
    }

    pub fn clear_selection(&mut self, host: &mut dyn ViewportHost) -> Option<NodeName> {
        let previous = self.selection.clear_selection();
        host.selection_cleared();
        previous
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Run a shortcut action.
    pub fn run_shortcut(
        &mut self,
        scene: &mut Scene<'_>,
        action: ShortcutAction,
        host: &mut dyn ViewportHost,
    ) {
        match action {
            ShortcutAction::ZoomIn => self.zoom_in(scene.doc, host),
            ShortcutAction::ZoomOut => self.zoom_out(scene.doc, host),
            ShortcutAction::ResetView => self.reset_pan(scene.doc, host),
            ShortcutAction::ClearSelection => {
                self.clear_selection(host);
            }
        }
    }

    /// Route a normalized input event. Returns true when the host should
    /// prevent the browser's default handling.
    pub fn dispatch(
        &mut self,
        scene: &mut Scene<'_>,
        event: &InputEvent,
        host: &mut dyn ViewportHost,
    ) -> bool {
        match event {
            InputEvent::PointerDown(input) => {
                self.pointer_down(scene, input, host);
                false
            }
            InputEvent::PointerMove(input) => {
                self.pointer_move(scene, input, host);
                false
            }
            InputEvent::PointerUp(input) => {
                self.pointer_up(scene, input, host);
                false
            }
            InputEvent::PointerCancel(input) => {
                self.pointer_cancel(scene, input, host);
                false
            }
            InputEvent::PointerLeave => {
                self.pointer_leave(host);
                false
            }
            InputEvent::Wheel { delta_y } => {
                self.wheel(scene, *delta_y, host);
                true
            }
            InputEvent::Click(input) => {
                self.click(scene, input, host);
                false
            }
            InputEvent::ContextMenu(input) => self.context_menu(scene, input, host),
            InputEvent::Key { key, ctrl, meta } => match ShortcutMap::resolve(key, *ctrl, *meta) {
                Some(action) => {
                    self.run_shortcut(scene, action, host);
                    true
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ActionLog, HostAction};
    use pretty_assertions::assert_eq;
    use topo_core::parse_svg;

    fn config() -> ViewportConfig {
        ViewportConfig {
            min_pan_movement_threshold: 3.0,
            zoom_increment: 0.1,
            min_zoom_scale: 0.5,
            max_zoom_scale: 2.0,
            tooltip_offset_px: 12.0,
        }
    }

    fn fixture() -> (SvgDocument, EdgeLookup) {
        let doc = parse_svg(
            r#"<svg><g aria-label="Switch"><rect x="0" y="0" width="50" height="50"/></g></svg>"#,
        )
        .unwrap();
        (doc, EdgeLookup::default())
    }

    fn engine() -> ViewportEngine {
        ViewportEngine::new(config()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let bad = ViewportConfig {
            min_zoom_scale: 3.0,
            ..config()
        };
        assert!(ViewportEngine::new(bad).is_err());
    }

    #[test]
    fn wheel_zoom_is_clamped_and_rounded() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        for _ in 0..30 {
            engine.wheel(&mut scene, -100.0, &mut host);
            let s = engine.transform().scale;
            assert!((0.5..=2.0).contains(&s));
            assert_eq!(s, (s * 100.0).round() / 100.0);
        }
        assert_eq!(engine.transform().scale, 2.0);

        for _ in 0..30 {
            engine.wheel(&mut scene, 100.0, &mut host);
        }
        assert_eq!(engine.transform().scale, 0.5);

        host.take();
        engine.wheel(&mut scene, 0.0, &mut host);
        assert!(host.is_empty(), "zero delta does nothing");
    }

    #[test]
    fn pan_is_relative_to_current_offset() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine.pointer_down(&mut scene, &PointerInput::new(1, 100.0, 100.0), &mut host);
        engine.pointer_move(&mut scene, &PointerInput::new(1, 130.0, 110.0), &mut host);
        engine.pointer_up(&mut scene, &PointerInput::new(1, 130.0, 110.0), &mut host);
        assert_eq!(engine.transform(), ViewTransform::new(30.0, 10.0, 1.0));

        // Second drag continues from the committed offset
        engine.pointer_down(&mut scene, &PointerInput::new(1, 0.0, 0.0), &mut host);
        engine.pointer_move(&mut scene, &PointerInput::new(1, 5.0, 5.0), &mut host);
        assert_eq!(engine.transform(), ViewTransform::new(35.0, 15.0, 1.0));
        assert!(engine.state().is_panning);
        assert!(
            scene.doc.element(scene.doc.document_element().unwrap())
                .attr("style")
                .unwrap()
                .ends_with("cursor: grabbing")
        );
    }

    #[test]
    fn unregistered_pointer_does_not_drag_a_pan() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine.pointer_down(&mut scene, &PointerInput::new(1, 100.0, 100.0), &mut host);
        host.take();
        // A hovering mouse while a finger is down
        engine.pointer_move(&mut scene, &PointerInput::new(7, 180.0, 160.0), &mut host);
        assert_eq!(engine.transform(), ViewTransform::IDENTITY);
        assert!(!engine.state().pan_moved);
        assert!(host.is_empty());

        engine.pointer_move(&mut scene, &PointerInput::new(1, 110.0, 100.0), &mut host);
        assert_eq!(engine.transform(), ViewTransform::new(10.0, 0.0, 1.0));
    }

    #[test]
    fn zoom_stays_inside_off_grid_bounds() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = ViewportEngine::new(ViewportConfig {
            min_zoom_scale: 0.554,
            max_zoom_scale: 1.996,
            ..config()
        })
        .unwrap();

        for _ in 0..20 {
            engine.wheel(&mut scene, 100.0, &mut host);
            assert!(engine.transform().scale >= 0.554);
        }
        assert_eq!(engine.transform().scale, 0.56);

        for _ in 0..30 {
            engine.wheel(&mut scene, -100.0, &mut host);
            assert!(engine.transform().scale <= 1.996);
        }
        assert_eq!(engine.transform().scale, 1.99);
    }

    #[test]
    fn tap_selects_but_drag_suppresses_click() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();
        let at = |x, y| PointerInput::new(1, x, y);

        engine.pointer_down(&mut scene, &at(10.0, 10.0), &mut host);
        engine.pointer_move(&mut scene, &at(11.0, 11.0), &mut host);
        engine.pointer_up(&mut scene, &at(11.0, 11.0), &mut host);
        let selected = engine.click(&mut scene, &at(11.0, 11.0), &mut host);
        assert_eq!(selected.map(|n| n.to_string()).as_deref(), Some("Switch"));

        engine.pointer_down(&mut scene, &at(10.0, 10.0), &mut host);
        engine.pointer_move(&mut scene, &at(13.0, 10.0), &mut host);
        engine.pointer_up(&mut scene, &at(13.0, 10.0), &mut host);
        assert_eq!(engine.click(&mut scene, &at(13.0, 10.0), &mut host), None);
        assert!(engine.state().pan_moved);
    }

    #[test]
    fn pinch_scales_by_distance_ratio() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine.pointer_down(&mut scene, &PointerInput::new(1, 100.0, 100.0), &mut host);
        engine.pointer_down(&mut scene, &PointerInput::new(2, 200.0, 100.0), &mut host);
        assert_eq!(engine.gesture(), Gesture::Pinching);
        assert!(!engine.state().is_panning);
        assert_eq!(engine.state().pinch_start_distance, Some(100.0));

        engine.pointer_move(&mut scene, &PointerInput::new(2, 250.0, 100.0), &mut host);
        assert_eq!(engine.transform().scale, 1.5);
        engine.pointer_move(&mut scene, &PointerInput::new(2, 900.0, 100.0), &mut host);
        assert_eq!(engine.transform().scale, 2.0);
        assert!(engine.state().pan_moved);

        engine.pointer_up(&mut scene, &PointerInput::new(2, 900.0, 100.0), &mut host);
        assert_eq!(engine.state().pinch_start_distance, None);
        assert_eq!(engine.state().pinch_start_scale, None);
        engine.pointer_up(&mut scene, &PointerInput::new(1, 100.0, 100.0), &mut host);
        assert_eq!(engine.gesture(), Gesture::Idle);
        assert_eq!(engine.state().pan_start, None);
    }

    #[test]
    fn degenerate_pinch_is_not_applied() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine.pointer_down(&mut scene, &PointerInput::new(1, 10.0, 10.0), &mut host);
        engine.pointer_down(&mut scene, &PointerInput::new(2, 10.0, 10.0), &mut host);
        engine.pointer_move(&mut scene, &PointerInput::new(2, 50.0, 10.0), &mut host);
        assert_eq!(engine.transform().scale, 1.0);
    }

    #[test]
    fn control_pointers_are_ignored() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine.pointer_down(&mut scene, &PointerInput::new(1, 10.0, 10.0).on_control(), &mut host);
        assert_eq!(engine.gesture(), Gesture::Idle);
        assert!(host.is_empty());
        let click = PointerInput::new(1, 10.0, 10.0).on_control();
        assert_eq!(engine.click(&mut scene, &click, &mut host), None);
    }

    #[test]
    fn context_menu_only_over_nodes() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();

        assert!(engine.context_menu(&mut scene, &PointerInput::new(1, 20.0, 20.0), &mut host));
        assert_eq!(
            host.take(),
            vec![HostAction::OpenContextMenu {
                x: 20.0,
                y: 20.0,
                name: NodeName::intern("Switch")
            }]
        );
        assert!(!engine.context_menu(&mut scene, &PointerInput::new(1, 300.0, 300.0), &mut host));
        assert!(host.is_empty());
    }

    #[test]
    fn hover_reports_changes_and_leave_clears() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();
        let switch = NodeName::intern("Switch");

        engine.pointer_move(&mut scene, &PointerInput::new(1, 20.0, 20.0), &mut host);
        assert_eq!(
            host.take(),
            vec![
                HostAction::ShowTooltip {
                    x: 32.0,
                    y: 32.0,
                    content: TooltipContent::Node {
                        text: "Switch".into()
                    }
                },
                HostAction::HoverNode { name: Some(switch) },
            ]
        );

        // Same node again: only the tooltip follows the pointer
        engine.pointer_move(&mut scene, &PointerInput::new(1, 25.0, 20.0), &mut host);
        assert_eq!(host.take().len(), 1);

        engine.pointer_leave(&mut host);
        assert_eq!(
            host.take(),
            vec![
                HostAction::HoverNode { name: None },
                HostAction::HoverEdge { edge: None },
                HostAction::HideTooltip,
            ]
        );
        assert_eq!(engine.selection().hovered_node, None);
    }

    #[test]
    fn reset_and_set_transform() {
        let (mut doc, _) = fixture();
        let mut host = ActionLog::new();
        let mut engine = engine();

        engine
            .set_transform(&mut doc, ViewTransform::new(5.0, 6.0, 9.999), &mut host)
            .unwrap();
        assert_eq!(engine.transform(), ViewTransform::new(5.0, 6.0, 2.0));
        assert!(
            engine
                .set_transform(&mut doc, ViewTransform::new(f64::NAN, 0.0, 1.0), &mut host)
                .is_err()
        );

        engine.reset_pan(&mut doc, &mut host);
        assert_eq!(engine.transform(), ViewTransform::IDENTITY);
        assert_eq!(
            host.actions().last(),
            Some(&HostAction::UpdateTransform {
                transform: ViewTransform::IDENTITY
            })
        );
    }

    #[test]
    fn dispatch_routes_keys_and_reports_prevent_default() {
        let (mut doc, edges) = fixture();
        let mut scene = Scene::new(&mut doc, &edges);
        let mut host = ActionLog::new();
        let mut engine = engine();
        let key = |k: &str| InputEvent::Key {
            key: k.into(),
            ctrl: false,
            meta: false,
        };

        assert!(engine.dispatch(&mut scene, &key("+"), &mut host));
        assert_eq!(engine.transform().scale, 1.1);
        assert!(engine.dispatch(&mut scene, &key("0"), &mut host));
        assert_eq!(engine.transform().scale, 1.0);
        assert!(!engine.dispatch(&mut scene, &key("q"), &mut host));

        engine.select(NodeName::intern("Switch"), &mut host);
        assert!(engine.dispatch(&mut scene, &key("Escape"), &mut host));
        assert_eq!(engine.selection().selected, None);
        assert_eq!(host.actions().last(), Some(&HostAction::ClearSelection));

        assert!(engine.dispatch(&mut scene, &InputEvent::Wheel { delta_y: -1.0 }, &mut host));
    }
}
