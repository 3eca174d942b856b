//! WASM bridge for the topology card. Exposes the viewport engine to the
//! dashboard's custom element.
//!
//! Compiled via `wasm-pack build --target web`. The element forwards raw
//! DOM events here and applies the returned host actions (JSON arrays of
//! `{"type": ...}` objects) to its tooltip, panels and context menu.

mod options;

pub use options::CardOptions;

use topo_core::geometry::clamp_to_viewport;
use topo_core::{
    EdgeLookup, NodeName, Point, Size, SvgDocument, TopologyPayload, ViewTransform, emit_svg,
    parse_svg,
};
use topo_render::hit::hit_path;
use topo_render::node::highlight_selected_node;
use topo_viewport::{
    ActionLog, AnnotationCache, AnnotationOutcome, InputEvent, PointerInput, Scene,
    ViewportEngine, run_annotation_pass,
};
use wasm_bindgen::prelude::*;

/// One card's viewport: drawing, payload, annotation cache and engine.
///
/// Every `handle_*` method returns the host actions the event produced as
/// a JSON array.
#[wasm_bindgen]
pub struct TopologyCard {
    doc: SvgDocument,
    /// Markup `doc` was parsed from; hashed by the annotation cache.
    svg_text: String,
    payload: TopologyPayload,
    edges: EdgeLookup,
    cache: AnnotationCache,
    engine: ViewportEngine,
    host: ActionLog,
}

#[wasm_bindgen]
impl TopologyCard {
    /// Create a card from options JSON (empty string for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str) -> Result<TopologyCard, JsValue> {
        let options = CardOptions::from_json(options_json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e)))?;
        init_logging(options.log_level());
        Self::with_options(&options).map_err(|e| JsValue::from(js_sys::Error::new(&e)))
    }

    /// Replace the drawing with freshly fetched markup.
    /// Returns `false` (and keeps the old drawing) if it does not parse.
    pub fn load_svg(&mut self, markup: &str) -> bool {
        let doc = match parse_svg(markup) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("rejected drawing: {e}");
                return false;
            }
        };
        self.doc = doc;
        self.svg_text = markup.to_string();
        self.cache.invalidate();
        self.annotate();
        self.sync_highlight();
        self.engine.repaint(&mut self.doc);
        true
    }

    /// Replace the topology payload (JSON). Returns `false` on bad JSON.
    pub fn set_payload(&mut self, json: &str) -> bool {
        let payload: TopologyPayload = match serde_json::from_str(json) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("rejected payload: {e}");
                return false;
            }
        };
        self.edges = payload.edge_lookup();
        self.payload = payload;
        self.annotate();
        true
    }

    /// Current drawing markup, annotations and transform included.
    pub fn svg_markup(&self) -> String {
        emit_svg(&self.doc)
    }

    /// Inline style of the drawing element (transform, origin, cursor).
    pub fn drawing_style(&self) -> String {
        self.doc
            .document_element()
            .and_then(|svg| self.doc.element(svg).attr("style"))
            .unwrap_or_default()
            .to_string()
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    pub fn handle_pointer_down(
        &mut self,
        pointer_id: i32,
        x: f64,
        y: f64,
        on_control: bool,
    ) -> String {
        let mut input = self.pointer(pointer_id, x, y);
        input.on_control = on_control;
        self.run(InputEvent::PointerDown(input))
    }

    pub fn handle_pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> String {
        let input = self.pointer(pointer_id, x, y);
        self.run(InputEvent::PointerMove(input))
    }

    pub fn handle_pointer_up(&mut self, pointer_id: i32, x: f64, y: f64) -> String {
        self.run(InputEvent::PointerUp(PointerInput::new(pointer_id, x, y)))
    }

    pub fn handle_pointer_cancel(&mut self, pointer_id: i32, x: f64, y: f64) -> String {
        self.run(InputEvent::PointerCancel(PointerInput::new(pointer_id, x, y)))
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        self.run(InputEvent::PointerLeave)
    }

    /// Wheel zoom. The element always prevents the page from scrolling.
    pub fn handle_wheel(&mut self, delta_y: f64) -> String {
        self.run(InputEvent::Wheel { delta_y })
    }

    pub fn handle_click(&mut self, x: f64, y: f64, on_control: bool) -> String {
        let mut input = self.pointer(0, x, y);
        input.on_control = on_control;
        let actions = self.run(InputEvent::Click(input));
        self.sync_highlight();
        actions
    }

    /// Context menu. A non-empty result means the native menu must be
    /// suppressed.
    pub fn handle_context_menu(&mut self, x: f64, y: f64) -> String {
        let input = self.pointer(0, x, y);
        self.run(InputEvent::ContextMenu(input))
    }

    /// Keyboard shortcut. A non-empty result means the key was handled.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, meta: bool) -> String {
        let actions = self.run(InputEvent::Key {
            key: key.to_string(),
            ctrl,
            meta,
        });
        self.sync_highlight();
        actions
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn reset_view(&mut self) -> String {
        self.engine.reset_pan(&mut self.doc, &mut self.host);
        self.drain()
    }

    pub fn zoom_in(&mut self) -> String {
        self.engine.zoom_in(&mut self.doc, &mut self.host);
        self.drain()
    }

    pub fn zoom_out(&mut self) -> String {
        self.engine.zoom_out(&mut self.doc, &mut self.host);
        self.drain()
    }

    /// Current transform as `{"x":..,"y":..,"scale":..}`.
    pub fn get_transform(&self) -> String {
        serde_json::to_string(&self.engine.transform()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Restore a transform saved with [`get_transform`](Self::get_transform).
    pub fn set_transform(&mut self, json: &str) -> String {
        let restored = serde_json::from_str::<ViewTransform>(json)
            .map_err(|e| format!("Invalid transform: {e}"))
            .and_then(|t| self.engine.set_transform(&mut self.doc, t, &mut self.host));
        if let Err(e) = restored {
            log::warn!("{e}");
        }
        self.drain()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select a node by name (deep links, restored state).
    pub fn select_node(&mut self, name: &str) -> String {
        if let Some(name) = NodeName::from_trimmed(name) {
            self.engine.select(name, &mut self.host);
            self.sync_highlight();
        }
        self.drain()
    }

    /// Explicit deselect (back/reset in the side panel).
    pub fn clear_selection(&mut self) -> String {
        self.engine.clear_selection(&mut self.host);
        self.sync_highlight();
        self.drain()
    }

    pub fn selected_node(&self) -> Option<String> {
        self.engine.selection().selected.map(|n| n.to_string())
    }

    /// Keep a laid-out context menu inside the card. Returns `{"x":..,"y":..}`.
    pub fn clamp_menu_position(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        bounds_width: f64,
        bounds_height: f64,
    ) -> String {
        let p = clamp_to_viewport(
            Point::new(x, y),
            Size::new(width, height),
            Size::new(bounds_width, bounds_height),
        );
        serde_json::json!({ "x": p.x, "y": p.y }).to_string()
    }
}

impl TopologyCard {
    /// Build a card without touching any JavaScript APIs.
    ///
    /// # Errors
    /// Returns the configuration validation message.
    pub fn with_options(options: &CardOptions) -> Result<Self, String> {
        Ok(Self {
            doc: SvgDocument::new(),
            svg_text: String::new(),
            payload: TopologyPayload::default(),
            edges: EdgeLookup::default(),
            cache: AnnotationCache::new(),
            engine: ViewportEngine::new(options.viewport_config())?,
            host: ActionLog::new(),
        })
    }

    pub fn engine(&self) -> &ViewportEngine {
        &self.engine
    }

    pub fn document(&self) -> &SvgDocument {
        &self.doc
    }

    fn pointer(&self, pointer_id: i32, x: f64, y: f64) -> PointerInput {
        let path = hit_path(&self.doc, Point::new(x, y), &self.engine.transform());
        PointerInput::new(pointer_id, x, y).with_path(path)
    }

    fn run(&mut self, event: InputEvent) -> String {
        let mut scene = Scene::new(&mut self.doc, &self.edges);
        self.engine.dispatch(&mut scene, &event, &mut self.host);
        self.drain()
    }

    fn drain(&mut self) -> String {
        serde_json::to_string(&self.host.take()).unwrap_or_else(|_| "[]".to_string())
    }

    fn annotate(&mut self) {
        if self.svg_text.is_empty() {
            return;
        }
        let outcome =
            run_annotation_pass(&mut self.doc, &self.svg_text, &self.payload, &mut self.cache);
        if let AnnotationOutcome::Annotated { edges, .. } = outcome
            && edges.unmatched > 0
        {
            log::debug!("{} drawn edges are not in the payload", edges.unmatched);
        }
    }

    fn sync_highlight(&mut self) {
        let selected = self.engine.selection().selected;
        highlight_selected_node(&mut self.doc, selected.as_ref().map(NodeName::as_str));
    }
}

fn init_logging(level: log::Level) {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Topology card WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            let _ = console_log::init_with_level(level);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}
