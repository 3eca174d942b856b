//! SVG element tree.
//!
//! The backend hands us a pre-rendered SVG; everything the interaction core
//! knows about node and edge identity lives in attributes on that drawing.
//! `SvgDocument` is the side-table those attributes are stored in: a tree of
//! `SvgElement` values on a `StableDiGraph`, with edges going parent → child
//! and an explicit child order so siblings can be inserted "right after"
//! an existing element.
//!
//! Text follows the element/tail convention: `text` is the character data
//! before an element's first child, `tail` is the character data after its
//! closing tag (inside the parent). That keeps `text_content` exact for
//! mixed content such as `<text>eth<tspan>0</tspan> uplink</text>`.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Handle to an element inside an `SvgDocument`.
pub type ElementIndex = NodeIndex;

/// Attribute and class names the annotation passes read and write.
pub mod attr {
    /// Machine-intended node identity, stamped by node annotation.
    pub const NODE_ID: &str = "data-node-id";
    /// Accessible label; second in the node trust hierarchy.
    pub const ARIA_LABEL: &str = "aria-label";
    /// Generic element id; last resort for node inference.
    pub const ID: &str = "id";
    /// Endpoint identity on drawn edge paths.
    pub const EDGE_LEFT: &str = "data-edge-left";
    pub const EDGE_RIGHT: &str = "data-edge-right";
    /// Set to `"true"` on paths confirmed against the payload's edge list.
    pub const EDGE: &str = "data-edge";
    /// Set to `"true"` on the invisible wide-stroke sibling of an edge.
    pub const EDGE_HITBOX: &str = "data-edge-hitbox";
    /// Selection marker for group elements.
    pub const SELECTED: &str = "data-selected";
    /// Selection marker class for leaf elements.
    pub const SELECTED_CLASS: &str = "node-selected";
    pub const CLASS: &str = "class";
    pub const STYLE: &str = "style";
}

// ─── Elements ────────────────────────────────────────────────────────────

/// A single `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One element of the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    /// Tag name as written (`g`, `path`, `text`, ...).
    pub tag: String,
    /// Attributes in source order.
    pub attributes: SmallVec<[Attribute; 4]>,
    /// Character data before the first child.
    pub text: String,
    /// Character data after this element's end tag.
    pub tail: String,
}

/// Tag of the synthetic document root.
pub const DOCUMENT_TAG: &str = "#document";

impl SvgElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: SmallVec::new(),
            text: String::new(),
            tail: String::new(),
        }
    }

    /// Builder-style attribute setter, handy in tests and fixtures.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style text setter.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value.to_string();
        } else {
            self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(pos).value)
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr(attr::CLASS).unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr(attr::CLASS) {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim())
            }
            _ => class.to_string(),
        };
        self.set_attr(attr::CLASS, &value);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attr(attr::CLASS);
        } else {
            let joined = remaining.join(" ");
            self.set_attr(attr::CLASS, &joined);
        }
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn is_group(&self) -> bool {
        self.is_tag("g")
    }

    pub fn is_path(&self) -> bool {
        self.is_tag("path")
    }

    /// `<text>` draws characters; `<tspan>` lives inside it and is not
    /// considered a text-drawing element on its own.
    pub fn is_text(&self) -> bool {
        self.is_tag("text")
    }

    pub fn is_title(&self) -> bool {
        self.is_tag("title")
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// A parsed SVG drawing.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    /// The underlying tree (edges go parent → child).
    pub graph: StableDiGraph<SvgElement, ()>,

    /// Synthetic `#document` root; the `<svg>` element is its child.
    pub root: ElementIndex,

    /// Children of each element in document order.
    child_order: HashMap<ElementIndex, Vec<ElementIndex>>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument {
    /// Create an empty document containing only the synthetic root.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(SvgElement::new(DOCUMENT_TAG));
        Self {
            graph,
            root,
            child_order: HashMap::new(),
        }
    }

    /// Number of elements, excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, idx: ElementIndex) -> &SvgElement {
        &self.graph[idx]
    }

    pub fn element_mut(&mut self, idx: ElementIndex) -> &mut SvgElement {
        &mut self.graph[idx]
    }

    pub fn contains(&self, idx: ElementIndex) -> bool {
        self.graph.contains_node(idx)
    }

    /// The outermost drawing element (normally `<svg>`).
    pub fn document_element(&self) -> Option<ElementIndex> {
        let children = self.children(self.root);
        children
            .iter()
            .copied()
            .find(|&idx| self.graph[idx].tag.eq_ignore_ascii_case("svg"))
            .or_else(|| children.first().copied())
    }

    /// Append `element` as the last child of `parent`.
    pub fn append_child(&mut self, parent: ElementIndex, element: SvgElement) -> ElementIndex {
        let idx = self.graph.add_node(element);
        self.graph.add_edge(parent, idx, ());
        self.child_order.entry(parent).or_default().push(idx);
        idx
    }

    /// Insert `element` as the sibling immediately following `sibling`.
    /// Returns `None` when `sibling` is the document root.
    pub fn insert_after(
        &mut self,
        sibling: ElementIndex,
        element: SvgElement,
    ) -> Option<ElementIndex> {
        let parent = self.parent(sibling)?;
        let idx = self.graph.add_node(element);
        self.graph.add_edge(parent, idx, ());
        let order = self.child_order.entry(parent).or_default();
        let pos = order
            .iter()
            .position(|&c| c == sibling)
            .map_or(order.len(), |p| p + 1);
        order.insert(pos, idx);
        Some(idx)
    }

    pub fn parent(&self, idx: ElementIndex) -> Option<ElementIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children of an element in document order.
    pub fn children(&self, idx: ElementIndex) -> &[ElementIndex] {
        self.child_order
            .get(&idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn next_sibling(&self, idx: ElementIndex) -> Option<ElementIndex> {
        let siblings = self.children(self.parent(idx)?);
        let pos = siblings.iter().position(|&c| c == idx)?;
        siblings.get(pos + 1).copied()
    }

    /// Walk from `idx` (inclusive) up to the outermost drawing element.
    /// The synthetic root is never yielded.
    pub fn ancestors(&self, idx: ElementIndex) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(idx),
        }
    }

    /// The ordered hit path for a target: innermost → outermost.
    pub fn composed_path(&self, target: ElementIndex) -> Vec<ElementIndex> {
        self.ancestors(target).collect()
    }

    /// Nearest self-or-ancestor satisfying `pred` (DOM `closest`).
    pub fn closest(
        &self,
        idx: ElementIndex,
        pred: impl Fn(&SvgElement) -> bool,
    ) -> Option<ElementIndex> {
        self.ancestors(idx).find(|&a| pred(&self.graph[a]))
    }

    /// All descendants of `idx` in document (pre-)order, excluding `idx`.
    pub fn descendants(&self, idx: ElementIndex) -> Vec<ElementIndex> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementIndex> = self.children(idx).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// First descendant of `idx` satisfying `pred` (DOM `querySelector`).
    pub fn query(
        &self,
        idx: ElementIndex,
        pred: impl Fn(&SvgElement) -> bool,
    ) -> Option<ElementIndex> {
        self.descendants(idx)
            .into_iter()
            .find(|&d| pred(&self.graph[d]))
    }

    /// Every element in the document satisfying `pred`, in document order.
    pub fn query_all(&self, pred: impl Fn(&SvgElement) -> bool) -> Vec<ElementIndex> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&d| pred(&self.graph[d]))
            .collect()
    }

    /// Concatenated character data of an element and its descendants
    /// (DOM `textContent`).
    pub fn text_content(&self, idx: ElementIndex) -> String {
        let mut out = String::new();
        self.collect_text(idx, &mut out);
        out
    }

    fn collect_text(&self, idx: ElementIndex, out: &mut String) {
        out.push_str(&self.graph[idx].text);
        for &child in self.children(idx) {
            self.collect_text(child, out);
            out.push_str(&self.graph[child].tail);
        }
    }
}

/// Iterator returned by [`SvgDocument::ancestors`].
pub struct Ancestors<'a> {
    doc: &'a SvgDocument,
    next: Option<ElementIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current == self.doc.root || !self.doc.contains(current) {
            self.next = None;
            return None;
        }
        self.next = self.doc.parent(current);
        Some(current)
    }
}
