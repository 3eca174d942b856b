//! Edge annotation and hit resolution.
//!
//! Drawn edges are `<path>` elements carrying `data-edge-left` /
//! `data-edge-right`. Annotation confirms them against the payload's edge
//! list and gives each a wide transparent sibling so thin strokes stay
//! easy to point at. Resolution walks a hit element back up to a confirmed
//! edge or hitbox and looks the endpoint pair up in the current payload.

use topo_core::model::{ElementIndex, SvgDocument, SvgElement, attr};
use topo_core::payload::{Edge, EdgeLookup};

/// Stroke width of the invisible hitbox path.
pub const HITBOX_STROKE_WIDTH: &str = "12";

/// Attributes copied from an edge path onto its hitbox.
const HITBOX_COPIED: [&str; 4] = ["d", "transform", attr::EDGE_LEFT, attr::EDGE_RIGHT];

/// Outcome of one [`annotate_edges`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeAnnotation {
    /// Paths whose endpoint pair is in the edge list.
    pub confirmed: usize,
    /// Hitboxes inserted by this run.
    pub hitboxes_added: usize,
    /// Paths with endpoint attributes but no matching edge.
    pub unmatched: usize,
}

fn is_hitbox(el: &SvgElement) -> bool {
    el.attr(attr::EDGE_HITBOX) == Some("true")
}

fn has_endpoints(el: &SvgElement) -> bool {
    el.is_path() && el.has_attr(attr::EDGE_LEFT) && el.has_attr(attr::EDGE_RIGHT)
}

/// Build the hitbox twin of an edge path.
fn make_hitbox(source: &SvgElement) -> SvgElement {
    let mut hitbox = SvgElement::new(source.tag.clone());
    for name in HITBOX_COPIED {
        if let Some(value) = source.attr(name) {
            hitbox.set_attr(name, value);
        }
    }
    hitbox
        .with_attr(attr::EDGE_HITBOX, "true")
        .with_attr("stroke", "transparent")
        .with_attr("stroke-width", HITBOX_STROKE_WIDTH)
        .with_attr("fill", "none")
        .with_attr("pointer-events", "stroke")
}

/// Mark every drawn path whose endpoints match an edge, and make sure a
/// hitbox immediately follows it. Safe to call repeatedly.
pub fn annotate_edges(doc: &mut SvgDocument, edges: &EdgeLookup) -> EdgeAnnotation {
    let mut report = EdgeAnnotation::default();
    let candidates = doc.query_all(|el| has_endpoints(el) && !is_hitbox(el));

    for idx in candidates {
        let el = doc.element(idx);
        let (Some(left), Some(right)) = (el.attr(attr::EDGE_LEFT), el.attr(attr::EDGE_RIGHT))
        else {
            continue;
        };
        if edges.get(left, right).is_none() {
            report.unmatched += 1;
            continue;
        }
        let hitbox = make_hitbox(el);
        doc.element_mut(idx).set_attr(attr::EDGE, "true");
        report.confirmed += 1;

        let followed = doc
            .next_sibling(idx)
            .is_some_and(|next| is_hitbox(doc.element(next)));
        if !followed && doc.insert_after(idx, hitbox).is_some() {
            report.hitboxes_added += 1;
        }
    }
    log::trace!(
        "edge annotation: {} confirmed, {} hitboxes added, {} unmatched",
        report.confirmed,
        report.hitboxes_added,
        report.unmatched
    );
    report
}

/// Resolve the logical edge a hit element belongs to.
///
/// Returns `None` when no enclosing element is a confirmed edge or hitbox,
/// or when its endpoint pair is not in `edges` (stale drawing).
pub fn find_edge_from_target<'a>(
    doc: &SvgDocument,
    target: ElementIndex,
    edges: &'a EdgeLookup,
) -> Option<&'a Edge> {
    if !doc.contains(target) {
        return None;
    }
    let marked = doc.closest(target, |el| {
        el.attr(attr::EDGE) == Some("true") || is_hitbox(el)
    })?;
    let el = doc.element(marked);
    edges.get(el.attr(attr::EDGE_LEFT)?, el.attr(attr::EDGE_RIGHT)?)
}

/// First element on a hit path that resolves to an edge.
pub fn find_edge_on_path<'a>(
    doc: &SvgDocument,
    path: &[ElementIndex],
    edges: &'a EdgeLookup,
) -> Option<&'a Edge> {
    path.first()
        .and_then(|&target| find_edge_from_target(doc, target, edges))
}
