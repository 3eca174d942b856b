//! Node resolution: drawing elements ↔ logical node names.
//!
//! The backend's SVG is authored inconsistently. Some nodes carry a
//! dedicated identity attribute, some only an `aria-label`, some nothing
//! but visible `<text>` or a `<title>`. Every lookup below is an ordered
//! list of probes, tried in trust order (identity, label, text, title);
//! the first non-empty trimmed candidate wins.

use kurbo::Point;
use std::collections::{HashMap, HashSet};
use topo_core::id::NodeName;
use topo_core::model::{ElementIndex, SvgDocument, SvgElement, attr};
use topo_core::transform::ViewTransform;

use crate::hit::element_at_point;

/// Reads a raw name candidate off one element.
type Probe = fn(&SvgDocument, ElementIndex) -> Option<String>;

// ─── Probes ──────────────────────────────────────────────────────────────

fn identity_attr(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    doc.element(idx).attr(attr::NODE_ID).map(str::to_string)
}

fn label_attr(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    doc.element(idx).attr(attr::ARIA_LABEL).map(str::to_string)
}

fn text_element(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    doc.element(idx)
        .is_text()
        .then(|| doc.text_content(idx))
}

fn title_element(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    doc.element(idx)
        .is_title()
        .then(|| doc.text_content(idx))
}

/// Per-element probes applied along a hit path.
const PATH_PROBES: [Probe; 4] = [identity_attr, label_attr, text_element, title_element];

fn closest_identity(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let found = doc.closest(idx, |el| el.has_attr(attr::NODE_ID))?;
    identity_attr(doc, found)
}

fn closest_label(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let found = doc.closest(idx, |el| el.has_attr(attr::ARIA_LABEL))?;
    label_attr(doc, found)
}

fn closest_text(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let found = doc.closest(idx, SvgElement::is_text)?;
    Some(doc.text_content(found))
}

fn group_title(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let group = doc.closest(idx, SvgElement::is_group)?;
    let title = doc.query(group, SvgElement::is_title)?;
    Some(doc.text_content(title))
}

fn group_text(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let group = doc.closest(idx, SvgElement::is_group)?;
    let text = doc.query(group, SvgElement::is_text)?;
    Some(doc.text_content(text))
}

fn closest_id(doc: &SvgDocument, idx: ElementIndex) -> Option<String> {
    let found = doc.closest(idx, |el| el.has_attr(attr::ID))?;
    doc.element(found).attr(attr::ID).map(str::to_string)
}

/// Single-element fallback chain.
const INFER_CHAIN: [Probe; 6] = [
    closest_identity,
    closest_label,
    closest_text,
    group_title,
    group_text,
    closest_id,
];

/// First probe yielding a non-empty trimmed name.
fn first_name(doc: &SvgDocument, idx: ElementIndex, probes: &[Probe]) -> Option<NodeName> {
    probes
        .iter()
        .find_map(|probe| probe(doc, idx).and_then(|raw| NodeName::from_trimmed(&raw)))
}

// ─── Resolution ──────────────────────────────────────────────────────────

/// Resolve the node an interaction refers to.
///
/// Walks `path` (innermost → outermost) applying the per-element probes.
/// If nothing on the path names a node, re-resolves from the element
/// geometrically under `position` via [`infer_node_name`].
pub fn resolve_node_name(
    doc: &SvgDocument,
    path: &[ElementIndex],
    position: Point,
    view: &ViewTransform,
) -> Option<NodeName> {
    let on_path = path
        .iter()
        .filter(|&&idx| doc.contains(idx))
        .find_map(|&idx| first_name(doc, idx, &PATH_PROBES));
    if on_path.is_some() {
        return on_path;
    }
    let under = element_at_point(doc, position, view)?;
    log::trace!("node resolution fell back to element under pointer");
    infer_node_name(doc, under)
}

/// Infer the node a single element belongs to.
pub fn infer_node_name(doc: &SvgDocument, element: ElementIndex) -> Option<NodeName> {
    if !doc.contains(element) {
        return None;
    }
    first_name(doc, element, &INFER_CHAIN)
}

// ─── Inverse lookup ──────────────────────────────────────────────────────

/// Does an element represent `name` under one matching rule?
type Matcher = fn(&SvgDocument, ElementIndex, &str) -> bool;

fn matches_identity(doc: &SvgDocument, idx: ElementIndex, name: &str) -> bool {
    doc.element(idx)
        .attr(attr::NODE_ID)
        .is_some_and(|v| v.trim() == name)
}

fn matches_label(doc: &SvgDocument, idx: ElementIndex, name: &str) -> bool {
    doc.element(idx)
        .attr(attr::ARIA_LABEL)
        .is_some_and(|v| v.trim() == name)
}

fn matches_text(doc: &SvgDocument, idx: ElementIndex, name: &str) -> bool {
    doc.element(idx).is_text() && doc.text_content(idx).trim() == name
}

fn matches_title(doc: &SvgDocument, idx: ElementIndex, name: &str) -> bool {
    doc.element(idx).is_title() && doc.text_content(idx).trim() == name
}

const FIND_CHAIN: [Matcher; 4] = [matches_identity, matches_label, matches_text, matches_title];

/// Nearest enclosing group, or the element itself.
fn representative(doc: &SvgDocument, idx: ElementIndex) -> ElementIndex {
    doc.closest(idx, SvgElement::is_group).unwrap_or(idx)
}

fn find_with(doc: &SvgDocument, name: &str, chain: &[Matcher]) -> Option<ElementIndex> {
    let elements = doc.query_all(|_| true);
    chain.iter().find_map(|matcher| {
        elements
            .iter()
            .copied()
            .find(|&idx| matcher(doc, idx, name))
            .map(|idx| representative(doc, idx))
    })
}

/// Find the element representing `name`, preferring its enclosing group.
pub fn find_node_element(doc: &SvgDocument, name: &str) -> Option<ElementIndex> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    find_with(doc, name, &FIND_CHAIN)
}

/// Stamp the identity attribute onto every named node that lacks one.
///
/// Names that some element already carries as identity are skipped, and an
/// identity already present on the chosen target is never overwritten.
/// Returns how many elements were stamped.
pub fn annotate_node_ids<'a>(
    doc: &mut SvgDocument,
    names: impl IntoIterator<Item = &'a str>,
) -> usize {
    let elements = doc.query_all(|_| true);
    let mut stamped: HashSet<String> = elements
        .iter()
        .filter_map(|&idx| doc.element(idx).attr(attr::NODE_ID))
        .map(|v| v.trim().to_string())
        .collect();

    // First element in document order per candidate value, one index per rule
    let mut by_label: HashMap<String, ElementIndex> = HashMap::new();
    let mut by_text: HashMap<String, ElementIndex> = HashMap::new();
    let mut by_title: HashMap<String, ElementIndex> = HashMap::new();
    for &idx in &elements {
        let el = doc.element(idx);
        if let Some(label) = el.attr(attr::ARIA_LABEL) {
            by_label.entry(label.trim().to_string()).or_insert(idx);
        }
        if el.is_text() {
            by_text
                .entry(doc.text_content(idx).trim().to_string())
                .or_insert(idx);
        } else if el.is_title() {
            by_title
                .entry(doc.text_content(idx).trim().to_string())
                .or_insert(idx);
        }
    }

    let mut count = 0;
    for raw in names {
        let name = raw.trim();
        if name.is_empty() || stamped.contains(name) {
            continue;
        }
        let Some(found) = [&by_label, &by_text, &by_title]
            .iter()
            .find_map(|index| index.get(name).copied())
        else {
            continue;
        };
        let target = representative(doc, found);
        let element = doc.element_mut(target);
        if element.has_attr(attr::NODE_ID) {
            continue;
        }
        element.set_attr(attr::NODE_ID, name);
        stamped.insert(name.to_string());
        count += 1;
    }
    log::trace!("stamped {count} node identities");
    count
}

// ─── Selection marking ───────────────────────────────────────────────────

/// Remove every selection marker (group attribute and leaf class).
pub fn clear_node_selection(doc: &mut SvgDocument) {
    let marked =
        doc.query_all(|el| el.has_attr(attr::SELECTED) || el.has_class(attr::SELECTED_CLASS));
    for idx in marked {
        let el = doc.element_mut(idx);
        el.remove_attr(attr::SELECTED);
        el.remove_class(attr::SELECTED_CLASS);
    }
}

/// Mark one element selected: groups get the attribute, leaves the class.
pub fn mark_node_selected(doc: &mut SvgDocument, idx: ElementIndex) {
    if !doc.contains(idx) {
        return;
    }
    let el = doc.element_mut(idx);
    if el.is_group() {
        el.set_attr(attr::SELECTED, "true");
    } else {
        el.add_class(attr::SELECTED_CLASS);
    }
}

/// Move the selection marker to `name`'s element (or just clear it).
/// Returns the newly marked element.
pub fn highlight_selected_node(doc: &mut SvgDocument, name: Option<&str>) -> Option<ElementIndex> {
    clear_node_selection(doc);
    let idx = find_node_element(doc, name?)?;
    mark_node_selected(doc, idx);
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use topo_core::parse_svg;

    const MIXED: &str = r#"<svg>
        <g id="n1" data-node-id="router-01" aria-label="Edge Router"><rect id="r1" x="0" y="30" width="40" height="40"/><text id="t1" x="0" y="20">Router</text></g>
        <g id="n2" aria-label="Core Switch"><rect id="r2" x="100" y="0" width="40" height="40"/></g>
        <g id="n3"><title>Printer</title><circle id="c3" cx="200" cy="20" r="10"/></g>
        <g id="n4"><text id="t4" x="300" y="20">  AP Lobby  </text></g>
        <rect id="lone" x="0" y="100" width="10" height="10"/>
    </svg>"#;

    fn by_id(doc: &SvgDocument, id: &str) -> ElementIndex {
        doc.query_all(|el| el.attr("id") == Some(id))[0]
    }

    fn name(n: Option<NodeName>) -> Option<String> {
        n.map(|n| n.as_str().to_string())
    }

    #[test]
    fn identity_beats_label_and_text_on_path() {
        let doc = parse_svg(MIXED).unwrap();
        let path = doc.composed_path(by_id(&doc, "r1"));
        let got = resolve_node_name(&doc, &path, Point::ZERO, &ViewTransform::IDENTITY);
        assert_eq!(name(got), Some("router-01".into()));
        assert_eq!(name(infer_node_name(&doc, by_id(&doc, "r1"))), Some("router-01".into()));
    }

    #[test]
    fn path_probes_fall_through_label_then_title() {
        let doc = parse_svg(MIXED).unwrap();
        let view = ViewTransform::IDENTITY;
        let switch = doc.composed_path(by_id(&doc, "r2"));
        assert_eq!(
            name(resolve_node_name(&doc, &switch, Point::ZERO, &view)),
            Some("Core Switch".into())
        );
        // The circle itself has no name; the group has none either, so the
        // title is only found through the geometric fallback.
        let printer = doc.composed_path(by_id(&doc, "c3"));
        assert_eq!(
            name(resolve_node_name(&doc, &printer, Point::new(200.0, 20.0), &view)),
            Some("Printer".into())
        );
    }

    #[test]
    fn empty_path_uses_element_under_pointer() {
        let doc = parse_svg(MIXED).unwrap();
        let got = resolve_node_name(&doc, &[], Point::new(120.0, 20.0), &ViewTransform::IDENTITY);
        assert_eq!(name(got), Some("Core Switch".into()));
        let miss = resolve_node_name(&doc, &[], Point::new(380.0, 280.0), &ViewTransform::IDENTITY);
        assert_eq!(miss, None);
    }

    #[test]
    fn infer_chain_order() {
        let doc = parse_svg(MIXED).unwrap();
        assert_eq!(name(infer_node_name(&doc, by_id(&doc, "t1"))), Some("router-01".into()));
        assert_eq!(name(infer_node_name(&doc, by_id(&doc, "c3"))), Some("Printer".into()));
        assert_eq!(name(infer_node_name(&doc, by_id(&doc, "t4"))), Some("AP Lobby".into()));
        // Generic id is the last resort
        assert_eq!(name(infer_node_name(&doc, by_id(&doc, "lone"))), Some("lone".into()));
    }

    #[test]
    fn whitespace_only_candidates_are_unresolved() {
        let doc = parse_svg(r#"<svg><g><text>   </text></g></svg>"#).unwrap();
        let text = doc.query_all(SvgElement::is_text)[0];
        assert_eq!(infer_node_name(&doc, text), None);
    }

    #[test]
    fn find_prefers_identity_and_enclosing_group() {
        let doc = parse_svg(MIXED).unwrap();
        assert_eq!(find_node_element(&doc, "router-01"), Some(by_id(&doc, "n1")));
        assert_eq!(find_node_element(&doc, "Printer"), Some(by_id(&doc, "n3")));
        assert_eq!(find_node_element(&doc, " AP Lobby"), Some(by_id(&doc, "n4")));
        // The label "Edge Router" belongs to n1 as well
        assert_eq!(find_node_element(&doc, "Edge Router"), Some(by_id(&doc, "n1")));
        assert_eq!(find_node_element(&doc, "Router"), Some(by_id(&doc, "n1")));
        assert_eq!(find_node_element(&doc, "nope"), None);
        assert_eq!(find_node_element(&doc, "  "), None);
    }

    #[test]
    fn find_prefers_later_identity_over_earlier_label_and_text() {
        let doc = parse_svg(
            r#"<svg>
                <g id="decoy" aria-label="Uplink"><text x="0" y="10">Uplink</text></g>
                <g id="real" data-node-id="Uplink"><rect x="50" y="0" width="10" height="10"/></g>
            </svg>"#,
        )
        .unwrap();
        assert_eq!(find_node_element(&doc, "Uplink"), Some(by_id(&doc, "real")));
    }

    #[test]
    fn annotate_is_idempotent_and_keeps_curated_ids() {
        let mut doc = parse_svg(MIXED).unwrap();
        let names = ["Core Switch", "Printer", "AP Lobby", "Edge Router", "Ghost"];
        let first = annotate_node_ids(&mut doc, names);
        // Edge Router's group already carries a curated identity
        assert_eq!(first, 3);
        assert_eq!(doc.element(by_id(&doc, "n1")).attr(attr::NODE_ID), Some("router-01"));
        assert_eq!(doc.element(by_id(&doc, "n3")).attr(attr::NODE_ID), Some("Printer"));

        let snapshot = topo_core::emit_svg(&doc);
        assert_eq!(annotate_node_ids(&mut doc, names), 0);
        assert_eq!(topo_core::emit_svg(&doc), snapshot);
    }

    #[test]
    fn selection_marks_groups_by_attribute_and_leaves_by_class() {
        let mut doc = parse_svg(MIXED).unwrap();
        let group = highlight_selected_node(&mut doc, Some("Printer")).unwrap();
        assert_eq!(doc.element(group).attr(attr::SELECTED), Some("true"));

        let lone = by_id(&doc, "lone");
        mark_node_selected(&mut doc, lone);
        assert!(doc.element(lone).has_class(attr::SELECTED_CLASS));

        assert_eq!(highlight_selected_node(&mut doc, Some("Core Switch")), Some(by_id(&doc, "n2")));
        assert!(!doc.element(group).has_attr(attr::SELECTED));
        assert!(!doc.element(lone).has_class(attr::SELECTED_CLASS));

        assert_eq!(highlight_selected_node(&mut doc, None), None);
        assert!(doc.query_all(|el| el.has_attr(attr::SELECTED)).is_empty());
    }
}
