//! Integration tests: SVG markup → SvgDocument → markup.
//!
//! Exercises the parser and emitter on a realistic renderer output.

use pretty_assertions::assert_eq;
use topo_core::model::attr;
use topo_core::{emit_svg, parse_svg};

const NETWORK: &str = include_str!("fixtures/network.svg");

#[test]
fn fixture_parses_into_expected_tree() {
    let doc = parse_svg(NETWORK).expect("fixture should parse");
    let svg = doc.document_element().expect("no <svg> element");
    assert_eq!(doc.element(svg).attr("viewBox"), Some("0 0 400 300"));

    let groups = doc.query_all(|el| el.has_class("node"));
    assert_eq!(groups.len(), 4);

    let paths = doc.query_all(|el| el.has_attr(attr::EDGE_LEFT) && el.has_attr(attr::EDGE_RIGHT));
    assert_eq!(paths.len(), 4);
}

#[test]
fn numeric_references_decode_in_labels() {
    let doc = parse_svg(NETWORK).unwrap();
    let switch = doc
        .query_all(|el| el.attr(attr::ARIA_LABEL) == Some("Core Switch"))
        .into_iter()
        .next()
        .expect("switch group missing");
    assert!(doc.text_content(switch).contains("USW-24"));
}

#[test]
fn emit_is_idempotent_after_first_pass() {
    let doc = parse_svg(NETWORK).unwrap();
    let first = emit_svg(&doc);
    assert!(first.starts_with("<svg "), "prolog and comments are dropped");
    let second = emit_svg(&parse_svg(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn edge_attributes_keep_raw_whitespace() {
    let doc = parse_svg(NETWORK).unwrap();
    let phone_edge = doc
        .query_all(|el| el.attr(attr::EDGE_LEFT) == Some(" Phone"))
        .len();
    assert_eq!(phone_edge, 1, "attribute values are not trimmed by the parser");
}
