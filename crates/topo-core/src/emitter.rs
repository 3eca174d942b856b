//! Emitter: `SvgDocument` → SVG markup.
//!
//! Produces the markup the card mounts after annotation passes have
//! stamped identity attributes and inserted hitbox paths. Attribute order
//! and element/tail text are preserved; comments and the XML prolog are
//! not (the parser drops them).

use crate::model::{ElementIndex, SvgDocument};

/// Serialize every top-level element of the document.
#[must_use]
pub fn emit_svg(doc: &SvgDocument) -> String {
    let mut out = String::with_capacity(doc.len() * 64);
    for &child in doc.children(doc.root) {
        emit_element(&mut out, doc, child);
    }
    out
}

fn emit_element(out: &mut String, doc: &SvgDocument, idx: ElementIndex) {
    let el = doc.element(idx);
    out.push('<');
    out.push_str(&el.tag);
    for a in &el.attributes {
        out.push(' ');
        out.push_str(&a.name);
        out.push_str("=\"");
        escape_into(out, &a.value, true);
        out.push('"');
    }

    let children = doc.children(idx);
    if el.text.is_empty() && children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    escape_into(out, &el.text, false);
    for &child in children {
        emit_element(out, doc, child);
        escape_into(out, &doc.element(child).tail, false);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Escape character data; attribute values additionally escape `"`.
pub fn escape_into(out: &mut String, raw: &str, attribute: bool) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Escape a string for use as HTML/XML text content.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    escape_into(&mut out, raw, true);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SvgElement;
    use crate::parser::parse_svg;
    use pretty_assertions::assert_eq;

    #[test]
    fn emit_self_closes_empty_elements() {
        let mut doc = SvgDocument::new();
        let svg = doc.append_child(doc.root, SvgElement::new("svg"));
        doc.append_child(svg, SvgElement::new("path").with_attr("d", "M0 0 L10 10"));
        assert_eq!(emit_svg(&doc), r#"<svg><path d="M0 0 L10 10"/></svg>"#);
    }

    #[test]
    fn emit_escapes_text_and_attributes() {
        let mut doc = SvgDocument::new();
        let svg = doc.append_child(doc.root, SvgElement::new("svg"));
        doc.append_child(
            svg,
            SvgElement::new("text")
                .with_attr("aria-label", "say \"hi\" & <bye>")
                .with_text("a < b"),
        );
        assert_eq!(
            emit_svg(&doc),
            r#"<svg><text aria-label="say &quot;hi&quot; &amp; &lt;bye&gt;">a &lt; b</text></svg>"#
        );
    }

    #[test]
    fn parse_then_emit_is_stable() {
        let input = r#"<svg viewBox="0 0 10 10"><g class="node"><title>AP</title><text x="1">eth<tspan>0</tspan> up</text></g></svg>"#;
        let first = emit_svg(&parse_svg(input).unwrap());
        assert_eq!(first, input);
        let second = emit_svg(&parse_svg(&first).unwrap());
        assert_eq!(first, second);
    }
}
