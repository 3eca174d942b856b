//! Writing the view transform into the drawing's inline style.

use topo_core::ViewTransform;
use topo_core::model::{SvgDocument, attr};

/// Style properties owned by the viewport.
const OWNED: [&str; 3] = ["transform-origin", "transform", "cursor"];

/// Inline declarations for a transform and pan state.
pub fn viewport_declarations(transform: &ViewTransform, panning: bool) -> [(&'static str, String); 3] {
    [
        ("transform-origin", "0 0".to_string()),
        ("transform", transform.css_transform()),
        ("cursor", if panning { "grabbing" } else { "grab" }.to_string()),
    ]
}

/// Replace the viewport-owned properties of an inline `style` value,
/// keeping every other declaration in order.
pub fn merge_style(existing: &str, updates: &[(&str, String)]) -> String {
    let kept = existing.split(';').filter_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        let key = key.trim();
        (!key.is_empty() && !OWNED.contains(&key)).then(|| format!("{key}: {}", value.trim()))
    });
    let owned = updates.iter().map(|(key, value)| format!("{key}: {value}"));
    kept.chain(owned).collect::<Vec<_>>().join("; ")
}

/// Paint the transform onto the outer `<svg>` element.
/// Returns the new style value, or `None` for an empty document.
pub fn paint_transform(doc: &mut SvgDocument, transform: &ViewTransform, panning: bool) -> Option<String> {
    let svg = doc.document_element()?;
    let el = doc.element_mut(svg);
    let style = merge_style(
        el.attr(attr::STYLE).unwrap_or(""),
        &viewport_declarations(transform, panning),
    );
    el.set_attr(attr::STYLE, &style);
    Some(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use topo_core::parse_svg;

    #[test]
    fn merge_keeps_unrelated_declarations() {
        let merged = merge_style(
            "max-width: 100%; cursor: pointer; transform: none;",
            &viewport_declarations(&ViewTransform::new(10.0, -5.0, 1.5), true),
        );
        assert_eq!(
            merged,
            "max-width: 100%; transform-origin: 0 0; transform: translate(10px, -5px) scale(1.5); cursor: grabbing"
        );
    }

    #[test]
    fn paint_is_stable_across_repaints() {
        let mut doc = parse_svg(r#"<svg style="display: block"><g/></svg>"#).unwrap();
        let t = ViewTransform::IDENTITY;
        let first = paint_transform(&mut doc, &t, false).unwrap();
        let second = paint_transform(&mut doc, &t, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "display: block; transform-origin: 0 0; transform: translate(0px, 0px) scale(1); cursor: grab"
        );
    }

    #[test]
    fn empty_document_has_nothing_to_paint() {
        let mut doc = SvgDocument::new();
        assert_eq!(paint_transform(&mut doc, &ViewTransform::IDENTITY, false), None);
    }
}
