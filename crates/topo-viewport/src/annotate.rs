//! The cache-gated annotation pass run after each (re)render.

use topo_core::{SvgDocument, TopologyPayload};
use topo_render::edge::{EdgeAnnotation, annotate_edges};
use topo_render::node::annotate_node_ids;

use crate::cache::{AnnotationCache, AnnotationCacheKey};

/// What [`run_annotation_pass`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationOutcome {
    /// Inputs unchanged since the last completed pass.
    Skipped,
    Annotated {
        nodes_stamped: usize,
        edges: EdgeAnnotation,
    },
}

/// Stamp node identities and annotate edges unless the cache says the
/// same markup and payload were already handled.
///
/// `svg_text` is the markup `doc` was parsed from; it is hashed as-is.
pub fn run_annotation_pass(
    doc: &mut SvgDocument,
    svg_text: &str,
    payload: &TopologyPayload,
    cache: &mut AnnotationCache,
) -> AnnotationOutcome {
    let key = AnnotationCacheKey::build(svg_text, payload.node_names(), &payload.edges);
    if cache.should_skip(&key) {
        log::debug!("annotation pass skipped: inputs unchanged");
        return AnnotationOutcome::Skipped;
    }

    let nodes_stamped = annotate_node_ids(doc, payload.node_names());
    let edges = annotate_edges(doc, &payload.edge_lookup());
    cache.mark_complete(key);
    log::debug!(
        "annotation pass: {nodes_stamped} node ids, {} edges confirmed, {} hitboxes added",
        edges.confirmed,
        edges.hitboxes_added
    );
    AnnotationOutcome::Annotated {
        nodes_stamped,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_core::{Edge, parse_svg};

    const SVG: &str = r#"<svg><g aria-label="A"><rect width="4" height="4"/></g><g aria-label="B"/><path d="M0 0 L1 1" data-edge-left="B" data-edge-right="A"/></svg>"#;

    fn payload() -> TopologyPayload {
        TopologyPayload {
            node_types: [("A".to_string(), "switch".to_string()), ("B".to_string(), "ap".to_string())]
                .into_iter()
                .collect(),
            edges: vec![Edge::new("A", "B")],
        }
    }

    #[test]
    fn second_run_with_same_inputs_is_skipped() {
        let mut doc = parse_svg(SVG).unwrap();
        let mut cache = AnnotationCache::new();
        let first = run_annotation_pass(&mut doc, SVG, &payload(), &mut cache);
        assert!(matches!(
            first,
            AnnotationOutcome::Annotated {
                nodes_stamped: 2,
                edges: EdgeAnnotation {
                    confirmed: 1,
                    hitboxes_added: 1,
                    ..
                }
            }
        ));
        assert_eq!(
            run_annotation_pass(&mut doc, SVG, &payload(), &mut cache),
            AnnotationOutcome::Skipped
        );
    }

    #[test]
    fn payload_change_reruns_without_duplicating() {
        let mut doc = parse_svg(SVG).unwrap();
        let mut cache = AnnotationCache::new();
        run_annotation_pass(&mut doc, SVG, &payload(), &mut cache);

        let mut grown = payload();
        grown.node_types.insert("C".into(), "client".into());
        let rerun = run_annotation_pass(&mut doc, SVG, &grown, &mut cache);
        assert_eq!(
            rerun,
            AnnotationOutcome::Annotated {
                nodes_stamped: 0,
                edges: EdgeAnnotation {
                    confirmed: 1,
                    hitboxes_added: 0,
                    unmatched: 0
                }
            }
        );
    }

    #[test]
    fn invalidated_cache_reruns() {
        let mut doc = parse_svg(SVG).unwrap();
        let mut cache = AnnotationCache::new();
        run_annotation_pass(&mut doc, SVG, &payload(), &mut cache);
        cache.invalidate();
        assert_ne!(
            run_annotation_pass(&mut doc, SVG, &payload(), &mut cache),
            AnnotationOutcome::Skipped
        );
    }
}
