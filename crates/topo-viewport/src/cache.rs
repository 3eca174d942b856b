//! Annotation cache: skip the annotation pass when nothing changed.
//!
//! The key is three independent fingerprints (markup, node set, edge set),
//! so a change in any one dimension invalidates even if another collides.
//! The hash is a change detector only; a collision costs a stale drawing,
//! never wrong data.

use serde::{Deserialize, Serialize};
use topo_core::Edge;

/// 31-multiplier rolling hash over UTF-16 code units with 32-bit signed
/// wrap-around (`h = h * 31 + unit`), the same value the card's script
/// computes for a JavaScript string.
pub fn rolling_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Fingerprint of the inputs that drove an annotation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationCacheKey {
    pub svg_hash: i32,
    pub node_types_hash: i32,
    pub edges_hash: i32,
}

impl AnnotationCacheKey {
    /// Build a key from raw markup, node names and edges. Node and edge
    /// order does not matter.
    pub fn build<'a>(
        svg_content: &str,
        node_names: impl IntoIterator<Item = &'a str>,
        edges: &[Edge],
    ) -> Self {
        let mut names: Vec<&str> = node_names.into_iter().collect();
        names.sort_unstable();
        let mut pairs: Vec<String> = edges
            .iter()
            .map(|e| format!("{}-{}", e.left, e.right))
            .collect();
        pairs.sort_unstable();
        Self {
            svg_hash: rolling_hash(svg_content),
            node_types_hash: rolling_hash(&names.join(",")),
            edges_hash: rolling_hash(&pairs.join(",")),
        }
    }
}

/// Whether the current drawing has been annotated, and for which inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationCache {
    last_key: Option<AnnotationCacheKey>,
    is_annotated: bool,
}

impl AnnotationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only if annotated and `key` matches the stored key exactly.
    pub fn should_skip(&self, key: &AnnotationCacheKey) -> bool {
        self.is_annotated && self.last_key.as_ref() == Some(key)
    }

    /// Record a successful pass.
    pub fn mark_complete(&mut self, key: AnnotationCacheKey) {
        self.last_key = Some(key);
        self.is_annotated = true;
    }

    /// Forget everything; call whenever the drawing is reloaded.
    pub fn invalidate(&mut self) {
        self.last_key = None;
        self.is_annotated = false;
    }

    pub fn is_annotated(&self) -> bool {
        self.is_annotated
    }

    pub fn last_key(&self) -> Option<&AnnotationCacheKey> {
        self.last_key.as_ref()
    }
}
