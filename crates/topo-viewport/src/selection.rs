//! Selection and hover state.

use serde::Serialize;
use topo_core::{EdgeKey, NodeName};

/// Which node is selected and what the pointer is hovering.
///
/// Mutated by the gesture engine, read by rendering. Setters report
/// whether the value changed so hover callbacks fire once per change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected: Option<NodeName>,
    pub hovered_node: Option<NodeName>,
    pub hovered_edge: Option<EdgeKey>,
}

impl SelectionState {
    pub fn select(&mut self, name: NodeName) -> bool {
        self.selected.replace(name) != Some(name)
    }

    /// Drop the selection, returning what was selected.
    pub fn clear_selection(&mut self) -> Option<NodeName> {
        self.selected.take()
    }

    pub fn set_hovered_node(&mut self, name: Option<NodeName>) -> bool {
        if self.hovered_node == name {
            return false;
        }
        self.hovered_node = name;
        true
    }

    pub fn set_hovered_edge(&mut self, key: Option<EdgeKey>) -> bool {
        if self.hovered_edge == key {
            return false;
        }
        self.hovered_edge = key;
        true
    }

    pub fn clear_hover(&mut self) {
        self.hovered_node = None;
        self.hovered_edge = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_report_changes() {
        let mut state = SelectionState::default();
        let gw = NodeName::intern("Gateway");
        assert!(state.select(gw));
        assert!(!state.select(gw));
        assert!(state.set_hovered_node(Some(gw)));
        assert!(!state.set_hovered_node(Some(gw)));
        assert!(state.set_hovered_edge(Some(EdgeKey::new("a", "b"))));
        assert!(!state.set_hovered_edge(Some(EdgeKey::new("b", "a"))));

        state.clear_hover();
        assert_eq!(state.hovered_node, None);
        assert_eq!(state.clear_selection(), Some(gw));
        assert_eq!(state.selected, None);
    }
}
