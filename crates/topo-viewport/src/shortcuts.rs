//! Keyboard shortcut mapping.
//!
//! Maps `KeyboardEvent.key` values to viewport actions. Combos with the
//! command modifier (ctrl, or ⌘ on macOS) are left to the browser so page
//! zoom and copy keep working.

use serde::Serialize;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    ZoomIn,
    ZoomOut,
    ResetView,
    ClearSelection,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action, or `None` if unbound.
    pub fn resolve(key: &str, ctrl: bool, meta: bool) -> Option<ShortcutAction> {
        if ctrl || meta {
            return None;
        }
        match key {
            "+" | "=" => Some(ShortcutAction::ZoomIn),
            "-" | "_" => Some(ShortcutAction::ZoomOut),
            "0" => Some(ShortcutAction::ResetView),
            "Escape" => Some(ShortcutAction::ClearSelection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_view_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("+", false, false),
            Some(ShortcutAction::ZoomIn)
        );
        assert_eq!(
            ShortcutMap::resolve("=", false, false),
            Some(ShortcutAction::ZoomIn)
        );
        assert_eq!(
            ShortcutMap::resolve("-", false, false),
            Some(ShortcutAction::ZoomOut)
        );
        assert_eq!(
            ShortcutMap::resolve("0", false, false),
            Some(ShortcutAction::ResetView)
        );
        assert_eq!(
            ShortcutMap::resolve("Escape", false, false),
            Some(ShortcutAction::ClearSelection)
        );
    }

    #[test]
    fn command_combos_pass_through() {
        // Ctrl/⌘ + "=" is browser page zoom
        assert_eq!(ShortcutMap::resolve("=", true, false), None);
        assert_eq!(ShortcutMap::resolve("0", false, true), None);
    }

    #[test]
    fn unbound_keys() {
        assert_eq!(ShortcutMap::resolve("a", false, false), None);
        assert_eq!(ShortcutMap::resolve("Tab", false, false), None);
    }
}
