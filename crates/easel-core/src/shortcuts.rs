//! Keyboard shortcut registry.

use crate::input::KeyEvent;
use crate::tools::Tool;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    Redo,
    DeleteSelected,
    CancelGesture,
    SelectTool(Tool),
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.key.eq_ignore_ascii_case(&event.key)
            && self.ctrl == event.modifiers.command()
            && self.shift == event.modifiers.shift
            && !event.modifiers.alt
    }
}

/// Registry of all keyboard shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self {
            shortcuts: Self::all(),
        }
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, Action::Undo, "Undo"),
            Shortcut::new("Z", true, true, Action::Redo, "Redo"),
            Shortcut::new("Y", true, false, Action::Redo, "Redo"),
            Shortcut::new("Delete", false, false, Action::DeleteSelected, "Delete selected shape"),
            Shortcut::new("Backspace", false, false, Action::DeleteSelected, "Delete selected shape"),
            Shortcut::new("Escape", false, false, Action::CancelGesture, "Cancel current action"),
            Shortcut::new("V", false, false, Action::SelectTool(Tool::Select), "Select tool"),
            Shortcut::new("B", false, false, Action::SelectTool(Tool::Brush), "Brush tool"),
            Shortcut::new("E", false, false, Action::SelectTool(Tool::Eraser), "Eraser tool"),
            Shortcut::new("L", false, false, Action::SelectTool(Tool::Line), "Line tool"),
            Shortcut::new("R", false, false, Action::SelectTool(Tool::Rectangle), "Rectangle tool"),
            Shortcut::new("C", false, false, Action::SelectTool(Tool::Circle), "Circle tool"),
            Shortcut::new("T", false, false, Action::SelectTool(Tool::Triangle), "Triangle tool"),
            Shortcut::new("X", false, false, Action::SelectTool(Tool::Text), "Text tool"),
            Shortcut::new("H", false, false, Action::SelectTool(Tool::Pan), "Pan tool"),
        ]
    }

    /// Find the action bound to a key press.
    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        self.shortcuts
            .iter()
            .find(|s| s.matches(event))
            .map(|s| s.action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.shortcuts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn test_lookup_undo_redo() {
        let registry = ShortcutRegistry::new();
        assert_eq!(registry.lookup(&KeyEvent::ctrl("z")), Some(Action::Undo));
        assert_eq!(registry.lookup(&KeyEvent::ctrl_shift("Z")), Some(Action::Redo));
        assert_eq!(registry.lookup(&KeyEvent::ctrl("y")), Some(Action::Redo));
        // Meta counts as the command modifier
        let cmd_z = KeyEvent::new(
            "z",
            Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        );
        assert_eq!(registry.lookup(&cmd_z), Some(Action::Undo));
    }

    #[test]
    fn test_lookup_plain_keys() {
        let registry = ShortcutRegistry::new();
        assert_eq!(registry.lookup(&KeyEvent::plain("Delete")), Some(Action::DeleteSelected));
        assert_eq!(registry.lookup(&KeyEvent::plain("r")), Some(Action::SelectTool(Tool::Rectangle)));
        assert_eq!(registry.lookup(&KeyEvent::plain("z")), None);
        assert_eq!(registry.lookup(&KeyEvent::ctrl("r")), None);
    }

    #[test]
    fn test_every_tool_has_a_hotkey() {
        let registry = ShortcutRegistry::new();
        for &tool in Tool::all() {
            assert!(
                registry.iter().any(|s| s.action == Action::SelectTool(tool)),
                "{tool:?} has no shortcut"
            );
        }
    }

    #[test]
    fn test_format() {
        let s = Shortcut::new("Z", true, true, Action::Redo, "Redo");
        assert_eq!(s.format(), "Ctrl+Shift+Z");
    }
}
