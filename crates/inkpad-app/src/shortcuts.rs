//! Keyboard shortcut registry and documentation.

use inkpad_core::input::KeyPress;
use inkpad_core::tools::ToolKind;

/// What a shortcut does when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    SetTool(ToolKind),
    DeleteSelected,
    Undo,
    Redo,
    ToggleGrid,
    ToggleSnap,
    Deselect,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: ShortcutCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: ShortcutCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
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

    /// Check whether a key press triggers this shortcut.
    /// Letter keys match case-insensitively; Cmd counts as Ctrl.
    pub fn matches(&self, press: &KeyPress) -> bool {
        self.key.eq_ignore_ascii_case(&press.key)
            && self.ctrl == press.modifiers.command()
            && self.shift == press.modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutCommand::*;
        vec![
            Shortcut::new("V", false, false, SetTool(ToolKind::Select), "Select tool"),
            Shortcut::new("R", false, false, SetTool(ToolKind::Rectangle), "Rectangle tool"),
            Shortcut::new("E", false, false, SetTool(ToolKind::Ellipse), "Circle tool"),
            Shortcut::new("T", false, false, SetTool(ToolKind::Text), "Text tool"),
            Shortcut::new("H", false, false, SetTool(ToolKind::Pan), "Hand tool"),
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("G", false, false, ToggleGrid, "Toggle grid"),
            Shortcut::new("S", false, false, ToggleSnap, "Toggle snap to grid"),
            Shortcut::new("Delete", false, false, DeleteSelected, "Delete selected shape"),
            Shortcut::new("Backspace", false, false, DeleteSelected, "Delete selected shape"),
            Shortcut::new("Escape", false, false, Deselect, "Clear selection"),
        ]
    }

    /// Find the command bound to a key press.
    pub fn lookup(press: &KeyPress) -> Option<ShortcutCommand> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(press))
            .map(|shortcut| shortcut.command)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
