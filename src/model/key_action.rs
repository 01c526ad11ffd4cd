//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that keys can be bound to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Scrolling is not here: it is driven by the mouse wheel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Disconnect the feed and leave. Default: Esc/Ctrl+C
    Quit,
    /// Force a full repaint of the terminal. Default: Ctrl+L
    Redraw,
}

impl KeyAction {
    /// Human-readable name, used in log output.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Quit => "quit",
            KeyAction::Redraw => "redraw",
        }
    }
}
