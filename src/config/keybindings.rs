//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Lookup ignores the event kind and state, so a press reported with extra flags (e.g.
/// by a terminal with the kitty keyboard protocol) still matches.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(normalize(key), action);
    }
}

fn normalize(key: KeyEvent) -> KeyEvent {
    KeyEvent {
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
        ..key
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        bindings.bind(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.bind(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            KeyAction::Redraw,
        );

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_quits() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(bindings.get(key), Some(KeyAction::Quit));
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.get(key), Some(KeyAction::Quit));
    }

    #[test]
    fn ctrl_l_redraws() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(bindings.get(key), Some(KeyAction::Redraw));
    }

    #[test]
    fn plain_letters_are_unbound() {
        let bindings = KeyBindings::default();
        for c in ['q', 'c', 'l', 'j', 'k'] {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(bindings.get(key), None, "'{c}' should not be bound");
        }
    }

    #[test]
    fn end_key_is_unbound() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(KeyEvent::new(KeyCode::End, KeyModifiers::NONE)), None);
    }

    #[test]
    fn lookup_ignores_event_state() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::CAPS_LOCK,
        );
        assert_eq!(bindings.get(key), Some(KeyAction::Quit));
    }

    #[test]
    fn bind_replaces_existing_binding() {
        let mut bindings = KeyBindings::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        bindings.bind(esc, KeyAction::Redraw);
        assert_eq!(bindings.get(esc), Some(KeyAction::Redraw));
    }
}
