//! Keyboard bindings configuration.

use crate::model::key_action::KeyIntent;
use crossterm::event::KeyCode;
use std::collections::HashMap;

/// Maps key codes to behavior intents.
///
/// The defaults follow the WAI-ARIA authoring practices for disclosure and
/// carousel widgets.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, KeyIntent>,
}

impl KeyBindings {
    /// Look up the intent for a key.
    pub fn get(&self, code: KeyCode) -> Option<KeyIntent> {
        self.bindings.get(&code).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Disclosure activation
        bindings.insert(KeyCode::Enter, KeyIntent::Activate);
        bindings.insert(KeyCode::Char(' '), KeyIntent::Activate);
        bindings.insert(KeyCode::Esc, KeyIntent::Dismiss);

        // Carousel navigation
        bindings.insert(KeyCode::Left, KeyIntent::Previous);
        bindings.insert(KeyCode::Right, KeyIntent::Next);

        Self { bindings }
    }
}

/// Translate a DOM `KeyboardEvent.key` value into a key code.
///
/// Single characters map to [`KeyCode::Char`]; named keys cover what the
/// behaviors and the focus-visible detector can observe.
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Enter" => KeyCode::Enter,
        "Escape" | "Esc" => KeyCode::Esc,
        "ArrowLeft" => KeyCode::Left,
        "ArrowRight" => KeyCode::Right,
        "ArrowUp" => KeyCode::Up,
        "ArrowDown" => KeyCode::Down,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "Space" | "Spacebar" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_activate() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(KeyCode::Enter), Some(KeyIntent::Activate));
        assert_eq!(keys.get(KeyCode::Char(' ')), Some(KeyIntent::Activate));
    }

    #[test]
    fn escape_dismisses() {
        assert_eq!(
            KeyBindings::default().get(KeyCode::Esc),
            Some(KeyIntent::Dismiss)
        );
    }

    #[test]
    fn arrows_navigate() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(KeyCode::Left), Some(KeyIntent::Previous));
        assert_eq!(keys.get(KeyCode::Right), Some(KeyIntent::Next));
        assert_eq!(keys.get(KeyCode::Up), None);
    }

    #[test]
    fn parses_dom_key_names() {
        assert_eq!(parse_key_name("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key_name(" "), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key_name("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key_name("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(parse_key_name("q"), Some(KeyCode::Char('q')));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(parse_key_name("F13"), None);
        assert_eq!(parse_key_name(""), None);
    }
}
