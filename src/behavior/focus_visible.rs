//! Keyboard focus indication.
//!
//! Focus rings are only wanted for keyboard users. A key press switches
//! the page into keyboard modality; a mouse press switches it back.

use crate::model::{Document, EventKind, NodeId, UiEvent};
use tracing::trace;

const MODALITY_CLASS: &str = "using-keyboard";
const FOCUS_CLASS: &str = "focus-visible";

/// Tracks input modality and marks keyboard-focused elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusVisibleDetector {
    had_keyboard_event: bool,
}

impl FocusVisibleDetector {
    /// Start in pointer modality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last input came from the keyboard.
    pub fn keyboard_modality(&self) -> bool {
        self.had_keyboard_event
    }

    /// Update modality from key and mouse presses anywhere on the page.
    pub fn handle_event(&mut self, doc: &mut Document, event: &UiEvent) {
        match event.kind {
            EventKind::KeyDown(_) => {
                self.had_keyboard_event = true;
                let body = doc.body();
                doc.add_class(body, MODALITY_CLASS);
            }
            EventKind::MouseDown if self.had_keyboard_event => {
                self.had_keyboard_event = false;
                let body = doc.body();
                doc.remove_class(body, MODALITY_CLASS);
                trace!("pointer modality");
            }
            _ => {}
        }
    }

    /// `node` received focus.
    pub fn on_focus_in(&self, doc: &mut Document, node: NodeId) {
        if self.had_keyboard_event {
            doc.add_class(node, FOCUS_CLASS);
        }
    }

    /// `node` lost focus.
    pub fn on_focus_out(&self, doc: &mut Document, node: NodeId) {
        doc.remove_class(node, FOCUS_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{EventKind, Markup, UiEvent};
    use crate::page::Page;
    use crate::test_harness::{by_id, page_with};
    use crossterm::event::KeyCode;

    fn form_page() -> Page {
        page_with(Markup::new("body").children([
            Markup::new("input").id("first"),
            Markup::new("input").id("second"),
        ]))
    }

    #[test]
    fn focus_after_keydown_is_marked() {
        let mut page = form_page();
        let first = by_id(page.document(), "first");
        let second = by_id(page.document(), "second");

        page.dispatch(UiEvent::key(first, KeyCode::Tab));
        assert!(page.document().has_class(page.document().body(), "using-keyboard"));

        assert!(page.focus(second));
        assert!(page.document().has_class(second, "focus-visible"));
    }

    #[test]
    fn focus_without_keyboard_is_not_marked() {
        let mut page = form_page();
        let first = by_id(page.document(), "first");
        assert!(page.focus(first));
        assert!(!page.document().has_class(first, "focus-visible"));
    }

    #[test]
    fn mousedown_clears_modality() {
        let mut page = form_page();
        let first = by_id(page.document(), "first");
        let second = by_id(page.document(), "second");

        page.dispatch(UiEvent::key(first, KeyCode::Tab));
        page.dispatch(UiEvent::new(first, EventKind::MouseDown));
        assert!(!page.document().has_class(page.document().body(), "using-keyboard"));

        page.focus(second);
        assert!(!page.document().has_class(second, "focus-visible"));
    }

    #[test]
    fn focus_out_removes_marker() {
        let mut page = form_page();
        let first = by_id(page.document(), "first");
        let second = by_id(page.document(), "second");

        page.dispatch(UiEvent::key(first, KeyCode::Tab));
        page.focus(first);
        assert!(page.document().has_class(first, "focus-visible"));

        page.focus(second);
        assert!(!page.document().has_class(first, "focus-visible"));
        assert!(page.document().has_class(second, "focus-visible"));
    }
}
