//! Key intents independent of physical keys.

/// What a key press asks a behavior to do.
///
/// The mapping from `crossterm::event::KeyCode` to `KeyIntent` is handled by
/// [`KeyBindings`](crate::config::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// Activate the focused control. Default: Enter/Space
    Activate,
    /// Dismiss the open disclosure. Default: Esc
    Dismiss,
    /// Move to the previous item. Default: ←
    Previous,
    /// Move to the next item. Default: →
    Next,
}
