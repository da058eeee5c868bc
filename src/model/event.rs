//! Input events delivered to a page.

use super::node::NodeId;
use crossterm::event::KeyCode;
use serde::Deserialize;

/// Metadata of a file offered by a picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMeta {
    /// File name.
    pub name: String,
    /// MIME type reported by the host.
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
}

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Primary pointer activation.
    Click,
    /// Pointer button pressed.
    MouseDown,
    /// Key pressed while `target` has focus.
    KeyDown(KeyCode),
    /// Pointer entered `target` at client coordinates.
    PointerOver {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer moved over `target`.
    PointerMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer left `target` for `related`.
    PointerOut {
        /// Element the pointer moved into, if any.
        related: Option<NodeId>,
    },
    /// The page scrolled.
    Scroll,
    /// `target` received focus.
    FocusIn,
    /// `target` lost focus.
    FocusOut,
    /// Constraint validation failed for `target`.
    Invalid {
        /// Host-provided validation message.
        message: String,
    },
    /// The value of `target` changed.
    Input {
        /// Whether the control satisfies its constraints now.
        valid: bool,
    },
    /// Something is dragged over `target`.
    DragOver,
    /// A drag left `target`.
    DragLeave,
    /// Files were dropped on `target`.
    Drop {
        /// Dropped files.
        files: Vec<FileMeta>,
    },
    /// A file input's selection changed.
    Change {
        /// Selected files.
        files: Vec<FileMeta>,
    },
    /// A form is being submitted.
    Submit {
        /// Whether the form passes constraint validation.
        valid: bool,
    },
}

/// An event aimed at an element.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    /// Innermost element the event is dispatched to.
    pub target: NodeId,
    /// Event payload.
    pub kind: EventKind,
}

impl UiEvent {
    /// Create an event.
    pub fn new(target: NodeId, kind: EventKind) -> Self {
        Self { target, kind }
    }

    /// Click on `target`.
    pub fn click(target: NodeId) -> Self {
        Self::new(target, EventKind::Click)
    }

    /// Key press on `target`.
    pub fn key(target: NodeId, code: KeyCode) -> Self {
        Self::new(target, EventKind::KeyDown(code))
    }

    /// Pointer entering `target`.
    pub fn pointer_over(target: NodeId, x: f64, y: f64) -> Self {
        Self::new(target, EventKind::PointerOver { x, y })
    }

    /// Pointer moving over `target`.
    pub fn pointer_move(target: NodeId, x: f64, y: f64) -> Self {
        Self::new(target, EventKind::PointerMove { x, y })
    }

    /// Pointer leaving `target` for `related`.
    pub fn pointer_out(target: NodeId, related: Option<NodeId>) -> Self {
        Self::new(target, EventKind::PointerOut { related })
    }
}

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// A handler suppressed the host's default action.
    pub default_prevented: bool,
    /// A handler stopped the event from reaching document-level handlers.
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    /// Suppress the default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation to document-level handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Side effect only the embedding host can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    /// Show a blocking message.
    Alert(String),
    /// Open the file picker of this input.
    OpenFilePicker(NodeId),
}
