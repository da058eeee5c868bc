//! Replay of scripted input events.

use super::SourceError;
use crate::config::parse_key_name;
use crate::model::{EventKind, FileMeta, NodeId, Selector, UiEvent};
use crate::page::Page;
use serde::Deserialize;
use tracing::debug;

fn default_valid() -> bool {
    true
}

/// One scripted input. Targets are addressed by selector text and resolved
/// against the page at replay time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptStep {
    /// Click on the first element matching `target`.
    Click {
        /// Target selector.
        target: String,
    },
    /// Mouse button press.
    MouseDown {
        /// Target selector.
        target: String,
    },
    /// Key press, by key name (`Enter`, `Escape`, `ArrowLeft`, `a`).
    Key {
        /// Target selector.
        target: String,
        /// Key name.
        key: String,
    },
    /// Pointer enters an element.
    PointerOver {
        /// Target selector.
        target: String,
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer moves over an element.
    PointerMove {
        /// Target selector.
        target: String,
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer leaves an element.
    PointerOut {
        /// Target selector.
        target: String,
        /// Element entered next, if any.
        #[serde(default)]
        related: Option<String>,
    },
    /// Page scroll.
    Scroll,
    /// Host moves focus to an element.
    Focus {
        /// Target selector.
        target: String,
    },
    /// Constraint validation failed.
    Invalid {
        /// Target selector.
        target: String,
        /// Validation message.
        message: String,
    },
    /// A control's value changed.
    Input {
        /// Target selector.
        target: String,
        /// Whether the control is valid now.
        #[serde(default = "default_valid")]
        valid: bool,
    },
    /// Drag over an element.
    DragOver {
        /// Target selector.
        target: String,
    },
    /// Drag leaves an element.
    DragLeave {
        /// Target selector.
        target: String,
    },
    /// Files dropped on an element.
    Drop {
        /// Target selector.
        target: String,
        /// Dropped files.
        files: Vec<FileMeta>,
    },
    /// A file input, radio or select changed.
    Change {
        /// Target selector.
        target: String,
        /// Selected files; empty for radios and selects.
        #[serde(default)]
        files: Vec<FileMeta>,
    },
    /// Form submission.
    Submit {
        /// Target selector.
        target: String,
        /// Whether the form passes validation.
        #[serde(default = "default_valid")]
        valid: bool,
    },
    /// Run ready deferred work.
    Settle,
    /// Move the virtual clock forward.
    Advance {
        /// Milliseconds to advance.
        ms: u64,
    },
}

fn resolve(page: &Page, selector: &str) -> Result<NodeId, SourceError> {
    let parsed = Selector::parse(selector)?;
    let doc = page.document();
    doc.query_inclusive(doc.body(), &parsed)
        .ok_or_else(|| SourceError::UnknownTarget {
            selector: selector.to_string(),
        })
}

fn event_at(page: &Page, target: &str, kind: EventKind) -> Result<Option<UiEvent>, SourceError> {
    Ok(Some(UiEvent::new(resolve(page, target)?, kind)))
}

impl ScriptStep {
    /// Turn the step into an event for `page`, or `None` for steps that
    /// drive the clock or focus instead of dispatching.
    fn to_event(&self, page: &Page) -> Result<Option<UiEvent>, SourceError> {
        match self {
            Self::Click { target } => event_at(page, target, EventKind::Click),
            Self::MouseDown { target } => event_at(page, target, EventKind::MouseDown),
            Self::Key { target, key } => {
                let code = parse_key_name(key).ok_or_else(|| SourceError::UnknownKey {
                    key: key.clone(),
                })?;
                event_at(page, target, EventKind::KeyDown(code))
            }
            Self::PointerOver { target, x, y } => {
                event_at(page, target, EventKind::PointerOver { x: *x, y: *y })
            }
            Self::PointerMove { target, x, y } => {
                event_at(page, target, EventKind::PointerMove { x: *x, y: *y })
            }
            Self::PointerOut { target, related } => {
                let related = related
                    .as_deref()
                    .map(|selector| resolve(page, selector))
                    .transpose()?;
                event_at(page, target, EventKind::PointerOut { related })
            }
            Self::Scroll => event_at(page, "body", EventKind::Scroll),
            Self::Invalid { target, message } => event_at(
                page,
                target,
                EventKind::Invalid {
                    message: message.clone(),
                },
            ),
            Self::Input { target, valid } => event_at(page, target, EventKind::Input { valid: *valid }),
            Self::DragOver { target } => event_at(page, target, EventKind::DragOver),
            Self::DragLeave { target } => event_at(page, target, EventKind::DragLeave),
            Self::Drop { target, files } => event_at(
                page,
                target,
                EventKind::Drop {
                    files: files.clone(),
                },
            ),
            Self::Change { target, files } => event_at(
                page,
                target,
                EventKind::Change {
                    files: files.clone(),
                },
            ),
            Self::Submit { target, valid } => event_at(page, target, EventKind::Submit { valid: *valid }),
            Self::Focus { .. } | Self::Settle | Self::Advance { .. } => Ok(None),
        }
    }
}

/// Replay `steps` against `page` in order.
///
/// # Errors
///
/// Stops at the first step whose target selector is malformed or matches
/// nothing, or whose key name is unknown. Earlier steps stay applied.
pub fn apply_script(page: &mut Page, steps: &[ScriptStep]) -> Result<(), SourceError> {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "replaying step");
        match step {
            ScriptStep::Settle => page.settle(),
            ScriptStep::Advance { ms } => page.advance(*ms),
            ScriptStep::Focus { target } => {
                let node = resolve(page, target)?;
                if !page.focus(node) {
                    debug!(%target, "scripted focus refused");
                }
            }
            _ => {
                if let Some(event) = step.to_event(page)? {
                    page.dispatch(event);
                }
            }
        }
    }
    Ok(())
}
