//! Accessible form validation feedback.
//!
//! Required controls announce their state through ARIA attributes and an
//! inline error message that screen readers pick up as an alert.

use super::{aria_bool, EventContext};
use crate::model::{Document, EventKind, NodeId, Selector, UiEvent};
use tracing::debug;

const INVALID_CLASS: &str = "is-invalid";
const MESSAGE_CLASS: &str = "error-message";

/// Required controls of every form under a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFeedback {
    controls: Vec<NodeId>,
}

impl ValidationFeedback {
    /// Mark every `[required]` control inside a form as required for
    /// assistive technology.
    pub fn attach(doc: &mut Document, scope: NodeId) -> Self {
        let form = Selector::tag("form");
        let mut forms = doc.query_all(scope, &form);
        if doc.matches(scope, &form) {
            forms.insert(0, scope);
        }

        let mut controls = Vec::new();
        for form in forms {
            for control in doc.query_all(form, &Selector::attr("required")) {
                if controls.contains(&control) {
                    continue;
                }
                doc.set_attribute(control, "aria-required", aria_bool(true));
                controls.push(control);
            }
        }
        Self { controls }
    }

    /// Controls being tracked, in document order.
    pub fn controls(&self) -> &[NodeId] {
        &self.controls
    }

    /// React to `invalid` and `input` events on tracked controls.
    pub fn handle_event(&self, cx: &mut EventContext<'_>, event: &UiEvent) {
        let control = event.target;
        if !self.controls.contains(&control) {
            return;
        }
        match &event.kind {
            EventKind::Invalid { message } => {
                cx.outcome.prevent_default();
                mark_invalid(cx.document, control, message);
            }
            EventKind::Input { valid: true } => clear_invalid(cx.document, control),
            _ => {}
        }
    }
}

fn message_for(doc: &Document, control: NodeId) -> Option<NodeId> {
    let parent = doc.parent(control)?;
    doc.query(parent, &Selector::class(MESSAGE_CLASS))
}

fn mark_invalid(doc: &mut Document, control: NodeId, message: &str) {
    doc.set_attribute(control, "aria-invalid", aria_bool(true));
    doc.add_class(control, INVALID_CLASS);

    let Some(parent) = doc.parent(control) else {
        return;
    };
    let error = match message_for(doc, control) {
        Some(existing) => existing,
        None => {
            let span = doc.create_element("span");
            doc.add_class(span, MESSAGE_CLASS);
            doc.set_attribute(span, "role", "alert");
            doc.append_child(parent, span);
            span
        }
    };
    doc.set_text(error, message);

    let error_id = format!("{}-error", doc.attribute(control, "id").unwrap_or_default());
    doc.set_attribute(error, "id", error_id.as_str());
    doc.set_attribute(control, "aria-describedby", error_id);
    debug!(%control, "control marked invalid");
}

fn clear_invalid(doc: &mut Document, control: NodeId) {
    doc.set_attribute(control, "aria-invalid", aria_bool(false));
    doc.remove_class(control, INVALID_CLASS);
    if let Some(error) = message_for(doc, control) {
        doc.remove(error);
    }
}
