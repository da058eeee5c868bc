//! Claim and inquiry mode switching for the item request form.
//!
//! One form serves two requests: claiming an item as its owner, or asking
//! about it. The checked radio decides the description copy and whether
//! the proof-of-ownership section is shown to everyone, including
//! assistive technology.

use super::{aria_bool, EventContext};
use crate::model::{Document, EventKind, NodeId, Selector, SimpleSelector, UiEvent};
use tracing::debug;

const DESCRIBED_BY: &str = "description-help";

/// Which request the form is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Ownership claim; proof is required.
    Claim,
    /// Question about the item.
    Inquiry,
}

impl RequestMode {
    fn label(self) -> &'static str {
        match self {
            Self::Claim => "Item Description / Proof of Ownership",
            Self::Inquiry => "Your Question or Inquiry",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Self::Claim => {
                "Describe the item in detail to prove ownership. Include color, brand, size, \
                 distinguishing features, where you lost it, etc."
            }
            Self::Inquiry => "Ask a question about this item or request more information",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Claim => {
                "Describe the item in detail. Include color, brand, size, distinguishing \
                 features, where you lost it, etc."
            }
            Self::Inquiry => {
                "e.g., \"Does this water bottle have a dent on the side?\" or \"Can you \
                 provide more details about where exactly it was found?\""
            }
        }
    }
}

fn radio(value: &str) -> Selector {
    Selector::tag("input").and(SimpleSelector::Attr {
        name: "value".to_string(),
        value: Some(value.to_string()),
    })
}

/// Keeps the request form's copy in step with the chosen mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimFormSwitcher {
    claim_radio: Option<NodeId>,
    inquiry_radio: Option<NodeId>,
    label: Option<NodeId>,
    help: Option<NodeId>,
    description: Option<NodeId>,
    proof_section: Option<NodeId>,
    mode: Option<RequestMode>,
}

impl ClaimFormSwitcher {
    /// Find the mode radios under `scope` and render the initial mode.
    ///
    /// Returns `None` when neither radio exists.
    pub fn attach(doc: &mut Document, scope: NodeId) -> Option<Self> {
        let claim_radio = doc.query(scope, &radio("claim"));
        let inquiry_radio = doc.query(scope, &radio("inquiry"));
        if claim_radio.is_none() && inquiry_radio.is_none() {
            return None;
        }

        let mut switcher = Self {
            claim_radio,
            inquiry_radio,
            label: doc.query(scope, &Selector::id("description-label")),
            help: doc.query(scope, &Selector::id(DESCRIBED_BY)),
            description: doc.query(scope, &Selector::id("id_description")),
            proof_section: doc.query(scope, &Selector::id("additional-proof-section")),
            mode: None,
        };
        switcher.update(doc);
        Some(switcher)
    }

    /// Mode currently rendered, if either radio is checked.
    pub fn mode(&self) -> Option<RequestMode> {
        self.mode
    }

    /// React to a mode radio becoming checked.
    pub fn handle_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        if !matches!(event.kind, EventKind::Change { .. }) {
            return;
        }
        let target = Some(event.target);
        let other = if target == self.claim_radio {
            self.inquiry_radio
        } else if target == self.inquiry_radio {
            self.claim_radio
        } else {
            return;
        };

        cx.document.set_attribute(event.target, "checked", "");
        if let Some(other) = other {
            cx.document.remove_attribute(other, "checked");
        }
        self.update(cx.document);
    }

    fn checked_mode(&self, doc: &Document) -> Option<RequestMode> {
        let checked = |radio: Option<NodeId>| radio.is_some_and(|r| doc.has_attribute(r, "checked"));
        if checked(self.claim_radio) {
            Some(RequestMode::Claim)
        } else if checked(self.inquiry_radio) {
            Some(RequestMode::Inquiry)
        } else {
            None
        }
    }

    fn update(&mut self, doc: &mut Document) {
        let Some(mode) = self.checked_mode(doc) else {
            return;
        };

        if let Some(label) = self.label {
            doc.set_text(label, mode.label());
        }
        if let Some(help) = self.help {
            doc.set_text(help, mode.help());
        }
        if let Some(description) = self.description {
            doc.set_attribute(description, "placeholder", mode.placeholder());
            doc.set_attribute(description, "aria-describedby", DESCRIBED_BY);
        }
        if let Some(section) = self.proof_section {
            let claim = mode == RequestMode::Claim;
            doc.set_style(section, "display", if claim { "block" } else { "none" });
            if let Some(proof) = doc.query(section, &Selector::tag("textarea")) {
                if claim {
                    doc.remove_attribute(proof, "aria-hidden");
                } else {
                    doc.set_attribute(proof, "aria-hidden", aria_bool(true));
                }
            }
        }

        debug!(?mode, "request form mode rendered");
        self.mode = Some(mode);
    }
}
