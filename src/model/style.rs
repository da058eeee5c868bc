//! Display rules applied by the rendering layer.
//!
//! Controllers only toggle classes. Whether an element is actually shown is
//! decided when the document commits its render state, by evaluating these
//! rules together with the inline `display` style and the `hidden`
//! attribute.

use super::document::Document;
use super::node::NodeId;
use super::selector::Selector;

/// Condition under which a rule's target is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShownWhen {
    /// The element itself carries the class.
    SelfHasClass(String),
    /// Some strict ancestor carries the class.
    AncestorHasClass(String),
}

/// Hide every element matching `target` unless `shown_when` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRule {
    /// Elements the rule applies to.
    pub target: Selector,
    /// Condition that reveals them.
    pub shown_when: ShownWhen,
}

/// Ordered set of display rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<DisplayRule>,
}

impl StyleSheet {
    /// A stylesheet with no rules: only inline `display: none` and the
    /// `hidden` attribute hide anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn with_rule(mut self, target: Selector, shown_when: ShownWhen) -> Self {
        self.rules.push(DisplayRule { target, shown_when });
        self
    }

    /// Rules of the lost-and-found site stylesheet that the behaviors rely on.
    pub fn site_default() -> Self {
        Self::new()
            .with_rule(
                Selector::class("dropdown-menu"),
                ShownWhen::AncestorHasClass("active".to_string()),
            )
            .with_rule(
                Selector::class("lf-hover-tooltip"),
                ShownWhen::SelfHasClass("is-visible".to_string()),
            )
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[DisplayRule] {
        &self.rules
    }

    /// Whether `node` itself is hidden, ignoring its ancestors.
    pub fn hides(&self, doc: &Document, node: NodeId) -> bool {
        if doc.style(node, "display") == Some("none") || doc.has_attribute(node, "hidden") {
            return true;
        }

        self.rules.iter().any(|rule| {
            if !doc.matches(node, &rule.target) {
                return false;
            }
            let shown = match &rule.shown_when {
                ShownWhen::SelfHasClass(class) => doc.has_class(node, class),
                ShownWhen::AncestorHasClass(class) => {
                    doc.ancestors(node).any(|ancestor| doc.has_class(ancestor, class))
                }
            };
            !shown
        })
    }
}
