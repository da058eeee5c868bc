//! Navigation disclosures: dropdown menus and the mobile menu toggle.
//!
//! Dropdowns found under one scope form a single exclusivity set: opening
//! one closes the others. The mobile menu is an independent switch.
//!
//! Markup hooks:
//! - `.dropdown` root, containing a `.dropdown-toggle` trigger and a
//!   `.dropdown-menu` panel. The root carries `active` while open.
//! - `.navbar-toggle` button flipping `active` on `#navbarMenu`.

use super::{aria_bool, EventContext};
use crate::model::{Document, EventKind, KeyIntent, NodeId, Selector, UiEvent};
use crate::page::Task;
use tracing::debug;

const OPEN_CLASS: &str = "active";

fn root_selector() -> Selector {
    Selector::class("dropdown")
}

fn trigger_selector() -> Selector {
    Selector::class("dropdown-toggle")
}

fn panel_selector() -> Selector {
    Selector::class("dropdown-menu")
}

/// One trigger/panel pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureGroup {
    root: NodeId,
    trigger: NodeId,
    panel: NodeId,
    is_open: bool,
}

impl DisclosureGroup {
    /// The `.dropdown` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The element that opens and closes the panel.
    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// The element whose visibility is toggled.
    pub fn panel(&self) -> NodeId {
        self.panel
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

/// The mobile navigation switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    toggle: NodeId,
    menu: NodeId,
}

impl MobileMenu {
    /// The `.navbar-toggle` button.
    pub fn toggle(&self) -> NodeId {
        self.toggle
    }

    /// The `#navbarMenu` element.
    pub fn menu(&self) -> NodeId {
        self.menu
    }

    /// Whether the menu is shown.
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.menu, OPEN_CLASS)
    }
}

/// Open/closed state of every disclosure under one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureStateMachine {
    groups: Vec<DisclosureGroup>,
    mobile: Option<MobileMenu>,
}

impl DisclosureStateMachine {
    /// Find every disclosure under `scope` and bring it into the closed state.
    pub fn attach(doc: &mut Document, scope: NodeId) -> Self {
        let mut groups = Vec::new();
        for root in doc.query_all(scope, &root_selector()) {
            let trigger = doc.query(root, &trigger_selector());
            let panel = doc.query(root, &panel_selector());
            let (Some(trigger), Some(panel)) = (trigger, panel) else {
                debug!(%root, "dropdown without trigger or panel skipped");
                continue;
            };
            doc.remove_class(root, OPEN_CLASS);
            doc.set_attribute(trigger, "aria-expanded", aria_bool(false));
            groups.push(DisclosureGroup {
                root,
                trigger,
                panel,
                is_open: false,
            });
        }

        let mobile = match (
            doc.query(scope, &Selector::class("navbar-toggle")),
            doc.query(scope, &Selector::id("navbarMenu")),
        ) {
            (Some(toggle), Some(menu)) => Some(MobileMenu { toggle, menu }),
            _ => None,
        };

        Self { groups, mobile }
    }

    /// All attached groups in document order.
    pub fn groups(&self) -> &[DisclosureGroup] {
        &self.groups
    }

    /// Indices of open groups.
    pub fn open_groups(&self) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_open)
            .map(|(i, _)| i)
            .collect()
    }

    /// The mobile menu switch, when present.
    pub fn mobile(&self) -> Option<MobileMenu> {
        self.mobile
    }

    fn group_for_trigger(&self, doc: &Document, target: NodeId) -> Option<usize> {
        let trigger = doc.closest(target, &trigger_selector())?;
        self.groups.iter().position(|g| g.trigger == trigger)
    }

    /// Handle events aimed at disclosure elements.
    pub fn handle_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        match &event.kind {
            EventKind::Click => {
                if let Some(mobile) = self.mobile {
                    if cx.document.closest(event.target, &Selector::class("navbar-toggle"))
                        == Some(mobile.toggle)
                    {
                        self.toggle_mobile(cx.document);
                    }
                }
                if let Some(index) = self.group_for_trigger(cx.document, event.target) {
                    cx.outcome.prevent_default();
                    cx.outcome.stop_propagation();
                    self.activate(index, cx);
                }
            }
            EventKind::KeyDown(code) => match cx.keys.get(*code) {
                Some(KeyIntent::Activate) => {
                    if let Some(index) = self.group_for_trigger(cx.document, event.target) {
                        cx.outcome.prevent_default();
                        self.activate(index, cx);
                    }
                }
                Some(KeyIntent::Dismiss) => {
                    let open = self
                        .groups
                        .iter()
                        .position(|g| g.is_open && cx.document.contains(g.root, event.target));
                    if let Some(index) = open {
                        self.close(index, cx.document);
                        cx.document.focus(self.groups[index].trigger);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Close every group when a click lands outside all of them.
    ///
    /// Runs at document level, after element handlers, and is skipped when
    /// an element handler stopped propagation. Clicks on the mobile toggle
    /// leave the dropdowns alone.
    pub fn handle_document_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        if event.kind != EventKind::Click || cx.outcome.propagation_stopped {
            return;
        }
        if cx.document.closest(event.target, &root_selector()).is_some() {
            return;
        }
        if self
            .mobile
            .is_some_and(|m| cx.document.contains(m.toggle, event.target))
        {
            return;
        }
        self.close_all(cx.document);
    }

    /// Toggle group `index` as if its trigger were activated.
    pub fn activate(&mut self, index: usize, cx: &mut EventContext<'_>) {
        if self.groups[index].is_open {
            self.close(index, cx.document);
            return;
        }

        let others: Vec<usize> = self
            .open_groups()
            .into_iter()
            .filter(|i| *i != index)
            .collect();
        for other in others {
            self.close(other, cx.document);
        }

        self.open(index, cx.document);
        cx.scheduler.defer(Task::FocusFirstItem {
            panel: self.groups[index].panel,
        });
    }

    fn open(&mut self, index: usize, doc: &mut Document) {
        let group = &mut self.groups[index];
        group.is_open = true;
        doc.add_class(group.root, OPEN_CLASS);
        doc.set_attribute(group.trigger, "aria-expanded", aria_bool(true));
        debug!(group = index, "dropdown opened");
    }

    fn close(&mut self, index: usize, doc: &mut Document) {
        let group = &mut self.groups[index];
        group.is_open = false;
        doc.remove_class(group.root, OPEN_CLASS);
        doc.set_attribute(group.trigger, "aria-expanded", aria_bool(false));
        debug!(group = index, "dropdown closed");
    }

    /// Close every open group.
    pub fn close_all(&mut self, doc: &mut Document) {
        for index in self.open_groups() {
            self.close(index, doc);
        }
    }

    /// Flip the mobile menu. Returns whether it is open afterwards.
    pub fn toggle_mobile(&mut self, doc: &mut Document) -> bool {
        let Some(mobile) = self.mobile else {
            return false;
        };
        let open = doc.toggle_class(mobile.menu, OPEN_CLASS);
        doc.set_attribute(mobile.toggle, "aria-expanded", aria_bool(open));
        debug!(open, "mobile menu toggled");
        open
    }
}

/// Focus the first focusable element inside `panel`.
///
/// Meant to run as a deferred task once the panel's reveal has been
/// committed; returns whether focus moved.
pub fn focus_first_item(doc: &mut Document, panel: NodeId) -> bool {
    match doc.first_focusable(panel) {
        Some(item) => doc.focus(item),
        None => false,
    }
}

#[cfg(test)]
#[path = "disclosure_tests.rs"]
mod tests;
