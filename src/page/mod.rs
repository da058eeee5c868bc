//! The page context: one enhanced document and everything attached to it.
//!
//! `Page` owns the [`Document`], the [`Scheduler`] and every behavior. It
//! routes each input event the way a browser would: element-level handlers
//! first, then document-level handlers unless propagation was stopped.
//! Several pages can coexist; nothing is global.

pub mod scheduler;

pub use scheduler::{Scheduler, Task};

use crate::behavior::{
    disclosure, tagline, CarouselController, ClaimFormSwitcher, DisclosureStateMachine,
    EventContext, FocusVisibleDetector, NoticeTimer, TooltipEngine, UploadPreview,
    ValidationFeedback,
};
use crate::config::{BehaviorConfig, KeyBindings};
use crate::model::{
    DispatchOutcome, Document, EventKind, HostRequest, Measure, NodeId, UiEvent,
};
use tracing::{debug, info, warn};

/// A document with every behavior attached.
#[derive(Debug)]
pub struct Page {
    document: Document,
    scheduler: Scheduler,
    keys: KeyBindings,
    disclosure: Option<DisclosureStateMachine>,
    carousels: Vec<CarouselController>,
    tooltip: Option<TooltipEngine>,
    notices: NoticeTimer,
    focus_visible: FocusVisibleDetector,
    validation: Option<ValidationFeedback>,
    upload: Option<UploadPreview>,
    claim_form: Option<ClaimFormSwitcher>,
    tagline: Option<usize>,
    requests: Vec<HostRequest>,
    last_focused: Option<NodeId>,
}

impl Page {
    /// Attach every behavior to `document`, sizing the tooltip with the
    /// configured text metrics.
    pub fn attach(document: Document, config: &BehaviorConfig) -> Self {
        Self::attach_with_measure(document, config, Box::new(config.measure))
    }

    /// Like [`attach`](Self::attach) with an explicit tooltip measurer.
    ///
    /// Notices and focus-visible detection are page-wide. The other
    /// behaviors attach under the configured scope; when the scope selector
    /// matches nothing they are not attached at all.
    pub fn attach_with_measure(
        mut document: Document,
        config: &BehaviorConfig,
        measure: Box<dyn Measure>,
    ) -> Self {
        let body = document.body();
        let scope = match &config.scope {
            None => Some(body),
            Some(selector) => {
                let found = document.query_inclusive(body, selector);
                if found.is_none() {
                    warn!(scope = %selector, "scope matched nothing; scoped behaviors skipped");
                }
                found
            }
        };

        let mut scheduler = Scheduler::new();
        let notices = NoticeTimer::new(config.dismiss_after_ms, config.fade_ms);
        let scheduled_notices = notices.attach(&mut document, &mut scheduler, body);

        let mut page = Self {
            document,
            scheduler,
            keys: KeyBindings::default(),
            disclosure: None,
            carousels: Vec::new(),
            tooltip: None,
            notices,
            focus_visible: FocusVisibleDetector::new(),
            validation: None,
            upload: None,
            claim_form: None,
            tagline: None,
            requests: Vec::new(),
            last_focused: None,
        };

        if let Some(scope) = scope {
            let doc = &mut page.document;
            page.disclosure = Some(DisclosureStateMachine::attach(doc, scope));
            page.carousels = CarouselController::attach_all(doc, scope);
            page.tooltip = TooltipEngine::attach(doc, scope, config.placement, measure);
            page.validation = Some(ValidationFeedback::attach(doc, scope));
            page.upload = UploadPreview::attach(
                doc,
                scope,
                config.accepted_types.clone(),
                config.max_upload_bytes,
            );
            page.claim_form = ClaimFormSwitcher::attach(doc, scope);
            page.tagline = tagline::randomize(doc, scope, &mut rand::rng());
        }

        page.document.commit_render();
        page.last_focused = page.document.focused();
        info!(
            dropdowns = page.disclosure.as_ref().map_or(0, |d| d.groups().len()),
            carousels = page.carousels.len(),
            tooltip = page.tooltip.is_some(),
            notices = scheduled_notices,
            upload = page.upload.is_some(),
            claim_form = page.claim_form.is_some(),
            tagline = ?page.tagline,
            "page attached"
        );
        page
    }

    /// The enhanced tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the tree, for hosts that change markup directly.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Deferred work queue.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Dropdown and mobile menu state, when attached.
    pub fn disclosure(&self) -> Option<&DisclosureStateMachine> {
        self.disclosure.as_ref()
    }

    /// Attached carousels in document order.
    pub fn carousels(&self) -> &[CarouselController] {
        &self.carousels
    }

    /// The hover tooltip, when attached.
    pub fn tooltip(&self) -> Option<&TooltipEngine> {
        self.tooltip.as_ref()
    }

    /// Report form upload state, when attached.
    pub fn upload(&self) -> Option<&UploadPreview> {
        self.upload.as_ref()
    }

    /// Move carousel `index` to slide `requested` (any integer).
    ///
    /// Returns the normalized index, or `None` when there is no such
    /// carousel.
    pub fn carousel_go_to(&mut self, index: usize, requested: i64) -> Option<usize> {
        let carousel = self.carousels.get_mut(index)?;
        Some(carousel.go_to(&mut self.document, requested))
    }

    /// Close every open dropdown.
    pub fn close_disclosures(&mut self) {
        if let Some(disclosure) = self.disclosure.as_mut() {
            disclosure.close_all(&mut self.document);
        }
    }

    /// Flip the mobile menu. Returns whether it is open afterwards.
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.disclosure
            .as_mut()
            .is_some_and(|d| d.toggle_mobile(&mut self.document))
    }

    /// The claim/inquiry switcher, when the page has a request form.
    pub fn claim_form(&self) -> Option<&ClaimFormSwitcher> {
        self.claim_form.as_ref()
    }

    /// Index of the hero tagline shown at attach, when the page has one.
    pub fn tagline(&self) -> Option<usize> {
        self.tagline
    }

    /// Deliver one input event.
    ///
    /// Ready deferred tasks run first, so work queued by the previous event
    /// is complete before this one is handled.
    pub fn dispatch(&mut self, event: UiEvent) -> DispatchOutcome {
        if self.scheduler.has_ready() {
            self.settle();
        }
        if !self.document.is_connected(event.target) {
            debug!(target = %event.target, "event for detached element dropped");
            return DispatchOutcome::default();
        }

        let mut outcome = DispatchOutcome::default();
        let mut cx = EventContext {
            document: &mut self.document,
            scheduler: &mut self.scheduler,
            keys: &self.keys,
            outcome: &mut outcome,
            requests: &mut self.requests,
        };

        // Element-level listeners.
        if let Some(disclosure) = self.disclosure.as_mut() {
            disclosure.handle_event(&mut cx, &event);
        }
        for carousel in &mut self.carousels {
            carousel.handle_event(&mut cx, &event);
        }
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.handle_event(&mut cx, &event);
        }
        if let Some(validation) = &self.validation {
            validation.handle_event(&mut cx, &event);
        }
        if let Some(upload) = self.upload.as_mut() {
            upload.handle_event(&mut cx, &event);
        }
        if let Some(claim_form) = self.claim_form.as_mut() {
            claim_form.handle_event(&mut cx, &event);
        }

        // Document-level listeners.
        if let Some(disclosure) = self.disclosure.as_mut() {
            disclosure.handle_document_event(&mut cx, &event);
        }
        self.focus_visible.handle_event(cx.document, &event);

        match event.kind {
            EventKind::FocusIn => {
                self.document.focus(event.target);
            }
            EventKind::FocusOut if self.document.focused() == Some(event.target) => {
                self.document.blur();
            }
            _ => {}
        }
        self.sync_focus();
        outcome
    }

    /// Move focus to `node`. Fails for nodes hidden in the committed render.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let moved = self.document.focus(node);
        self.sync_focus();
        moved
    }

    /// Commit the render state and run every ready deferred task.
    pub fn settle(&mut self) {
        self.document.commit_render();
        while let Some(task) = self.scheduler.pop_ready() {
            self.run_task(task);
            self.document.commit_render();
        }
    }

    /// Move the virtual clock forward by `ms`, running tasks as they fall
    /// due.
    pub fn advance(&mut self, ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(ms);
        self.settle();
        while let Some(due) = self.scheduler.next_due_ms().filter(|due| *due <= target) {
            self.scheduler.advance_to(due);
            self.settle();
        }
        self.scheduler.advance_to(target);
        self.settle();
    }

    /// Drain the side effects the host must perform.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    fn run_task(&mut self, task: Task) {
        debug!(?task, now_ms = self.scheduler.now_ms(), "running task");
        match task {
            Task::FocusFirstItem { panel } => {
                if !disclosure::focus_first_item(&mut self.document, panel) {
                    debug!(%panel, "no focusable item in panel");
                }
            }
            Task::FadeNotice { notice } => {
                self.notices
                    .fade(&mut self.document, &mut self.scheduler, notice);
            }
            Task::RemoveNotice { notice } => self.notices.remove(&mut self.document, notice),
        }
        self.sync_focus();
    }

    /// Deliver focus-out and focus-in for any focus change since the last
    /// call.
    fn sync_focus(&mut self) {
        let current = self.document.focused();
        if current == self.last_focused {
            return;
        }
        if let Some(previous) = self.last_focused {
            if self.document.is_connected(previous) {
                self.focus_visible.on_focus_out(&mut self.document, previous);
            }
        }
        if let Some(next) = current {
            self.focus_visible.on_focus_in(&mut self.document, next);
        }
        self.last_focused = current;
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
