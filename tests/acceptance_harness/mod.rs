//! Shared harness for acceptance tests.
//!
//! Loads a JSON page fixture, attaches every behavior and addresses
//! elements by id so scenarios read like user actions.

#![allow(dead_code)]

use crossterm::event::KeyCode;
use lfui::config::BehaviorConfig;
use lfui::model::{Document, EventKind, DispatchOutcome, NodeId, Selector, UiEvent};
use lfui::page::Page;
use lfui::source::{load_page, SourceError};
use std::path::Path;

/// A page under test.
pub struct AcceptanceTestHarness {
    page: Page,
}

impl AcceptanceTestHarness {
    /// Load `path` and attach with default settings.
    pub fn from_fixture(path: &str) -> Result<Self, SourceError> {
        Self::from_fixture_with_config(path, &BehaviorConfig::default())
    }

    /// Load `path` and attach with `config`.
    pub fn from_fixture_with_config(
        path: &str,
        config: &BehaviorConfig,
    ) -> Result<Self, SourceError> {
        let fixture = load_page(Path::new(path))?;
        let page = Page::attach(Document::from_page(&fixture), config);
        Ok(Self { page })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn doc(&self) -> &Document {
        self.page.document()
    }

    /// Element with `id`. Panics when the fixture lacks it.
    pub fn id(&self, id: &str) -> NodeId {
        let doc = self.page.document();
        doc.query(doc.body(), &Selector::id(id))
            .unwrap_or_else(|| panic!("fixture has no #{id}"))
    }

    pub fn click(&mut self, id: &str) -> DispatchOutcome {
        let target = self.id(id);
        self.page.dispatch(UiEvent::click(target))
    }

    pub fn key(&mut self, id: &str, code: KeyCode) -> DispatchOutcome {
        let target = self.id(id);
        self.page.dispatch(UiEvent::key(target, code))
    }

    pub fn hover(&mut self, id: &str, x: f64, y: f64) -> DispatchOutcome {
        let target = self.id(id);
        self.page.dispatch(UiEvent::pointer_over(target, x, y))
    }

    pub fn move_pointer(&mut self, id: &str, x: f64, y: f64) -> DispatchOutcome {
        let target = self.id(id);
        self.page.dispatch(UiEvent::pointer_move(target, x, y))
    }

    pub fn leave(&mut self, id: &str, related: Option<&str>) -> DispatchOutcome {
        let target = self.id(id);
        let related = related.map(|r| self.id(r));
        self.page.dispatch(UiEvent::pointer_out(target, related))
    }

    pub fn scroll(&mut self) -> DispatchOutcome {
        let body = self.doc().body();
        self.page.dispatch(UiEvent::new(body, EventKind::Scroll))
    }

    pub fn focus(&mut self, id: &str) -> bool {
        let target = self.id(id);
        self.page.focus(target)
    }

    pub fn settle(&mut self) {
        self.page.settle();
    }

    pub fn focused_id(&self) -> Option<String> {
        let doc = self.doc();
        doc.focused()
            .and_then(|node| doc.attribute(node, "id"))
            .map(str::to_string)
    }

    pub fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.doc()
            .attribute(self.id(id), name)
            .map(str::to_string)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.doc().has_class(self.id(id), class)
    }
}
