//! Image slider with wrap-around navigation.
//!
//! Markup hooks: a `[data-lf-slider]` root containing `[data-lf-slide]`
//! slides inside a `.lf-slider-viewport` scroll container, plus optional
//! `[data-lf-slider-prev]` and `[data-lf-slider-next]` buttons.

use super::{aria_bool, EventContext};
use crate::model::{Document, EventKind, KeyIntent, NodeId, Selector, UiEvent};
use std::num::NonZeroUsize;
use tracing::debug;

/// Accessible name of every slider viewport.
pub const VIEWPORT_LABEL: &str = "Image carousel";

/// Map any requested index onto `[0, len)`, wrapping in both directions.
///
/// ```
/// use lfui::behavior::normalize_index;
/// use std::num::NonZeroUsize;
///
/// let five = NonZeroUsize::new(5).unwrap();
/// assert_eq!(normalize_index(-1, five), 4);
/// assert_eq!(normalize_index(5, five), 0);
/// ```
pub fn normalize_index(requested: i64, len: NonZeroUsize) -> usize {
    let n = len.get() as i64;
    (((requested % n) + n) % n) as usize
}

/// State of one slider instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselController {
    root: NodeId,
    slides: Vec<NodeId>,
    viewport: NodeId,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    current: usize,
}

impl CarouselController {
    /// Attach to every slider under `scope`, skipping incomplete ones.
    pub fn attach_all(doc: &mut Document, scope: NodeId) -> Vec<Self> {
        doc.query_all(scope, &Selector::attr("data-lf-slider"))
            .into_iter()
            .filter_map(|root| Self::attach(doc, root))
            .collect()
    }

    /// Attach to one slider root.
    ///
    /// Returns `None` when the root has no slides or no viewport.
    pub fn attach(doc: &mut Document, root: NodeId) -> Option<Self> {
        let slides = doc.query_all(root, &Selector::attr("data-lf-slide"));
        let viewport = doc.query(root, &Selector::class("lf-slider-viewport"));
        let Some(viewport) = viewport.filter(|_| !slides.is_empty()) else {
            debug!(%root, "slider without slides or viewport skipped");
            return None;
        };

        let prev = doc.query(root, &Selector::attr("data-lf-slider-prev"));
        let next = doc.query(root, &Selector::attr("data-lf-slider-next"));

        let mut controller = Self {
            root,
            slides,
            viewport,
            prev,
            next,
            current: 0,
        };

        for button in [prev, next].into_iter().flatten() {
            doc.set_attribute(button, "type", "button");
        }
        controller.go_to(doc, 0);

        doc.set_attribute(viewport, "role", "region");
        doc.set_attribute(viewport, "aria-label", VIEWPORT_LABEL);
        doc.set_attribute(viewport, "tabindex", "0");

        Some(controller)
    }

    /// The `[data-lf-slider]` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The scroll container.
    pub fn viewport(&self) -> NodeId {
        self.viewport
    }

    /// Slides in order.
    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    /// Index of the current slide.
    pub fn current(&self) -> usize {
        self.current
    }

    fn len(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.slides.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Show the slide at `requested`, wrapping out-of-range values.
    ///
    /// Scrolls the viewport to the slide, exposes only that slide to
    /// assistive technology and the tab order, and relabels the buttons.
    /// Returns the normalized index.
    pub fn go_to(&mut self, doc: &mut Document, requested: i64) -> usize {
        let index = normalize_index(requested, self.len());
        self.current = index;

        let offset = doc.layout(self.slides[index]).x - doc.layout(self.viewport).x;
        doc.set_scroll_left(self.viewport, offset);

        for (i, slide) in self.slides.iter().enumerate() {
            let is_current = i == index;
            doc.set_attribute(*slide, "aria-hidden", aria_bool(!is_current));
            doc.set_attribute(*slide, "tabindex", if is_current { "0" } else { "-1" });
        }

        let total = self.slides.len();
        if let Some(prev) = self.prev {
            doc.set_attribute(
                prev,
                "aria-label",
                format!("Previous slide, {} of {}", index + 1, total),
            );
        }
        if let Some(next) = self.next {
            doc.set_attribute(
                next,
                "aria-label",
                format!("Next slide, {} of {}", index + 1, total),
            );
        }

        debug!(root = %self.root, index, "slide shown");
        index
    }

    /// Show the previous slide.
    pub fn previous(&mut self, doc: &mut Document) -> usize {
        self.go_to(doc, self.current as i64 - 1)
    }

    /// Show the next slide.
    pub fn next(&mut self, doc: &mut Document) -> usize {
        self.go_to(doc, self.current as i64 + 1)
    }

    /// Handle button clicks and arrow keys inside the viewport.
    pub fn handle_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        match &event.kind {
            EventKind::Click => {
                let on_prev = hits(cx.document, event.target, self.prev, "data-lf-slider-prev");
                let on_next = hits(cx.document, event.target, self.next, "data-lf-slider-next");
                if on_prev {
                    cx.outcome.prevent_default();
                    self.previous(cx.document);
                } else if on_next {
                    cx.outcome.prevent_default();
                    self.next(cx.document);
                }
            }
            EventKind::KeyDown(code) if cx.document.contains(self.viewport, event.target) => {
                match cx.keys.get(*code) {
                    Some(KeyIntent::Previous) => {
                        cx.outcome.prevent_default();
                        self.previous(cx.document);
                    }
                    Some(KeyIntent::Next) => {
                        cx.outcome.prevent_default();
                        self.next(cx.document);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn hits(doc: &Document, target: NodeId, button: Option<NodeId>, marker: &str) -> bool {
    button.is_some() && doc.closest(target, &Selector::attr(marker)) == button
}

#[cfg(test)]
#[path = "carousel_tests.rs"]
mod tests;
