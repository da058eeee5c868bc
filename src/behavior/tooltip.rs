//! Hover tooltip showing item metadata next to the pointer.
//!
//! A single listener at the scope element handles every
//! `[data-lf-tooltip]` source: the event target is mapped back to its
//! source with [`Document::closest`], so sources may contain any markup.
//! One floating `.lf-hover-tooltip` element is shared by all sources.

use super::EventContext;
use crate::model::{
    clamp_placement, provisional_placement, Document, EventKind, Measure, NodeId, Placement,
    PlacementParams, Point, Rect, Selector, UiEvent,
};
use tracing::{debug, trace};

const TOOLTIP_CLASS: &str = "lf-hover-tooltip";
const VISIBLE_CLASS: &str = "is-visible";

/// Separator between metadata segments: a middle dot with spaces.
pub const META_SEPARATOR: &str = " · ";

fn source_selector() -> Selector {
    Selector::attr("data-lf-tooltip")
}

/// Text shown for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipContent {
    /// Item title; empty when the source has none.
    pub title: String,
    /// Date the item was found.
    pub date_found: Option<String>,
    /// Item category.
    pub category: Option<String>,
    /// Where the item was found.
    pub location: Option<String>,
}

impl TooltipContent {
    /// Read content from a source's data attributes.
    ///
    /// Missing and empty attributes both read as absent.
    pub fn from_source(doc: &Document, source: NodeId) -> Self {
        let field = |key: &str| doc.data(source, key).map(str::to_string);
        Self {
            title: field("title").unwrap_or_default(),
            date_found: field("date-found"),
            category: field("category"),
            location: field("location"),
        }
    }

    /// The metadata line: present segments in date, category, location
    /// order, joined by [`META_SEPARATOR`].
    pub fn meta_line(&self) -> String {
        let segments = [
            self.date_found.as_ref().map(|v| format!("Found: {v}")),
            self.category.as_ref().map(|v| format!("Category: {v}")),
            self.location.as_ref().map(|v| format!("Location: {v}")),
        ];
        segments
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(META_SEPARATOR)
    }
}

/// The shared tooltip and the source it currently describes.
#[derive(Debug)]
pub struct TooltipEngine {
    scope: NodeId,
    tooltip: NodeId,
    title: NodeId,
    meta: NodeId,
    active_target: Option<NodeId>,
    content: TooltipContent,
    params: PlacementParams,
    measure: Box<dyn Measure>,
    last_placement: Option<Placement>,
}

impl TooltipEngine {
    /// Create the shared tooltip element and listen on `scope`.
    ///
    /// Returns `None` when the document already has a tooltip element, so
    /// attaching twice never produces a second one.
    pub fn attach(
        doc: &mut Document,
        scope: NodeId,
        params: PlacementParams,
        measure: Box<dyn Measure>,
    ) -> Option<Self> {
        let body = doc.body();
        if doc
            .query_inclusive(body, &Selector::class(TOOLTIP_CLASS))
            .is_some()
        {
            debug!("tooltip element already present; not attaching again");
            return None;
        }

        let tooltip = doc.create_element("div");
        doc.add_class(tooltip, TOOLTIP_CLASS);
        let title = doc.create_element("div");
        doc.add_class(title, "lf-hover-tooltip-title");
        let meta = doc.create_element("div");
        doc.add_class(meta, "lf-hover-tooltip-meta");
        doc.append_child(tooltip, title);
        doc.append_child(tooltip, meta);
        doc.append_child(body, tooltip);

        Some(Self {
            scope,
            tooltip,
            title,
            meta,
            active_target: None,
            content: TooltipContent::default(),
            params,
            measure,
            last_placement: None,
        })
    }

    /// The floating element.
    pub fn element(&self) -> NodeId {
        self.tooltip
    }

    /// Source currently described, if any.
    pub fn active_target(&self) -> Option<NodeId> {
        self.active_target
    }

    /// Content of the last source shown.
    pub fn content(&self) -> &TooltipContent {
        &self.content
    }

    /// Most recent final placement.
    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// Handle pointer and scroll events delegated from the scope.
    pub fn handle_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        let doc = &mut *cx.document;
        match &event.kind {
            EventKind::PointerOver { x, y } => {
                if !doc.contains(self.scope, event.target) {
                    return;
                }
                if let Some(source) = doc.closest(event.target, &source_selector()) {
                    self.show(doc, source, Point::new(*x, *y));
                }
            }
            EventKind::PointerMove { x, y } => match self.active_target {
                Some(active) if !doc.is_connected(active) => self.hide(doc),
                Some(_) => {
                    self.place(doc, Point::new(*x, *y));
                }
                None => {}
            },
            EventKind::PointerOut { related } => {
                let Some(active) = self.active_target else {
                    return;
                };
                if doc.closest(event.target, &source_selector()) != Some(active) {
                    return;
                }
                let stays_inside = related.is_some_and(|r| doc.contains(active, r));
                if !stays_inside {
                    self.hide(doc);
                }
            }
            EventKind::Scroll => self.hide(doc),
            _ => {}
        }
    }

    fn show(&mut self, doc: &mut Document, source: NodeId, cursor: Point) {
        self.active_target = Some(source);
        self.content = TooltipContent::from_source(doc, source);
        doc.set_text(self.title, self.content.title.clone());
        doc.set_text(self.meta, self.content.meta_line());
        doc.add_class(self.tooltip, VISIBLE_CLASS);
        debug!(%source, title = %self.content.title, "tooltip shown");
        self.place(doc, cursor);
    }

    /// Clear the active source and hide the tooltip.
    pub fn hide(&mut self, doc: &mut Document) {
        if self.active_target.take().is_some() {
            debug!("tooltip hidden");
        }
        doc.remove_class(self.tooltip, VISIBLE_CLASS);
    }

    /// Position the tooltip for `cursor`: place provisionally, measure,
    /// then clamp.
    fn place(&mut self, doc: &mut Document, cursor: Point) -> Placement {
        let provisional = provisional_placement(cursor, self.params);
        self.write_position(doc, provisional);

        let size = self.measure.measure(doc, self.tooltip);
        let placement = clamp_placement(cursor, size, doc.viewport(), self.params);
        self.write_position(doc, placement);
        doc.set_layout(
            self.tooltip,
            Rect::new(
                placement.left - size.width / 2.0,
                placement.top,
                size.width,
                size.height,
            ),
        );

        trace!(left = placement.left, top = placement.top, "tooltip placed");
        self.last_placement = Some(placement);
        placement
    }

    fn write_position(&self, doc: &mut Document, placement: Placement) {
        doc.set_style(self.tooltip, "left", format!("{}px", placement.left));
        doc.set_style(self.tooltip, "top", format!("{}px", placement.top));
    }
}

#[cfg(test)]
#[path = "tooltip_tests.rs"]
mod tests;
