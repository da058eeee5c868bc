//! Retained-mode element tree.
//!
//! `Document` is the surface every behavior reads and writes: element
//! attributes, classes, inline style, text, layout boxes, scroll offsets and
//! input focus. It stands in for the browser DOM and can be filled from real
//! markup by a host or from a [`Markup`](super::Markup) fixture.

use super::geometry::{Rect, Size};
use super::node::{Node, NodeId};
use super::selector::{Selector, SimpleSelector};
use super::style::StyleSheet;
use std::collections::HashSet;
use std::fmt::Write as _;
use tracing::debug;

/// Tags that take keyboard focus without an explicit `tabindex`.
const NATIVELY_FOCUSABLE: &[&str] = &["a", "button", "input", "select", "textarea"];

/// An element tree plus the page-level state that goes with it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    viewport: Size,
    location: String,
    focused: Option<NodeId>,
    stylesheet: StyleSheet,
    committed_hidden: HashSet<NodeId>,
    render_generation: u64,
}

impl Document {
    /// Create an empty document containing only `<body>`.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: vec![Node::new("body")],
            body: NodeId::new(0),
            viewport,
            location: "/".to_string(),
            focused: None,
            stylesheet: StyleSheet::site_default(),
            committed_hidden: HashSet::new(),
            render_generation: 0,
        }
    }

    /// The `<body>` element; root of the tree.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Size of the visible viewport.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Path and query of the page, e.g. `/items/?login=1`.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Replace the page location.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Value of a query-string parameter in the page location.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        let (_, query) = self.location.split_once('?')?;
        let query = query.split('#').next().unwrap_or_default();
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then_some(value)
        })
    }

    /// Stylesheet evaluated at render commit.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// Replace the stylesheet. Takes effect at the next commit.
    pub fn set_stylesheet(&mut self, stylesheet: StyleSheet) {
        self.stylesheet = stylesheet;
    }

    // ===== Structure =====

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Remove `node` and its subtree from the tree.
    ///
    /// Focus inside the removed subtree is dropped.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(focused) = self.focused {
            if self.contains(node, focused) {
                self.focused = None;
            }
        }
        self.detach(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != node);
        }
    }

    /// Tag name, lowercase.
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].tag
    }

    /// Parent element, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Child elements in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(node),
        }
    }

    /// Whether `node` is reachable from `<body>`.
    pub fn is_connected(&self, node: NodeId) -> bool {
        node == self.body || self.ancestors(node).any(|a| a == self.body)
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All descendants of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    // ===== Matching =====

    /// Whether `node` satisfies every part of `selector`.
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.parts().iter().all(|part| match part {
            SimpleSelector::Tag(tag) => self.tag(node) == tag,
            SimpleSelector::Class(class) => self.has_class(node, class),
            SimpleSelector::Id(id) => self.attribute(node, "id") == Some(id.as_str()),
            SimpleSelector::Attr { name, value } => match (self.attribute(node, name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        })
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    ///
    /// Starts at `node` itself and walks toward the root. This is how
    /// delegated handlers map an event target that may be deeply nested
    /// inside a hook element back to the hook element.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|candidate| self.matches(*candidate, selector))
    }

    /// First descendant of `scope` matching `selector`, in document order.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.matches(*node, selector))
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    /// Like [`query`](Self::query) but also considers `scope` itself.
    pub fn query_inclusive(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        if self.matches(scope, selector) {
            Some(scope)
        } else {
            self.query(scope, selector)
        }
    }

    // ===== Attributes =====

    /// Attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.index()]
            .attributes
            .get(name)
            .map(String::as_str)
    }

    /// Whether the attribute is present.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.nodes[node.index()].attributes.contains_key(name)
    }

    /// Set an attribute. Setting `class` replaces the class list.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            self.nodes[node.index()].classes =
                value.split_whitespace().map(str::to_string).collect();
            return;
        }
        self.nodes[node.index()]
            .attributes
            .insert(name.to_string(), value);
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.nodes[node.index()].attributes.remove(name);
    }

    /// `data-*` attribute by its dataset key in kebab case (`date-found`).
    ///
    /// Empty values read as absent.
    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attribute(node, &format!("data-{key}"))
            .filter(|value| !value.is_empty())
    }

    // ===== Classes =====

    /// Whether the element carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.index()].classes.iter().any(|c| c == class)
    }

    /// Add a class if missing.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.index()].classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.index()].classes.retain(|c| c != class);
    }

    /// Flip a class. Returns whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Class list in insertion order.
    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.index()].classes
    }

    // ===== Inline style, text, layout =====

    /// Inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.index()]
            .style
            .get(property)
            .map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        self.nodes[node.index()]
            .style
            .insert(property.to_string(), value.into());
    }

    /// Text content owned directly by the element.
    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].text
    }

    /// Replace the element's own text.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.index()].text = text.into();
    }

    /// Layout box reported by the rendering layer.
    pub fn layout(&self, node: NodeId) -> Rect {
        self.nodes[node.index()].layout
    }

    /// Record the element's layout box.
    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.index()].layout = rect;
    }

    /// Horizontal scroll offset of a scroll container.
    pub fn scroll_left(&self, node: NodeId) -> f64 {
        self.nodes[node.index()].scroll_left
    }

    /// Set the horizontal scroll offset.
    pub fn set_scroll_left(&mut self, node: NodeId, offset: f64) {
        self.nodes[node.index()].scroll_left = offset;
    }

    // ===== Rendering and focus =====

    /// Apply pending class and style changes to the rendered state.
    ///
    /// Until this runs, [`is_rendered`](Self::is_rendered) and
    /// [`focus`](Self::focus) see the state of the previous commit.
    pub fn commit_render(&mut self) {
        let hidden: HashSet<NodeId> = std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .filter(|node| self.stylesheet.hides(self, *node))
            .collect();
        self.committed_hidden = hidden;
        self.render_generation += 1;
    }

    /// Number of render commits so far.
    pub fn render_generation(&self) -> u64 {
        self.render_generation
    }

    /// Whether the element was visible at the last render commit.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        self.is_connected(node)
            && !std::iter::once(node)
                .chain(self.ancestors(node))
                .any(|n| self.committed_hidden.contains(&n))
    }

    /// Whether the element can take focus. Anchors need an `href`.
    pub fn is_focusable(&self, node: NodeId) -> bool {
        if self.has_attribute(node, "disabled") {
            return false;
        }
        if self.has_attribute(node, "tabindex") {
            return true;
        }
        match self.tag(node) {
            "a" => self.has_attribute(node, "href"),
            tag => NATIVELY_FOCUSABLE.contains(&tag),
        }
    }

    /// Whether the element is reachable with Tab: focusable and not taken
    /// out of the order by a negative `tabindex`.
    pub fn is_tabbable(&self, node: NodeId) -> bool {
        let negative = self
            .attribute(node, "tabindex")
            .and_then(|t| t.trim().parse::<i64>().ok())
            .is_some_and(|t| t < 0);
        !negative && self.is_focusable(node)
    }

    /// First tabbable descendant of `scope`.
    pub fn first_focusable(&self, scope: NodeId) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.is_tabbable(*node))
    }

    /// Element holding input focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to `node`.
    ///
    /// Fails when the element is not focusable or was hidden at the last
    /// render commit. Focus is left unchanged on failure.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_focusable(node) || !self.is_rendered(node) {
            debug!(%node, "focus refused");
            return false;
        }
        self.focused = Some(node);
        true
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // ===== Output =====

    /// Deterministic indented rendering of the connected tree.
    ///
    /// One element per line: tag, `class`, attributes in name order, inline
    /// `style`, horizontal scroll offset when non-zero, then own text. The
    /// focused element is suffixed with `[focused]`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.body, 0, &mut out);
        out
    }

    fn dump_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let data = &self.nodes[node.index()];
        let _ = write!(out, "{:indent$}<{}", "", data.tag, indent = depth * 2);
        if !data.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", data.classes.join(" "));
        }
        for (name, value) in &data.attributes {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        if !data.style.is_empty() {
            let style: Vec<String> = data
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            let _ = write!(out, " style=\"{}\"", style.join("; "));
        }
        if data.scroll_left != 0.0 {
            let _ = write!(out, " scroll-left=\"{}\"", data.scroll_left);
        }
        out.push('>');
        out.push_str(&data.text);
        if self.focused == Some(node) {
            out.push_str(" [focused]");
        }
        out.push('\n');
        for child in &data.children {
            self.dump_node(*child, depth + 1, out);
        }
    }
}

/// Iterator over strict ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
