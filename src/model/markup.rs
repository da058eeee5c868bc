//! Declarative element trees used to populate a [`Document`].
//!
//! The same type backs JSON page fixtures and the builder used in tests.

use super::document::Document;
use super::geometry::{Rect, Size};
use super::node::NodeId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Markup {
    /// Tag name.
    pub tag: String,
    /// Optional `id` attribute.
    #[serde(default)]
    pub id: Option<String>,
    /// Class list.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Other attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Own text content.
    #[serde(default)]
    pub text: String,
    /// Layout box as reported by the renderer.
    #[serde(default)]
    pub rect: Option<Rect>,
    /// Children in order.
    #[serde(default)]
    pub children: Vec<Markup>,
}

impl Markup {
    /// Start an element.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Set the `id`.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Set own text.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set the layout box.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A whole page: viewport, location and body content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageMarkup {
    /// Viewport size.
    pub viewport: Size,
    /// Path and query string.
    #[serde(default = "default_location")]
    pub location: String,
    /// The `<body>` element. Its tag is ignored.
    pub body: Markup,
}

fn default_location() -> String {
    "/".to_string()
}

impl Document {
    /// Build a document whose body has the attributes and children of `body`.
    pub fn from_markup(viewport: Size, body: &Markup) -> Self {
        let mut doc = Document::new(viewport);
        let root = doc.body();
        doc.apply_markup(root, body);
        doc.commit_render();
        doc
    }

    /// Build a document from a page fixture.
    pub fn from_page(page: &PageMarkup) -> Self {
        let mut doc = Document::from_markup(page.viewport, &page.body);
        doc.set_location(page.location.clone());
        doc
    }

    /// Create `markup` as a new subtree appended to `parent`.
    pub fn append_markup(&mut self, parent: NodeId, markup: &Markup) -> NodeId {
        let node = self.create_element(&markup.tag);
        self.append_child(parent, node);
        self.apply_markup(node, markup);
        node
    }

    fn apply_markup(&mut self, node: NodeId, markup: &Markup) {
        if let Some(id) = &markup.id {
            self.set_attribute(node, "id", id.clone());
        }
        for class in &markup.classes {
            self.add_class(node, class);
        }
        for (name, value) in &markup.attrs {
            self.set_attribute(node, name, value.clone());
        }
        if !markup.text.is_empty() {
            self.set_text(node, markup.text.clone());
        }
        if let Some(rect) = markup.rect {
            self.set_layout(node, rect);
        }
        for child in &markup.children {
            self.append_markup(node, child);
        }
    }
}
