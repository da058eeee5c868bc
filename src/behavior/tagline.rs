//! Hero tagline rotation.
//!
//! Each page load shows one of a fixed set of two-line taglines in the hero
//! banner. The line break is rendered as a `br` between two spans.

use crate::model::{Document, NodeId, Selector};
use rand::Rng;
use tracing::debug;

/// The taglines, as (first line, second line).
pub const TAGLINES: [(&str, &str); 5] = [
    ("Lose it?", "Find it here."),
    ("One stop", "for lost items."),
    ("Lost things,", "found solutions."),
    ("A helping hand", "for lost items."),
    ("Trusted to", "find your lost items."),
];

/// Pick a tagline with `rng` and render it. Returns the chosen index.
///
/// Nothing happens without a `[data-hero-randomizer]` element holding a
/// `.tagline-text`.
pub fn randomize<R: Rng>(doc: &mut Document, scope: NodeId, rng: &mut R) -> Option<usize> {
    let text = tagline_text(doc, scope)?;
    let index = rng.random_range(0..TAGLINES.len());
    render(doc, text, index);
    Some(index)
}

/// Render tagline `index` (taken modulo the tagline count).
pub fn show(doc: &mut Document, scope: NodeId, index: usize) -> Option<usize> {
    let text = tagline_text(doc, scope)?;
    let index = index % TAGLINES.len();
    render(doc, text, index);
    Some(index)
}

fn tagline_text(doc: &Document, scope: NodeId) -> Option<NodeId> {
    let hero = doc.query_inclusive(scope, &Selector::attr("data-hero-randomizer"))?;
    doc.query(hero, &Selector::class("tagline-text"))
}

fn render(doc: &mut Document, text: NodeId, index: usize) {
    for child in doc.children(text).to_vec() {
        doc.remove(child);
    }
    doc.set_text(text, "");

    let (first, second) = TAGLINES[index];
    let line = |doc: &mut Document, words: &str| {
        let span = doc.create_element("span");
        doc.set_text(span, words);
        doc.append_child(text, span);
    };
    line(doc, first);
    let br = doc.create_element("br");
    doc.append_child(text, br);
    line(doc, second);

    doc.set_attribute(text, "role", "status");
    doc.set_attribute(text, "aria-live", "polite");
    debug!(index, "hero tagline chosen");
}
