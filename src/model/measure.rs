//! Size measurement of rendered elements.
//!
//! Floating elements are sized by their content, which only the rendering
//! layer knows. Behaviors ask a `Measure` after writing content and a
//! provisional position.

use super::document::Document;
use super::geometry::Size;
use super::node::NodeId;
use std::fmt::Debug;

/// Reports the rendered size of an element.
pub trait Measure: Debug {
    /// Size of `node` as currently rendered.
    fn measure(&self, doc: &Document, node: NodeId) -> Size;
}

/// Always reports the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure(pub Size);

impl Measure for FixedMeasure {
    fn measure(&self, _doc: &Document, _node: NodeId) -> Size {
        self.0
    }
}

/// Estimates size from text.
///
/// Each non-empty text node wraps at `max_width` minus padding. Width is
/// the longest unwrapped line times `char_width` plus horizontal padding,
/// capped at `max_width`. Height is the wrapped line count times
/// `line_height` plus vertical padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasure {
    /// Average glyph advance.
    pub char_width: f64,
    /// Line box height.
    pub line_height: f64,
    /// Padding on each side.
    pub padding: f64,
    /// Width cap.
    pub max_width: f64,
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 18.0,
            padding: 8.0,
            max_width: 320.0,
        }
    }
}

impl TextMeasure {
    /// Lines a run of `chars` characters occupies once wrapped.
    fn wrapped_lines(&self, chars: usize) -> usize {
        let available = self.max_width - 2.0 * self.padding;
        if available <= 0.0 || self.char_width <= 0.0 {
            return 1;
        }
        let lines = (chars as f64 * self.char_width / available).ceil() as usize;
        lines.max(1)
    }
}

impl Measure for TextMeasure {
    fn measure(&self, doc: &Document, node: NodeId) -> Size {
        let lines: Vec<usize> = std::iter::once(node)
            .chain(doc.descendants(node))
            .map(|n| doc.text(n).chars().count())
            .filter(|len| *len > 0)
            .collect();

        let longest = lines.iter().copied().max().unwrap_or(0) as f64;
        let width = (longest * self.char_width + 2.0 * self.padding).min(self.max_width);
        let line_count: usize = lines.iter().map(|len| self.wrapped_lines(*len)).sum();
        let height = line_count as f64 * self.line_height + 2.0 * self.padding;
        Size::new(width, height)
    }
}
