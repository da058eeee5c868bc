//! Screen geometry and floating-element placement.
//!
//! All coordinates are CSS pixels relative to the top-left corner of the
//! viewport. Placement is a pure computation; the caller writes the result
//! back into the tree.

use serde::{Deserialize, Serialize};

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Layout box of an element, as reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    /// Create a rect from its origin and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size of the rect.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fixed distances used when placing a cursor-following element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Vertical gap between the cursor and the element.
    pub offset_y: f64,
    /// Minimum distance kept from every viewport edge.
    pub margin: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            offset_y: 16.0,
            margin: 12.0,
        }
    }
}

/// Final position of a floating element.
///
/// `left` is the horizontal anchor: the element is centered on it.
/// `top` is the element's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Horizontal anchor (element center).
    pub left: f64,
    /// Top edge.
    pub top: f64,
}

/// First-pass placement used before the element has been measured.
///
/// Centers the element on the cursor and puts it `offset_y` below.
pub fn provisional_placement(cursor: Point, params: PlacementParams) -> Placement {
    Placement {
        left: cursor.x,
        top: cursor.y + params.offset_y,
    }
}

/// Second-pass placement once the rendered size is known.
///
/// The anchor is clamped into `[w/2 + margin, viewport_width - w/2 - margin]`.
/// The lower bound is applied first, so an element wider than the viewport
/// ends up pinned to the upper bound. When the box would cross the bottom
/// margin it flips above the cursor.
pub fn clamp_placement(
    cursor: Point,
    size: Size,
    viewport: Size,
    params: PlacementParams,
) -> Placement {
    let half = size.width / 2.0;
    let min_left = half + params.margin;
    let max_left = viewport.width - half - params.margin;

    let mut left = cursor.x;
    if left < min_left {
        left = min_left;
    }
    if left > max_left {
        left = max_left;
    }

    let provisional = provisional_placement(cursor, params);
    let bottom = provisional.top + size.height;
    let top = if bottom > viewport.height - params.margin {
        cursor.y - size.height - params.offset_y
    } else {
        provisional.top
    };

    Placement { left, top }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    fn params() -> PlacementParams {
        PlacementParams::default()
    }

    #[test]
    fn provisional_centers_on_cursor_below_offset() {
        let placement = provisional_placement(Point::new(300.0, 200.0), params());
        assert_eq!(placement.left, 300.0);
        assert_eq!(placement.top, 216.0);
    }

    #[test]
    fn clamps_near_left_edge() {
        let placement = clamp_placement(
            Point::new(5.0, 100.0),
            Size::new(200.0, 40.0),
            VIEWPORT,
            params(),
        );
        assert!(placement.left >= 112.0, "got {}", placement.left);
        assert_eq!(placement.left, 112.0);
    }

    #[test]
    fn clamps_near_right_edge() {
        let placement = clamp_placement(
            Point::new(995.0, 100.0),
            Size::new(200.0, 40.0),
            VIEWPORT,
            params(),
        );
        assert!(placement.left <= 888.0, "got {}", placement.left);
        assert_eq!(placement.left, 888.0);
    }

    #[test]
    fn leaves_centered_cursor_alone() {
        let placement = clamp_placement(
            Point::new(500.0, 100.0),
            Size::new(200.0, 40.0),
            VIEWPORT,
            params(),
        );
        assert_eq!(placement, Placement { left: 500.0, top: 116.0 });
    }

    #[test]
    fn flips_above_cursor_near_bottom() {
        let cursor = Point::new(500.0, 760.0);
        let placement = clamp_placement(cursor, Size::new(200.0, 60.0), VIEWPORT, params());
        assert!(placement.top < cursor.y);
        assert_eq!(placement.top, 760.0 - 60.0 - 16.0);
    }

    #[test]
    fn bottom_exactly_at_margin_does_not_flip() {
        // 700 + 16 + 72 = 788 = 800 - 12
        let placement = clamp_placement(
            Point::new(500.0, 700.0),
            Size::new(100.0, 72.0),
            VIEWPORT,
            params(),
        );
        assert_eq!(placement.top, 716.0);
    }

    #[test]
    fn wider_than_viewport_pins_to_upper_bound() {
        let placement = clamp_placement(
            Point::new(50.0, 10.0),
            Size::new(1200.0, 20.0),
            VIEWPORT,
            params(),
        );
        assert_eq!(placement.left, 1000.0 - 600.0 - 12.0);
    }
}
