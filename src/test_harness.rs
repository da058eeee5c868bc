//! Shared markup fixtures and helpers for whitebox tests.

use crate::config::BehaviorConfig;
use crate::model::{Document, Markup, NodeId, Rect, Selector, Size};
use crate::page::Page;

/// Viewport used by every fixture.
pub fn viewport() -> Size {
    Size::new(1000.0, 800.0)
}

/// Resolve an element by id, panicking when the fixture lacks it.
pub fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.query(doc.body(), &Selector::id(id))
        .unwrap_or_else(|| panic!("fixture has no #{id}"))
}

/// Attach every behavior with default settings.
pub fn page_with(body: Markup) -> Page {
    Page::attach(Document::from_markup(viewport(), &body), &BehaviorConfig::default())
}

fn dropdown(name: &str, items: &[&str]) -> Markup {
    Markup::new("li").class("dropdown").id(name).children([
        Markup::new("a")
            .class("dropdown-toggle")
            .id(&format!("{name}-toggle"))
            .attr("href", "#")
            .text(name),
        Markup::new("ul").class("dropdown-menu").id(&format!("{name}-menu")).children(
            items.iter().enumerate().map(|(i, label)| {
                Markup::new("li").child(
                    Markup::new("a")
                        .id(&format!("{name}-item-{i}"))
                        .attr("href", "#")
                        .text(label),
                )
            }),
        ),
    ])
}

/// Navbar with a mobile toggle, three dropdowns and one broken dropdown.
///
/// Ids: `nav-toggle`, `navbarMenu`, `items`, `claims`, `account` (each with
/// `-toggle`, `-menu`, `-item-N`), `broken`, `outside`.
pub fn nav_markup() -> Markup {
    Markup::new("body").children([
        Markup::new("nav").class("navbar").children([
            Markup::new("button").class("navbar-toggle").id("nav-toggle"),
            Markup::new("ul").id("navbarMenu").children([
                dropdown("items", &["Lost", "Found"]),
                dropdown("claims", &["Mine", "Pending"]),
                dropdown("account", &["Profile", "Logout"]),
                Markup::new("li")
                    .class("dropdown")
                    .id("broken")
                    .child(Markup::new("a").class("dropdown-toggle").id("broken-toggle")),
            ]),
        ]),
        Markup::new("main")
            .id("outside")
            .child(Markup::new("p").id("outside-text").text("Recent items")),
    ])
}

/// Slider with `count` slides laid out side by side, 600px wide, in a
/// viewport that starts at x = 100.
///
/// Ids: `slider`, `prev`, `next`, `viewport`, `slide-N`, `slide-N-img`.
pub fn carousel_markup(count: usize) -> Markup {
    Markup::new("body").child(
        Markup::new("div").attr("data-lf-slider", "").id("slider").children([
            Markup::new("button").attr("data-lf-slider-prev", "").id("prev"),
            Markup::new("div")
                .class("lf-slider-viewport")
                .id("viewport")
                .rect(Rect::new(100.0, 50.0, 600.0, 400.0))
                .children((0..count).map(|i| {
                    Markup::new("figure")
                        .attr("data-lf-slide", "")
                        .id(&format!("slide-{i}"))
                        .rect(Rect::new(100.0 + 600.0 * i as f64, 50.0, 600.0, 400.0))
                        .child(Markup::new("img").id(&format!("slide-{i}-img")))
                })),
            Markup::new("button").attr("data-lf-slider-next", "").id("next"),
        ]),
    )
}

/// Item cards flagged as tooltip sources.
///
/// `card-full` has every field, `card-partial` only title and category,
/// `card-empty` has no data fields. Each card wraps a nested `-body` span.
pub fn tooltip_markup() -> Markup {
    let card = |id: &str, fields: &[(&str, &str)]| {
        let mut markup = Markup::new("article")
            .class("item-card")
            .id(id)
            .attr("data-lf-tooltip", "")
            .child(
                Markup::new("div")
                    .id(&format!("{id}-body"))
                    .child(Markup::new("span").id(&format!("{id}-label")).text("Item")),
            );
        for (name, value) in fields {
            markup = markup.attr(name, value);
        }
        markup
    };

    Markup::new("body").children([
        Markup::new("section").id("grid").children([
            card(
                "card-full",
                &[
                    ("data-title", "Blue umbrella"),
                    ("data-date-found", "2024-05-02"),
                    ("data-category", "Accessories"),
                    ("data-location", "Library"),
                ],
            ),
            card(
                "card-partial",
                &[("data-title", "Water bottle"), ("data-category", "Drinkware")],
            ),
            card("card-empty", &[]),
        ]),
        Markup::new("footer").id("footer"),
    ])
}
