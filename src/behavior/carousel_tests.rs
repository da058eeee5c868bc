//! Tests for the slider controller.

use super::*;
use crate::model::{Markup, UiEvent};
use crate::page::Page;
use crate::test_harness::{by_id, carousel_markup, page_with};
use crossterm::event::KeyCode;

fn five() -> NonZeroUsize {
    NonZeroUsize::new(5).unwrap()
}

fn slider_page(count: usize) -> Page {
    page_with(carousel_markup(count))
}

fn id(page: &Page, id: &str) -> NodeId {
    by_id(page.document(), id)
}

fn controller(page: &Page) -> &CarouselController {
    &page.carousels()[0]
}

fn assert_only_current(page: &Page, current: usize) {
    let doc = page.document();
    for (i, slide) in controller(page).slides().iter().enumerate() {
        let (hidden, tabindex) = if i == current { ("false", "0") } else { ("true", "-1") };
        assert_eq!(doc.attribute(*slide, "aria-hidden"), Some(hidden), "slide {i}");
        assert_eq!(doc.attribute(*slide, "tabindex"), Some(tabindex), "slide {i}");
    }
}

// ===== normalize_index =====

#[test]
fn normalize_matches_documented_examples() {
    assert_eq!(normalize_index(0, five()), 0);
    assert_eq!(normalize_index(-1, five()), 4);
    assert_eq!(normalize_index(5, five()), 0);
    assert_eq!(normalize_index(-7, NonZeroUsize::new(3).unwrap()), 2);
}

#[test]
fn normalize_single_slide_is_always_zero() {
    let one = NonZeroUsize::new(1).unwrap();
    for k in [-3, -1, 0, 1, 99] {
        assert_eq!(normalize_index(k, one), 0);
    }
}

// ===== Attach =====

#[test]
fn attach_shows_first_slide_and_labels_region() {
    let page = slider_page(5);
    let doc = page.document();
    let viewport = id(&page, "viewport");

    assert_eq!(controller(&page).current(), 0);
    assert_only_current(&page, 0);
    assert_eq!(doc.attribute(viewport, "role"), Some("region"));
    assert_eq!(doc.attribute(viewport, "aria-label"), Some("Image carousel"));
    assert_eq!(doc.attribute(viewport, "tabindex"), Some("0"));
    assert_eq!(doc.attribute(id(&page, "prev"), "type"), Some("button"));
    assert_eq!(
        doc.attribute(id(&page, "prev"), "aria-label"),
        Some("Previous slide, 1 of 5")
    );
    assert_eq!(
        doc.attribute(id(&page, "next"), "aria-label"),
        Some("Next slide, 1 of 5")
    );
    assert_eq!(doc.scroll_left(viewport), 0.0);
}

#[test]
fn attach_skips_slider_without_slides() {
    let page = slider_page(0);
    assert!(page.carousels().is_empty());
    assert_eq!(
        page.document().attribute(id(&page, "viewport"), "role"),
        None,
        "skipped slider must stay untouched"
    );
}

#[test]
fn attach_skips_slider_without_viewport_but_keeps_others() {
    let page = page_with(
        Markup::new("body").children([
            Markup::new("div")
                .attr("data-lf-slider", "")
                .child(Markup::new("div").attr("data-lf-slide", "")),
            carousel_markup(2).children.remove(0),
        ]),
    );
    assert_eq!(page.carousels().len(), 1);
    assert_eq!(page.carousels()[0].slides().len(), 2);
}

#[test]
fn slider_without_buttons_still_attaches() {
    let page = page_with(
        Markup::new("body").child(
            Markup::new("div").attr("data-lf-slider", "").child(
                Markup::new("div")
                    .class("lf-slider-viewport")
                    .id("viewport")
                    .children([
                        Markup::new("div").attr("data-lf-slide", ""),
                        Markup::new("div").attr("data-lf-slide", ""),
                    ]),
            ),
        ),
    );
    assert_eq!(page.carousels().len(), 1);
}

// ===== Navigation =====

#[test]
fn next_click_advances_and_scrolls() {
    let mut page = slider_page(5);
    let outcome = page.dispatch(UiEvent::click(id(&page, "next")));

    assert!(outcome.default_prevented);
    assert_eq!(controller(&page).current(), 1);
    assert_eq!(page.document().scroll_left(id(&page, "viewport")), 600.0);
    assert_only_current(&page, 1);
    assert_eq!(
        page.document().attribute(id(&page, "next"), "aria-label"),
        Some("Next slide, 2 of 5")
    );
}

#[test]
fn prev_from_first_wraps_to_last() {
    let mut page = slider_page(5);
    page.dispatch(UiEvent::click(id(&page, "prev")));

    assert_eq!(controller(&page).current(), 4);
    assert_eq!(page.document().scroll_left(id(&page, "viewport")), 2400.0);
    assert_eq!(
        page.document().attribute(id(&page, "prev"), "aria-label"),
        Some("Previous slide, 5 of 5")
    );
}

#[test]
fn three_nexts_on_three_slides_cycle_back() {
    let mut page = slider_page(3);
    for _ in 0..3 {
        page.dispatch(UiEvent::click(id(&page, "next")));
    }
    assert_eq!(controller(&page).current(), 0);
    assert_only_current(&page, 0);
}

#[test]
fn arrow_keys_in_viewport_navigate() {
    let mut page = slider_page(4);
    let viewport = id(&page, "viewport");

    let outcome = page.dispatch(UiEvent::key(viewport, KeyCode::Right));
    assert!(outcome.default_prevented);
    assert_eq!(controller(&page).current(), 1);

    // Keys from a focused slide bubble through the viewport.
    page.dispatch(UiEvent::key(id(&page, "slide-1"), KeyCode::Left));
    page.dispatch(UiEvent::key(viewport, KeyCode::Left));
    assert_eq!(controller(&page).current(), 3);
}

#[test]
fn arrow_keys_outside_viewport_are_ignored() {
    let mut page = slider_page(4);
    let outcome = page.dispatch(UiEvent::key(id(&page, "next"), KeyCode::Right));
    assert!(!outcome.default_prevented);
    assert_eq!(controller(&page).current(), 0);
}

#[test]
fn other_keys_in_viewport_keep_default() {
    let mut page = slider_page(4);
    let outcome = page.dispatch(UiEvent::key(id(&page, "viewport"), KeyCode::Down));
    assert!(!outcome.default_prevented);
}

#[test]
fn go_to_is_idempotent_for_same_normalized_index() {
    let mut page = slider_page(5);
    page.carousel_go_to(0, 7);
    let first = page.document().dump();
    page.carousel_go_to(0, 2);
    page.carousel_go_to(0, -3);
    assert_eq!(page.document().dump(), first);
    assert_eq!(controller(&page).current(), 2);
}

#[test]
fn scroll_offset_is_relative_to_viewport() {
    let mut page = slider_page(3);
    let viewport = id(&page, "viewport");
    page.document_mut()
        .set_layout(viewport, crate::model::Rect::new(40.0, 0.0, 600.0, 400.0));
    page.carousel_go_to(0, 2);
    assert_eq!(page.document().scroll_left(viewport), 1300.0 - 40.0);
}
