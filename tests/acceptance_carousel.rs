//! Acceptance tests for the recent-items carousel on the home page fixture.

mod acceptance_harness;

use acceptance_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

const HOME_FIXTURE: &str = "tests/fixtures/home.json";

fn home() -> AcceptanceTestHarness {
    AcceptanceTestHarness::from_fixture(HOME_FIXTURE).expect("Should load home fixture")
}

fn current(harness: &AcceptanceTestHarness) -> usize {
    harness.page().carousels()[0].current()
}

fn scroll(harness: &AcceptanceTestHarness) -> f64 {
    harness.doc().scroll_left(harness.id("recent-viewport"))
}

#[test]
fn attach_shows_first_slide_with_labels() {
    let harness = home();

    assert_eq!(current(&harness), 0);
    assert_eq!(scroll(&harness), 0.0);
    assert_eq!(harness.attr("recent-viewport", "role").as_deref(), Some("region"));
    assert_eq!(
        harness.attr("recent-viewport", "aria-label").as_deref(),
        Some("Image carousel")
    );
    assert_eq!(harness.attr("recent-viewport", "tabindex").as_deref(), Some("0"));
    assert_eq!(harness.attr("recent-prev", "type").as_deref(), Some("button"));
    assert_eq!(
        harness.attr("recent-next", "aria-label").as_deref(),
        Some("Next slide, 1 of 3")
    );
    assert_eq!(harness.attr("recent-slide-0", "aria-hidden").as_deref(), Some("false"));
    assert_eq!(harness.attr("recent-slide-1", "aria-hidden").as_deref(), Some("true"));
    assert_eq!(harness.attr("recent-slide-1", "tabindex").as_deref(), Some("-1"));
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut harness = home();

    let outcome = harness.click("recent-prev");

    assert!(outcome.default_prevented);
    assert_eq!(current(&harness), 2);
    assert_eq!(scroll(&harness), 2000.0);
    assert_eq!(
        harness.attr("recent-prev", "aria-label").as_deref(),
        Some("Previous slide, 3 of 3")
    );
}

#[test]
fn next_three_times_returns_to_start() {
    let mut harness = home();
    for _ in 0..3 {
        harness.click("recent-next");
    }
    assert_eq!(current(&harness), 0);
    assert_eq!(scroll(&harness), 0.0);
}

#[test]
fn arrow_keys_navigate_inside_viewport() {
    let mut harness = home();

    let outcome = harness.key("recent-viewport", KeyCode::Right);
    assert!(outcome.default_prevented);
    assert_eq!(current(&harness), 1);
    assert_eq!(scroll(&harness), 1000.0);

    harness.key("recent-slide-1", KeyCode::Left);
    assert_eq!(current(&harness), 0);
}

#[test]
fn arrow_keys_outside_viewport_are_ignored() {
    let mut harness = home();
    let outcome = harness.key("recent-next", KeyCode::Right);
    assert!(!outcome.default_prevented);
    assert_eq!(current(&harness), 0);
}

#[test]
fn exactly_one_slide_exposed_after_navigation() {
    let mut harness = home();
    harness.click("recent-next");
    harness.click("recent-next");

    let exposed: Vec<String> = (0..3)
        .map(|i| format!("recent-slide-{i}"))
        .filter(|id| harness.attr(id, "aria-hidden").as_deref() == Some("false"))
        .collect();
    assert_eq!(exposed, vec!["recent-slide-2".to_string()]);
    assert_eq!(harness.attr("recent-slide-2", "tabindex").as_deref(), Some("0"));
}
