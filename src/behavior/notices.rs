//! Auto-dismissing notices.
//!
//! Flash alerts and the post-login welcome banner stay for a while, fade
//! out, then leave the tree. Both steps run as scheduled tasks.

use crate::model::{Document, NodeId, Selector};
use crate::page::{Scheduler, Task};
use tracing::debug;

const WELCOME_ID: &str = "welcome-message";

/// Timing of notice dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTimer {
    dismiss_after_ms: u64,
    fade_ms: u64,
}

impl NoticeTimer {
    /// Create a timer that starts fading after `dismiss_after_ms` and removes
    /// the notice `fade_ms` later.
    pub fn new(dismiss_after_ms: u64, fade_ms: u64) -> Self {
        Self {
            dismiss_after_ms,
            fade_ms,
        }
    }

    /// Schedule dismissal of every transient notice under `scope`.
    ///
    /// `.alert` elements marked `.static-alert` stay. The welcome banner is
    /// revealed and scheduled only when the page was reached with
    /// `login=1`. Returns how many notices were scheduled.
    pub fn attach(&self, doc: &mut Document, scheduler: &mut Scheduler, scope: NodeId) -> usize {
        let alerts: Vec<NodeId> = doc
            .query_all(scope, &Selector::class("alert"))
            .into_iter()
            .filter(|alert| !doc.has_class(*alert, "static-alert"))
            .collect();
        for notice in &alerts {
            scheduler.schedule_after(self.dismiss_after_ms, Task::FadeNotice { notice: *notice });
        }
        let mut scheduled = alerts.len();

        if let Some(welcome) = doc.query(scope, &Selector::id(WELCOME_ID)) {
            if doc.query_param("login") == Some("1") {
                doc.set_style(welcome, "display", "block");
                doc.set_attribute(welcome, "role", "status");
                doc.set_attribute(welcome, "aria-live", "polite");
                scheduler.schedule_after(self.dismiss_after_ms, Task::FadeNotice { notice: welcome });
                scheduled += 1;
            }
        }

        if scheduled > 0 {
            debug!(scheduled, "notices scheduled for dismissal");
        }
        scheduled
    }

    /// Start fading `notice` and schedule its removal.
    pub fn fade(&self, doc: &mut Document, scheduler: &mut Scheduler, notice: NodeId) {
        if !doc.is_connected(notice) {
            return;
        }
        doc.set_attribute(notice, "aria-live", "off");
        doc.set_style(notice, "transition", "opacity 0.5s ease");
        doc.set_style(notice, "opacity", "0");
        scheduler.schedule_after(self.fade_ms, Task::RemoveNotice { notice });
        debug!(%notice, "notice fading");
    }

    /// Take a faded notice out of the tree.
    pub fn remove(&self, doc: &mut Document, notice: NodeId) {
        if doc.is_connected(notice) {
            doc.remove(notice);
            debug!(%notice, "notice removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Markup, UiEvent};
    use crate::page::Page;
    use crate::test_harness::{by_id, page_with, viewport};

    fn notices_markup() -> Markup {
        Markup::new("body").children([
            Markup::new("div").class("alert").id("flash").text("Saved"),
            Markup::new("div")
                .class("alert")
                .class("static-alert")
                .id("pinned")
                .text("Read the rules"),
            Markup::new("div").id("welcome-message").text("Welcome back"),
        ])
    }

    fn page_at(location: &str) -> Page {
        let mut doc = crate::model::Document::from_markup(viewport(), &notices_markup());
        doc.set_location(location);
        Page::attach(doc, &crate::config::BehaviorConfig::default())
    }

    #[test]
    fn alert_fades_after_delay_then_leaves() {
        let mut page = page_with(notices_markup());
        let flash = by_id(page.document(), "flash");

        page.advance(4999);
        assert_eq!(page.document().style(flash, "opacity"), None);

        page.advance(1);
        assert_eq!(page.document().style(flash, "opacity"), Some("0"));
        assert_eq!(
            page.document().style(flash, "transition"),
            Some("opacity 0.5s ease")
        );
        assert_eq!(page.document().attribute(flash, "aria-live"), Some("off"));
        assert!(page.document().is_connected(flash));

        page.advance(500);
        assert!(!page.document().is_connected(flash));
    }

    #[test]
    fn static_alert_stays() {
        let mut page = page_with(notices_markup());
        let pinned = by_id(page.document(), "pinned");
        page.advance(60_000);
        assert!(page.document().is_connected(pinned));
        assert_eq!(page.document().style(pinned, "opacity"), None);
    }

    #[test]
    fn welcome_hidden_without_login_flag() {
        let mut page = page_at("/?tab=recent");
        let welcome = by_id(page.document(), "welcome-message");
        assert_eq!(page.document().attribute(welcome, "role"), None);
        assert_eq!(page.document().style(welcome, "display"), None);
        page.advance(60_000);
        assert!(page.document().is_connected(welcome));
    }

    #[test]
    fn welcome_shown_after_login_then_dismissed() {
        let mut page = page_at("/?login=1");
        let welcome = by_id(page.document(), "welcome-message");
        assert_eq!(page.document().style(welcome, "display"), Some("block"));
        assert_eq!(page.document().attribute(welcome, "role"), Some("status"));
        assert_eq!(
            page.document().attribute(welcome, "aria-live"),
            Some("polite")
        );

        page.advance(5500);
        assert!(!page.document().is_connected(welcome));
    }

    #[test]
    fn removed_notice_is_ignored_by_pending_tasks() {
        let mut page = page_with(notices_markup());
        let flash = by_id(page.document(), "flash");
        page.document_mut().remove(flash);

        page.advance(6000);
        let body = page.document().body();
        page.dispatch(UiEvent::click(body));
        assert!(!page.document().is_connected(flash));
    }
}
