//! Behaviors attached to page markup.
//!
//! Each behavior is attached once against a scope element and then fed
//! events by [`Page`](crate::page::Page). Behaviors never call each other;
//! they only read and write the [`Document`].
//!
//! Markup that lacks an expected hook is never an error. The affected
//! instance is skipped and every other instance keeps working.

pub mod carousel;
pub mod claim_form;
pub mod disclosure;
pub mod focus_visible;
pub mod notices;
pub mod tagline;
pub mod tooltip;
pub mod upload;
pub mod validation;

pub use carousel::{normalize_index, CarouselController};
pub use claim_form::{ClaimFormSwitcher, RequestMode};
pub use disclosure::{DisclosureGroup, DisclosureStateMachine, MobileMenu};
pub use focus_visible::FocusVisibleDetector;
pub use notices::NoticeTimer;
pub use tooltip::{TooltipContent, TooltipEngine};
pub use upload::{validate_file, UploadPreview, UploadRejection};
pub use validation::ValidationFeedback;

use crate::config::KeyBindings;
use crate::model::{DispatchOutcome, Document, HostRequest};
use crate::page::Scheduler;

/// Everything a handler may touch while processing one event.
#[derive(Debug)]
pub struct EventContext<'a> {
    /// The tree being enhanced.
    pub document: &'a mut Document,
    /// Deferred work queue.
    pub scheduler: &'a mut Scheduler,
    /// Key intent lookup.
    pub keys: &'a KeyBindings,
    /// Default-action and propagation flags of the current event.
    pub outcome: &'a mut DispatchOutcome,
    /// Side effects for the host.
    pub requests: &'a mut Vec<HostRequest>,
}

/// Serialize a boolean the way ARIA state attributes expect.
pub(crate) fn aria_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
