//! Element tree, geometry and input types shared by every behavior.

pub mod document;
pub mod error;
pub mod event;
pub mod geometry;
pub mod key_action;
pub mod markup;
pub mod measure;
pub mod node;
pub mod selector;
pub mod style;

pub use document::{Ancestors, Document};
pub use error::AppError;
pub use event::{DispatchOutcome, EventKind, FileMeta, HostRequest, UiEvent};
pub use geometry::{
    clamp_placement, provisional_placement, Placement, PlacementParams, Point, Rect, Size,
};
pub use key_action::KeyIntent;
pub use markup::{Markup, PageMarkup};
pub use measure::{FixedMeasure, Measure, TextMeasure};
pub use node::NodeId;
pub use selector::{Selector, SelectorError, SimpleSelector};
pub use style::{DisplayRule, ShownWhen, StyleSheet};
