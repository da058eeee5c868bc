//! Lost-and-found UI behavior layer (lfui)
//!
//! Progressive enhancement for server-rendered lost-and-found pages:
//! dropdown disclosures, image carousels, a hover tooltip and a handful of
//! form and notice helpers, attached to a retained UI tree that a host
//! fills from markup and feeds input events into.
//!
//! The tree lives in [`model`], the behaviors in [`behavior`] and the
//! context object tying them together in [`page`].

pub mod behavior;
pub mod config;
pub mod logging;
pub mod model;
pub mod page;
pub mod source;

#[cfg(test)]
mod test_harness;
