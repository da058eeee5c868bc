//! Error types for lfui.
//!
//! Behaviors themselves never fail: markup that lacks an expected hook is
//! skipped, not reported. Errors exist only at the edges where the crate
//! touches the outside world: configuration files, page fixtures, selector
//! text supplied by a user, and tracing setup.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`ConfigError`] - Config file could not be read or parsed
//!   - [`SourceError`] - Page fixture or event script could not be loaded
//!   - [`SelectorError`] - Selector text is malformed
//!   - [`LoggingError`] - Tracing subscriber could not be installed

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::selector::SelectorError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error encompassing every fallible edge.
///
/// # Examples
///
/// ```
/// use lfui::model::{AppError, Selector};
///
/// fn scope(text: &str) -> Result<Selector, AppError> {
///     Ok(Selector::parse(text)?)
/// }
///
/// assert!(scope(".main").is_ok());
/// assert!(matches!(scope(""), Err(AppError::Selector(_))));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Page fixture or event script could not be loaded.
    #[error("Input error: {0}")]
    Source(#[from] SourceError),

    /// A selector given on the command line or in config is malformed.
    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}
