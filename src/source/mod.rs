//! Page fixtures and event scripts.
//!
//! The binary drives a [`Page`](crate::page::Page) from two JSON files: a
//! page fixture describing the server-rendered markup and an optional
//! script of input events to replay against it.

pub mod script;

pub use script::{apply_script, ScriptStep};

use crate::model::{PageMarkup, SelectorError};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load or replay a fixture.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file does not exist.
    #[error("File not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A script step addresses its target with malformed selector text.
    #[error("Invalid target selector: {0}")]
    Selector(#[from] SelectorError),

    /// A script step's selector matched no element.
    #[error("No element matches {selector}")]
    UnknownTarget {
        /// The selector text.
        selector: String,
    },

    /// A key step names a key that has no binding.
    #[error("Unknown key name: {key}")]
    UnknownKey {
        /// The key name as written.
        key: String,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a page fixture.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] for a missing file, [`SourceError::Io`]
/// when it cannot be read and [`SourceError::Json`] when it does not
/// describe a page.
pub fn load_page(path: &Path) -> Result<PageMarkup, SourceError> {
    load_json(path)
}

/// Load an event script: a JSON array of [`ScriptStep`]s.
///
/// # Errors
///
/// Same as [`load_page`].
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, SourceError> {
    load_json(path)
}
