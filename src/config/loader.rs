//! Configuration file loading with precedence handling.

use super::{
    DEFAULT_ACCEPTED_TYPES, DEFAULT_DISMISS_AFTER_MS, DEFAULT_FADE_MS, DEFAULT_MAX_UPLOAD_BYTES,
};
use crate::model::{PlacementParams, TextMeasure};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/lfui/config.toml`.
///
/// ```toml
/// scope = "#main"
///
/// [tooltip]
/// margin = 12.0
/// offset_y = 16.0
///
/// [notices]
/// dismiss_after_ms = 5000
///
/// [upload]
/// max_bytes = 5242880
/// accepted_types = ["image/png"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Selector of the container scoped behaviors attach to.
    #[serde(default)]
    pub scope: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Tooltip placement and text metrics.
    #[serde(default)]
    pub tooltip: Option<TooltipSection>,

    /// Notice auto-dismiss timing.
    #[serde(default)]
    pub notices: Option<NoticesSection>,

    /// Upload validation limits.
    #[serde(default)]
    pub upload: Option<UploadSection>,
}

/// `[tooltip]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TooltipSection {
    /// Distance kept from viewport edges.
    #[serde(default)]
    pub margin: Option<f64>,
    /// Gap between cursor and tooltip.
    #[serde(default)]
    pub offset_y: Option<f64>,
    /// Average glyph advance.
    #[serde(default)]
    pub char_width: Option<f64>,
    /// Line box height.
    #[serde(default)]
    pub line_height: Option<f64>,
    /// Padding on each side.
    #[serde(default)]
    pub padding: Option<f64>,
    /// Width cap.
    #[serde(default)]
    pub max_width: Option<f64>,
}

/// `[notices]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NoticesSection {
    /// Delay before fading starts.
    #[serde(default)]
    pub dismiss_after_ms: Option<u64>,
    /// Fade duration.
    #[serde(default)]
    pub fade_ms: Option<u64>,
}

/// `[upload]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UploadSection {
    /// Largest accepted file in bytes.
    #[serde(default)]
    pub max_bytes: Option<u64>,
    /// Accepted MIME types.
    #[serde(default)]
    pub accepted_types: Option<Vec<String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Scope selector text.
    pub scope: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Tooltip edge margin.
    pub tooltip_margin: f64,
    /// Tooltip cursor gap.
    pub tooltip_offset_y: f64,
    /// Tooltip glyph advance.
    pub tooltip_char_width: f64,
    /// Tooltip line height.
    pub tooltip_line_height: f64,
    /// Tooltip padding.
    pub tooltip_padding: f64,
    /// Tooltip width cap.
    pub tooltip_max_width: f64,
    /// Notice visible time.
    pub notice_dismiss_after_ms: u64,
    /// Notice fade time.
    pub notice_fade_ms: u64,
    /// Upload size limit.
    pub max_upload_bytes: u64,
    /// Accepted upload MIME types.
    pub accepted_types: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let placement = PlacementParams::default();
        let measure = TextMeasure::default();
        Self {
            scope: None,
            log_file_path: default_log_path(),
            tooltip_margin: placement.margin,
            tooltip_offset_y: placement.offset_y,
            tooltip_char_width: measure.char_width,
            tooltip_line_height: measure.line_height,
            tooltip_padding: measure.padding,
            tooltip_max_width: measure.max_width,
            notice_dismiss_after_ms: DEFAULT_DISMISS_AFTER_MS,
            notice_fade_ms: DEFAULT_FADE_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_types: DEFAULT_ACCEPTED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/lfui/lfui.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("lfui").join("lfui.log")
    } else {
        PathBuf::from("lfui.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/lfui/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lfui").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LFUI_CONFIG` environment variable
/// 3. Default path `~/.config/lfui/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("LFUI_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LFUI_SCOPE`: Override scope selector (empty value clears it)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(scope) = std::env::var("LFUI_SCOPE") {
        config.scope = (!scope.trim().is_empty()).then_some(scope);
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let tooltip = config.tooltip.unwrap_or_default();
    let notices = config.notices.unwrap_or_default();
    let upload = config.upload.unwrap_or_default();

    ResolvedConfig {
        scope: config.scope.or(defaults.scope),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        tooltip_margin: tooltip.margin.unwrap_or(defaults.tooltip_margin),
        tooltip_offset_y: tooltip.offset_y.unwrap_or(defaults.tooltip_offset_y),
        tooltip_char_width: tooltip.char_width.unwrap_or(defaults.tooltip_char_width),
        tooltip_line_height: tooltip.line_height.unwrap_or(defaults.tooltip_line_height),
        tooltip_padding: tooltip.padding.unwrap_or(defaults.tooltip_padding),
        tooltip_max_width: tooltip.max_width.unwrap_or(defaults.tooltip_max_width),
        notice_dismiss_after_ms: notices
            .dismiss_after_ms
            .unwrap_or(defaults.notice_dismiss_after_ms),
        notice_fade_ms: notices.fade_ms.unwrap_or(defaults.notice_fade_ms),
        max_upload_bytes: upload.max_bytes.unwrap_or(defaults.max_upload_bytes),
        accepted_types: upload.accepted_types.unwrap_or(defaults.accepted_types),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    scope_override: Option<String>,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(scope) = scope_override {
        config.scope = Some(scope);
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
