//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::{parse_key_name, KeyBindings};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    NoticesSection, ResolvedConfig, TooltipSection, UploadSection,
};

use crate::model::{PlacementParams, Selector, SelectorError, TextMeasure};

/// Image types accepted by the report form upload.
pub const DEFAULT_ACCEPTED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Settings handed to [`Page::attach`](crate::page::Page::attach).
///
/// Everything here is derived from a [`ResolvedConfig`]; the log file path
/// stays behind because behaviors never see it.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Container to attach scoped behaviors to. `None` means the whole body.
    pub scope: Option<Selector>,
    /// Tooltip placement distances.
    pub placement: PlacementParams,
    /// Text metrics used to size the tooltip.
    pub measure: TextMeasure,
    /// Delay before a notice starts fading, in milliseconds.
    pub dismiss_after_ms: u64,
    /// Fade duration before a notice is removed, in milliseconds.
    pub fade_ms: u64,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// Accepted upload MIME types.
    pub accepted_types: Vec<String>,
}

/// Milliseconds a notice stays fully visible.
pub const DEFAULT_DISMISS_AFTER_MS: u64 = 5000;

/// Milliseconds a notice takes to fade out.
pub const DEFAULT_FADE_MS: u64 = 500;

/// Upload size limit: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            scope: None,
            placement: PlacementParams::default(),
            measure: TextMeasure::default(),
            dismiss_after_ms: DEFAULT_DISMISS_AFTER_MS,
            fade_ms: DEFAULT_FADE_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_types: DEFAULT_ACCEPTED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ResolvedConfig {
    /// Extract behavior settings, parsing the scope selector.
    pub fn behavior(&self) -> Result<BehaviorConfig, SelectorError> {
        let scope = self.scope.as_deref().map(Selector::parse).transpose()?;
        Ok(BehaviorConfig {
            scope,
            placement: PlacementParams {
                offset_y: self.tooltip_offset_y,
                margin: self.tooltip_margin,
            },
            measure: TextMeasure {
                char_width: self.tooltip_char_width,
                line_height: self.tooltip_line_height,
                padding: self.tooltip_padding,
                max_width: self.tooltip_max_width,
            },
            dismiss_after_ms: self.notice_dismiss_after_ms,
            fade_ms: self.notice_fade_ms,
            max_upload_bytes: self.max_upload_bytes,
            accepted_types: self.accepted_types.clone(),
        })
    }
}
