//! Photo upload box of the report form.
//!
//! Handles drag and drop, file validation, the inline preview and a guard
//! against double submission. The whole controller is skipped unless the
//! form, the upload box and the file input are all present.

use super::{aria_bool, EventContext};
use crate::model::{
    Document, EventKind, FileMeta, HostRequest, NodeId, Selector, SimpleSelector,
    UiEvent,
};
use thiserror::Error;
use tracing::{debug, info};

const DRAG_CLASS: &str = "dragover";
const HAS_IMAGE_CLASS: &str = "has-image";

/// Why a selected file was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    /// The MIME type is not an accepted image type.
    #[error("Please select a valid image file (JPG, PNG, GIF, or WEBP)")]
    UnsupportedType {
        /// MIME type of the refused file.
        mime: String,
    },
    /// The file is larger than the limit.
    #[error("Image file size cannot exceed {}MB", mebibytes(.max_bytes))]
    TooLarge {
        /// Size of the refused file in bytes.
        size: u64,
        /// The limit in bytes.
        max_bytes: u64,
    },
}

fn mebibytes(bytes: &u64) -> u64 {
    bytes / (1024 * 1024)
}

/// Check a file against the accepted types and the size limit.
///
/// The type is checked first, so an oversized file of the wrong type is
/// reported as a type problem.
pub fn validate_file(
    file: &FileMeta,
    accepted_types: &[String],
    max_bytes: u64,
) -> Result<(), UploadRejection> {
    if !accepted_types.iter().any(|t| *t == file.mime) {
        return Err(UploadRejection::UnsupportedType {
            mime: file.mime.clone(),
        });
    }
    if file.size > max_bytes {
        return Err(UploadRejection::TooLarge {
            size: file.size,
            max_bytes,
        });
    }
    Ok(())
}

/// State of the report form's upload box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreview {
    form: NodeId,
    upload_box: NodeId,
    input: NodeId,
    preview: Option<NodeId>,
    remove_button: Option<NodeId>,
    empty_state: Option<NodeId>,
    submit_button: Option<NodeId>,
    submit_text: Option<NodeId>,
    accepted_types: Vec<String>,
    max_bytes: u64,
    selected: Option<FileMeta>,
    is_submitting: bool,
}

impl UploadPreview {
    /// Bind to the report form under `scope`, if it is complete enough.
    pub fn attach(
        doc: &Document,
        scope: NodeId,
        accepted_types: Vec<String>,
        max_bytes: u64,
    ) -> Option<Self> {
        let find = |id: &str| doc.query_inclusive(scope, &Selector::id(id));
        let (Some(form), Some(upload_box), Some(input)) =
            (find("reportForm"), find("uploadBox"), find("photoInput"))
        else {
            return None;
        };

        info!(%form, "report form upload attached");
        Some(Self {
            form,
            upload_box,
            input,
            preview: find("previewImage"),
            remove_button: find("removeImageBtn"),
            empty_state: find("uploadEmpty"),
            submit_button: find("submitBtn"),
            submit_text: find("submitText"),
            accepted_types,
            max_bytes,
            selected: None,
            is_submitting: false,
        })
    }

    /// The accepted file currently previewed.
    pub fn selected(&self) -> Option<&FileMeta> {
        self.selected.as_ref()
    }

    /// Whether the form has been submitted once.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Handle events on the form, the box and the input.
    pub fn handle_event(&mut self, cx: &mut EventContext<'_>, event: &UiEvent) {
        let target = event.target;
        let in_box = cx.document.contains(self.upload_box, target);
        match &event.kind {
            EventKind::DragOver if in_box => {
                cx.outcome.prevent_default();
                cx.document.add_class(self.upload_box, DRAG_CLASS);
            }
            EventKind::DragLeave if in_box => {
                cx.document.remove_class(self.upload_box, DRAG_CLASS);
            }
            EventKind::Drop { files } if in_box => {
                cx.outcome.prevent_default();
                cx.document.remove_class(self.upload_box, DRAG_CLASS);
                if let Some(file) = files.first() {
                    self.select(cx, file);
                }
            }
            EventKind::Change { files } if target == self.input => {
                if let Some(file) = files.first() {
                    self.select(cx, file);
                }
            }
            EventKind::Click => self.handle_click(cx, target, in_box),
            EventKind::Submit { valid } if target == self.form => {
                self.handle_submit(cx, *valid);
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, cx: &mut EventContext<'_>, target: NodeId, in_box: bool) {
        let doc = &*cx.document;
        let on_remove = self
            .remove_button
            .is_some_and(|button| doc.contains(button, target));
        if on_remove {
            cx.outcome.prevent_default();
            cx.outcome.stop_propagation();
            self.clear(cx.document);
            return;
        }

        let excluded = doc
            .closest(
                target,
                &Selector::tag("button").and(SimpleSelector::Attr {
                    name: "type".to_string(),
                    value: Some("submit".to_string()),
                }),
            )
            .is_some()
            || doc
                .closest(target, &Selector::class("report-form-actions"))
                .is_some();
        if in_box && !excluded {
            cx.requests.push(HostRequest::OpenFilePicker(self.input));
        }
    }

    fn handle_submit(&mut self, cx: &mut EventContext<'_>, valid: bool) {
        if self.is_submitting {
            cx.outcome.prevent_default();
            debug!("duplicate submission blocked");
            return;
        }
        if !valid {
            return;
        }

        self.is_submitting = true;
        if let Some(button) = self.submit_button {
            cx.document.set_attribute(button, "disabled", "");
            cx.document.set_attribute(button, "aria-disabled", aria_bool(true));
        }
        if let Some(text) = self.submit_text {
            cx.document.set_text(text, "Submitting...");
        }
        info!("report form submitting");
    }

    fn select(&mut self, cx: &mut EventContext<'_>, file: &FileMeta) {
        if let Err(rejection) = validate_file(file, &self.accepted_types, self.max_bytes) {
            debug!(name = %file.name, %rejection, "upload rejected");
            self.clear(cx.document);
            cx.requests.push(HostRequest::Alert(rejection.to_string()));
            return;
        }

        let doc = &mut *cx.document;
        if let Some(preview) = self.preview {
            doc.set_attribute(
                preview,
                "src",
                format!("data:{};name={}", file.mime, file.name),
            );
            doc.set_style(preview, "display", "block");
        }
        if let Some(button) = self.remove_button {
            doc.set_style(button, "display", "inline-block");
        }
        if let Some(empty) = self.empty_state {
            doc.set_style(empty, "display", "none");
        }
        doc.add_class(self.upload_box, HAS_IMAGE_CLASS);
        debug!(name = %file.name, size = file.size, "upload previewed");
        self.selected = Some(file.clone());
    }

    fn clear(&mut self, doc: &mut Document) {
        self.selected = None;
        doc.remove_attribute(self.input, "value");
        if let Some(preview) = self.preview {
            doc.set_attribute(preview, "src", "");
            doc.set_style(preview, "display", "none");
        }
        if let Some(button) = self.remove_button {
            doc.set_style(button, "display", "none");
        }
        if let Some(empty) = self.empty_state {
            doc.set_style(empty, "display", "flex");
        }
        doc.remove_class(self.upload_box, HAS_IMAGE_CLASS);
        debug!("upload cleared");
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
