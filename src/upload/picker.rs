//! Cloud storage picker: which files may be picked, and the foreground
//! upload that runs before the completion callback fires.

use crate::upload::cloud::CloudClient;
use crate::upload::types::{ProgressEvent, RemoteFile, UploadableFile};
use glob::Pattern;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// MIME globs (`image/*`) or file extensions (`.docx`).
    pub accept: Vec<String>,
    pub max_files: usize,
    pub upload_in_background: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            accept: ["image/*", "video/*", "application/pdf", ".doc", ".docx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_files: 10,
            upload_in_background: false,
        }
    }
}

impl PickerOptions {
    pub fn accepts(&self, file: &UploadableFile) -> bool {
        let name = file.name.to_lowercase();
        let mime = file.mime_type.to_lowercase();
        self.accept.iter().any(|rule| {
            let rule = rule.to_lowercase();
            if rule.starts_with('.') {
                name.ends_with(&rule)
            } else {
                !mime.is_empty()
                    && Pattern::new(&rule)
                        .map(|p| p.matches(&mime))
                        .unwrap_or(false)
            }
        })
    }

    /// Extensions offered by the native dialog filter.
    pub fn dialog_extensions(&self) -> Vec<&'static str> {
        let mut extensions = Vec::new();
        for rule in &self.accept {
            let group: &[&'static str] = match rule.as_str() {
                "image/*" => &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"],
                "video/*" => &["mp4", "webm", "mov", "mkv", "avi"],
                "application/pdf" => &["pdf"],
                ".doc" => &["doc"],
                ".docx" => &["docx"],
                _ => &[],
            };
            extensions.extend_from_slice(group);
        }
        extensions
    }

    /// Drops files outside the accept list, then keeps at most `max_files`.
    pub fn select(&self, candidates: Vec<UploadableFile>) -> Vec<UploadableFile> {
        let mut selected = Vec::new();
        for file in candidates {
            if !self.accepts(&file) {
                warn!("Picker skipped {}: type not accepted", file.name);
                continue;
            }
            if selected.len() == self.max_files {
                warn!("Picker limit of {} files reached, skipping {}", self.max_files, file.name);
                continue;
            }
            selected.push(file);
        }
        selected
    }
}

/// What the picker hands to its completion callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerResult {
    pub files_uploaded: Vec<RemoteFile>,
    #[serde(default)]
    pub files_failed: Vec<String>,
}

pub struct CloudPicker {
    client: Arc<dyn CloudClient>,
    options: PickerOptions,
}

impl CloudPicker {
    pub fn new(client: Arc<dyn CloudClient>, options: PickerOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Uploads the picked files one after another, then calls `on_upload_done`
    /// with everything that made it.
    pub async fn open<F>(&self, picked: Vec<UploadableFile>, on_upload_done: F)
    where
        F: FnOnce(PickerResult),
    {
        let selected = self.options.select(picked);
        if self.options.upload_in_background {
            info!("Background picker uploads are not supported, uploading in the foreground");
        }

        let mut result = PickerResult::default();
        for file in &selected {
            match self.client.upload(file, Arc::new(|_: ProgressEvent| {})).await {
                Ok(remote) => result.files_uploaded.push(remote),
                Err(e) => {
                    error!("Upload failed for {}: {}", file.name, e);
                    result.files_failed.push(file.name.clone());
                }
            }
        }

        info!(
            "Picker finished: {} uploaded, {} failed",
            result.files_uploaded.len(),
            result.files_failed.len()
        );
        on_upload_done(result);
    }
}
