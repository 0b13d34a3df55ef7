use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Picked or dropped from disk. `path` is absent for files built in memory.
    Local { path: Option<PathBuf> },
    Cloud { url: String },
}

/// A file selected by the user or returned by the cloud service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadableFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub source: FileSource,
}

impl UploadableFile {
    pub fn local(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            source: FileSource::Local { path: None },
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.source = FileSource::Local { path: Some(path) };
        self
    }

    pub fn url(&self) -> Option<&str> {
        match &self.source {
            FileSource::Cloud { url } => Some(url),
            FileSource::Local { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn is_cloud(&self) -> bool {
        matches!(self.source, FileSource::Cloud { .. })
    }
}

/// File descriptor reported by the cloud service once stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    pub url: String,
    #[serde(default, rename = "type", alias = "mimetype")]
    pub mimetype: Option<String>,
}

impl From<RemoteFile> for UploadableFile {
    fn from(remote: RemoteFile) -> Self {
        Self {
            name: remote.filename,
            size: remote.size,
            mime_type: remote.mimetype.unwrap_or_default(),
            source: FileSource::Cloud { url: remote.url },
        }
    }
}

/// Messages sent from an upload worker back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    BatchStarted { total: usize },
    Progress { percent: f32, text: String },
    FileUploaded(UploadableFile),
    Warning(String),
    BatchFinished,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub loaded: u64,
    pub total: u64,
}

impl ProgressEvent {
    /// Fraction of the transfer done, as a percentage in [0, 100].
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        ((self.loaded as f64 / self.total as f64) * 100.0).clamp(0.0, 100.0) as f32
    }
}
