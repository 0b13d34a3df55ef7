use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No local content available for {0}")]
    MissingContent(String),

    #[error("Failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload failed with status: {0}")]
    Status(u16),

    #[error("Failed to parse upload response: {0}")]
    InvalidResponse(String),

    #[error("No Filestack API key configured")]
    MissingApiKey,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown upload mode '{0}', expected 'local' or 'cloud'")]
    UnknownMode(String),
}
