use crate::error::UploadError;
use crate::upload::progress::ProgressReporter;
use crate::upload::strategy::UploadStrategy;
use crate::upload::types::{FileSource, ProgressEvent, RemoteFile, UploadableFile};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use tracing::{debug, info};

pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

const STORE_URL: &str = "https://www.filestackapi.com/api/store/S3";
const CHUNK_SIZE: usize = 64 * 1024;

/// Remote storage that accepts a file and hands back where it now lives.
#[async_trait]
pub trait CloudClient: Send + Sync {
    async fn upload(
        &self,
        file: &UploadableFile,
        on_progress: ProgressCallback,
    ) -> Result<RemoteFile, UploadError>;
}

#[derive(Clone)]
pub struct FilestackClient {
    api_key: String,
    http: reqwest::Client,
}

impl FilestackClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, UploadError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(UploadError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            http: reqwest::Client::new(),
        })
    }

    async fn read_content(file: &UploadableFile) -> Result<Vec<u8>, UploadError> {
        match &file.source {
            FileSource::Local { path: Some(path) } => {
                tokio::fs::read(path).await.map_err(|source| UploadError::Read {
                    path: path.clone(),
                    source,
                })
            }
            _ => Err(UploadError::MissingContent(file.name.clone())),
        }
    }
}

#[async_trait]
impl CloudClient for FilestackClient {
    async fn upload(
        &self,
        file: &UploadableFile,
        on_progress: ProgressCallback,
    ) -> Result<RemoteFile, UploadError> {
        let content = Self::read_content(file).await?;
        let total = content.len() as u64;
        debug!("Storing {} ({} bytes) on Filestack", file.name, total);

        let chunks: Vec<Vec<u8>> = content.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
        let mut loaded = 0u64;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            loaded += chunk.len() as u64;
            on_progress(ProgressEvent { loaded, total });
            Ok::<_, std::io::Error>(chunk)
        }));

        let content_type = if file.mime_type.is_empty() {
            HeaderValue::from_static("application/octet-stream")
        } else {
            HeaderValue::from_str(&file.mime_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
        };

        let response = self
            .http
            .post(STORE_URL)
            .query(&[("key", self.api_key.as_str()), ("filename", file.name.as_str())])
            .header(CONTENT_TYPE, content_type)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let mut remote = response
            .json::<RemoteFile>()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        if remote.mimetype.is_none() && !file.mime_type.is_empty() {
            remote.mimetype = Some(file.mime_type.clone());
        }

        info!("Stored {} at {}", remote.filename, remote.url);
        Ok(remote)
    }
}

/// Upload strategy that hands every file to a [`CloudClient`].
pub struct CloudUpload {
    client: Arc<dyn CloudClient>,
}

impl CloudUpload {
    pub fn new(client: Arc<dyn CloudClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UploadStrategy for CloudUpload {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn upload_one(
        &self,
        file: &UploadableFile,
        position: usize,
        total: usize,
        reporter: &ProgressReporter,
    ) -> Result<UploadableFile, UploadError> {
        let progress_reporter = reporter.clone();
        let on_progress: ProgressCallback = Arc::new(move |event: ProgressEvent| {
            progress_reporter.report(position, total, event.percent());
        });

        let remote = self.client.upload(file, on_progress).await?;
        reporter.report(position, total, 100.0);

        // The card keeps the local name and size, as picked by the user.
        Ok(UploadableFile {
            name: file.name.clone(),
            size: file.size,
            mime_type: remote.mimetype.unwrap_or_else(|| file.mime_type.clone()),
            source: FileSource::Cloud { url: remote.url },
        })
    }
}
