use crate::error::UploadError;
use crate::upload::progress::{ProgressReporter, ProgressSource};
use crate::upload::types::UploadableFile;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How a single file of a batch gets uploaded.
///
/// Implementations report progress through `reporter` and return the file as
/// it should appear in the list once done.
#[async_trait]
pub trait UploadStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn upload_one(
        &self,
        file: &UploadableFile,
        position: usize,
        total: usize,
        reporter: &ProgressReporter,
    ) -> Result<UploadableFile, UploadError>;
}

/// Pretends to upload: advances a local percentage every `tick` until it
/// reaches 100. No data leaves the machine.
pub struct SimulatedUpload {
    source: Arc<dyn ProgressSource>,
    tick: Duration,
}

impl SimulatedUpload {
    pub fn new(source: Arc<dyn ProgressSource>, tick: Duration) -> Self {
        Self { source, tick }
    }
}

#[async_trait]
impl UploadStrategy for SimulatedUpload {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn upload_one(
        &self,
        file: &UploadableFile,
        position: usize,
        total: usize,
        reporter: &ProgressReporter,
    ) -> Result<UploadableFile, UploadError> {
        let mut progress = 0.0f32;
        let mut ticks = 0usize;

        loop {
            tokio::time::sleep(self.tick).await;
            ticks += 1;
            progress += self.source.next_increment().max(0.0);
            let done = progress >= 100.0;
            if done {
                progress = 100.0;
            }
            reporter.report(position, total, progress);
            if done {
                break;
            }
        }

        debug!("Simulated upload of {} finished after {} ticks", file.name, ticks);
        Ok(file.clone())
    }
}
