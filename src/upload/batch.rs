use crate::upload::progress::ProgressReporter;
use crate::upload::strategy::UploadStrategy;
use crate::upload::types::{UploadEvent, UploadableFile};
use crate::upload::validation::{validate_selection, Selection};
use derivative::Derivative;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub const COMPLETE_TEXT: &str = "Upload complete!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSettings {
    pub max_file_size: u64,
    pub tick_interval: Duration,
    /// How long the finished progress bar stays visible.
    pub hide_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size: crate::config::MAX_FILE_SIZE,
            tick_interval: Duration::from_millis(200),
            hide_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub uploaded: usize,
    pub failed: usize,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct BatchUploader {
    #[derivative(Debug(format_with = "fmt_strategy"))]
    strategy: Arc<dyn UploadStrategy>,
    settings: UploadSettings,
}

fn fmt_strategy(
    strategy: &Arc<dyn UploadStrategy>,
    f: &mut std::fmt::Formatter,
) -> std::fmt::Result {
    f.write_str(strategy.name())
}

impl BatchUploader {
    pub fn new(strategy: Arc<dyn UploadStrategy>, settings: UploadSettings) -> Self {
        Self { strategy, settings }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn validate(&self, candidates: Vec<UploadableFile>) -> Selection {
        validate_selection(candidates, self.settings.max_file_size)
    }

    /// Uploads `files` strictly one after another. A failed file is reported
    /// as a warning and the batch moves on.
    pub async fn run_batch(
        &self,
        files: Vec<UploadableFile>,
        events: &Sender<UploadEvent>,
    ) -> BatchSummary {
        let reporter = ProgressReporter::new(events.clone());
        let total = files.len();
        let mut summary = BatchSummary::default();

        info!("Starting {} upload of {} files", self.strategy.name(), total);
        reporter.send(UploadEvent::BatchStarted { total });

        for (index, file) in files.iter().enumerate() {
            let position = index + 1;
            match self.strategy.upload_one(file, position, total, &reporter).await {
                Ok(uploaded) => {
                    summary.uploaded += 1;
                    reporter.send(UploadEvent::FileUploaded(uploaded));
                }
                Err(e) => {
                    error!("Upload failed for {}: {}", file.name, e);
                    summary.failed += 1;
                    reporter.send(UploadEvent::Warning(format!(
                        "Failed to upload {}. Please try again.",
                        file.name
                    )));
                }
            }
        }

        tokio::time::sleep(self.settings.hide_delay).await;
        reporter.send(UploadEvent::Progress {
            percent: 0.0,
            text: COMPLETE_TEXT.to_string(),
        });
        reporter.send(UploadEvent::BatchFinished);

        info!(
            "Batch finished: {} uploaded, {} failed",
            summary.uploaded, summary.failed
        );
        summary
    }

    /// Runs a batch on its own thread with a dedicated runtime, streaming
    /// events back to the UI.
    pub fn spawn_batch(
        &self,
        files: Vec<UploadableFile>,
        events: Sender<UploadEvent>,
    ) -> std::io::Result<std::thread::JoinHandle<BatchSummary>> {
        let uploader = self.clone();
        std::thread::Builder::new()
            .name("upload-batch".to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to start upload runtime: {}", e);
                        events
                            .send(UploadEvent::Warning(format!("Upload could not start: {}", e)))
                            .unwrap_or_default();
                        events.send(UploadEvent::BatchFinished).unwrap_or_default();
                        return BatchSummary::default();
                    }
                };
                rt.block_on(uploader.run_batch(files, &events))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::cloud::tests::FakeCloud;
    use crate::upload::cloud::CloudUpload;
    use crate::upload::progress::ScriptedProgress;
    use crate::upload::strategy::SimulatedUpload;
    use std::sync::mpsc::channel;

    const MB: u64 = 1024 * 1024;

    fn instant_settings() -> UploadSettings {
        UploadSettings {
            tick_interval: Duration::ZERO,
            hide_delay: Duration::ZERO,
            ..UploadSettings::default()
        }
    }

    fn simulated(step: f32) -> BatchUploader {
        BatchUploader::new(
            Arc::new(SimulatedUpload::new(
                Arc::new(ScriptedProgress::constant(step)),
                Duration::ZERO,
            )),
            instant_settings(),
        )
    }

    fn uploaded_names(events: &[UploadEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                UploadEvent::FileUploaded(f) => Some(f.name.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_is_sequential_and_ordered() {
        let uploader = simulated(30.0);
        let (sender, receiver) = channel();
        let files = vec![
            UploadableFile::local("one.txt", 1, ""),
            UploadableFile::local("two.txt", 1, ""),
            UploadableFile::local("three.txt", 1, ""),
        ];

        let summary = uploader.run_batch(files, &sender).await;
        assert_eq!(summary, BatchSummary { uploaded: 3, failed: 0 });

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.first(), Some(&UploadEvent::BatchStarted { total: 3 }));
        assert_eq!(events.last(), Some(&UploadEvent::BatchFinished));
        assert_eq!(uploaded_names(&events), ["one.txt", "two.txt", "three.txt"]);

        // Each file completes before the next one reports progress.
        let mut seen_text = Vec::new();
        for event in &events {
            match event {
                UploadEvent::Progress { text, .. } if text != COMPLETE_TEXT => {
                    seen_text.push(text.clone())
                }
                UploadEvent::FileUploaded(f) => seen_text.push(f.name.clone()),
                _ => {}
            }
        }
        let first_two = seen_text.iter().position(|t| t == "Uploading 2 of 3...").unwrap();
        let one_done = seen_text.iter().position(|t| t == "one.txt").unwrap();
        assert!(one_done < first_two);
    }

    #[tokio::test]
    async fn test_batch_progress_monotonic_then_reset() {
        let uploader = simulated(7.5);
        let (sender, receiver) = channel();
        let files = vec![
            UploadableFile::local("a", 1, ""),
            UploadableFile::local("b", 1, ""),
        ];
        uploader.run_batch(files, &sender).await;

        let progress: Vec<(f32, String)> = receiver
            .try_iter()
            .filter_map(|e| match e {
                UploadEvent::Progress { percent, text } => Some((percent, text)),
                _ => None,
            })
            .collect();

        let (reset, during) = progress.split_last().unwrap();
        assert_eq!(reset, &(0.0, COMPLETE_TEXT.to_string()));
        assert!(during.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(during.iter().all(|(p, _)| (0.0..=100.0).contains(p)));
        assert_eq!(during.last().map(|(p, _)| *p), Some(100.0));
    }

    #[tokio::test]
    async fn test_oversized_file_never_reaches_the_batch() {
        let uploader = simulated(50.0);
        let selection = uploader.validate(vec![
            UploadableFile::local("fifty.bin", 50 * MB, ""),
            UploadableFile::local("one-fifty.bin", 150 * MB, ""),
        ]);
        assert_eq!(selection.warnings.len(), 1);
        assert!(selection.warnings[0].contains("one-fifty.bin"));
        assert!(selection.warnings[0].contains("100MB"));

        let (sender, receiver) = channel();
        uploader.run_batch(selection.accepted, &sender).await;
        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(uploaded_names(&events), ["fifty.bin"]);
    }

    #[tokio::test]
    async fn test_cloud_failure_does_not_stop_batch() {
        let uploader = BatchUploader::new(
            Arc::new(CloudUpload::new(Arc::new(FakeCloud::failing_on(&["b.png"])))),
            instant_settings(),
        );
        let (sender, receiver) = channel();
        let files = vec![
            UploadableFile::local("a.png", 10, "image/png"),
            UploadableFile::local("b.png", 10, "image/png"),
            UploadableFile::local("c.png", 10, "image/png"),
        ];

        let summary = uploader.run_batch(files, &sender).await;
        assert_eq!(summary, BatchSummary { uploaded: 2, failed: 1 });

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(uploaded_names(&events), ["a.png", "c.png"]);
        let warnings: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                UploadEvent::Warning(w) => Some(w.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(warnings, ["Failed to upload b.png. Please try again."]);
    }

    #[test]
    fn test_spawned_batch_reports_back() {
        let uploader = simulated(100.0);
        let (sender, receiver) = channel();
        let handle = uploader
            .spawn_batch(vec![UploadableFile::local("bg.txt", 1, "")], sender)
            .unwrap();
        let summary = handle.join().unwrap();
        assert_eq!(summary.uploaded, 1);
        assert!(receiver.try_iter().any(|e| e == UploadEvent::BatchFinished));
    }

    #[test]
    fn test_debug_names_strategy() {
        let uploader = simulated(10.0);
        assert!(format!("{:?}", uploader).contains("simulated"));
    }
}
