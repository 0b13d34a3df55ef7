mod card;
mod file_list;
mod state;
mod ui;

use crate::config::{AppConfig, UploadMode};
use crate::error::UploadError;
use crate::upload::{
    BatchUploader, CloudClient, CloudPicker, CloudUpload, FileCollector, FilestackClient,
    RandomProgress, SimulatedUpload, UploadEvent, UploadStrategy, UploadableFile,
};
use crate::utils::color::accent_or_default;
use chrono::{Local, NaiveDate};
use eframe::{egui, App};
use card::CardAction;
use state::{ActionProgress, UploadState};
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct FileDropUploader {
    uploader: BatchUploader,
    picker: Option<Arc<CloudPicker>>,
    collector: FileCollector,
    state: UploadState,
    event_sender: Sender<UploadEvent>,
    accent: egui::Color32,
}

impl FileDropUploader {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Self {
        let settings = config.upload_settings();
        let random: Arc<dyn UploadStrategy> = Arc::new(SimulatedUpload::new(
            Arc::new(RandomProgress),
            settings.tick_interval,
        ));

        let (strategy, picker) = match config.mode {
            UploadMode::Local => (random, None),
            UploadMode::Cloud => match cloud_client(&config) {
                Ok(client) => {
                    let strategy: Arc<dyn UploadStrategy> =
                        Arc::new(CloudUpload::new(client.clone()));
                    let picker = CloudPicker::new(client, config.picker_options());
                    (strategy, Some(Arc::new(picker)))
                }
                Err(e) => {
                    warn!("Cloud mode unavailable ({}), using simulated uploads", e);
                    (random, None)
                }
            },
        };

        let mut app = Self::with_parts(BatchUploader::new(strategy, settings), picker);
        app.accent = accent_or_default(&config.accent_color);
        app
    }

    pub fn with_parts(uploader: BatchUploader, picker: Option<Arc<CloudPicker>>) -> Self {
        info!("Initializing uploader with {} strategy", uploader.strategy_name());
        let (event_sender, event_receiver) = std_mpsc::channel();
        let state = UploadState {
            event_receiver: Some(event_receiver),
            ..UploadState::default()
        };

        Self {
            uploader,
            picker,
            collector: FileCollector::new(),
            state,
            event_sender,
            accent: accent_or_default(""),
        }
    }

    pub fn cloud_enabled(&self) -> bool {
        self.picker.is_some()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Validates a selection and starts a batch with whatever passes.
    /// Returns whether a batch was started.
    pub fn submit_selection(&mut self, candidates: Vec<UploadableFile>) -> bool {
        if candidates.is_empty() {
            return false;
        }
        if self.state.is_uploading() {
            warn!("Ignoring selection of {} files: batch in flight", candidates.len());
            self.state
                .push_warning("An upload is already in progress. Please wait for it to finish.");
            return false;
        }

        let selection = self.uploader.validate(candidates);
        for warning in selection.warnings {
            self.state.push_warning(warning);
        }
        if selection.accepted.is_empty() {
            debug!("Nothing left to upload after validation");
            return false;
        }

        let total = selection.accepted.len();
        self.state.progress = ActionProgress::Uploading {
            total,
            percent: 0.0,
            text: String::new(),
        };

        match self
            .uploader
            .spawn_batch(selection.accepted, self.event_sender.clone())
        {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to spawn upload thread: {}", e);
                self.state.progress = ActionProgress::Idle;
                self.state
                    .push_warning(format!("Upload could not start: {}", e));
                false
            }
        }
    }

    pub fn submit_paths(&mut self, paths: Vec<PathBuf>) {
        let candidates = self.collector.collect(&paths);
        info!("Received {} files from {} paths", candidates.len(), paths.len());
        self.submit_selection(candidates);
    }

    /// Click on the drop zone: native multi-file dialog.
    pub fn browse_local(&mut self) {
        if let Some(paths) = rfd::FileDialog::new().set_title("Select files").pick_files() {
            self.submit_paths(paths);
        }
    }

    pub fn open_external_picker(&mut self) {
        let Some(picker) = self.picker.clone() else {
            return;
        };

        let extensions = picker.options().dialog_extensions();
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Browse Cloud Storage")
            .add_filter("Accepted files", &extensions[..])
            .pick_files()
        else {
            return;
        };

        let picked = self.collector.collect(&paths);
        let sender = self.event_sender.clone();
        let spawned = std::thread::Builder::new()
            .name("cloud-picker".to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to start picker runtime: {}", e);
                        return;
                    }
                };
                rt.block_on(picker.open(picked, |result| {
                    for remote in result.files_uploaded {
                        sender
                            .send(UploadEvent::FileUploaded(remote.into()))
                            .unwrap_or_default();
                    }
                    for name in result.files_failed {
                        sender
                            .send(UploadEvent::Warning(format!(
                                "Failed to upload {}. Please try again.",
                                name
                            )))
                            .unwrap_or_default();
                    }
                }));
            });

        if let Err(e) = spawned {
            error!("Failed to spawn picker thread: {}", e);
            self.state.push_warning(format!("Cloud picker could not start: {}", e));
        }
    }

    pub fn remove_file(&mut self, name: &str) {
        let removed = self.state.file_list.remove_file(name, today());
        info!("Deleted {} card(s) named {}", removed, name);
    }

    pub fn apply_filter(&mut self) {
        self.state.file_list.apply_filter(&self.state.search_query);
    }

    pub fn handle_card_action(&mut self, action: CardAction, ctx: &egui::Context) {
        match action {
            CardAction::Delete(name) => self.remove_file(&name),
            CardAction::View(url) => {
                if let Err(e) = open::that(&url) {
                    error!("Failed to open {}: {}", url, e);
                    self.state.push_warning(format!("Could not open {}", url));
                }
            }
            CardAction::CopyLink(url) => {
                debug!("Copying {} to clipboard", url);
                ctx.output_mut(|o| o.copied_text = url);
            }
        }
    }

    /// Drains worker events. Returns whether anything changed.
    pub fn poll_events(&mut self) -> bool {
        let Some(receiver) = &self.state.event_receiver else {
            return false;
        };
        let events: Vec<UploadEvent> = receiver.try_iter().collect();
        let changed = !events.is_empty();
        let today = today();
        for event in events {
            self.state.apply_event(event, today);
        }
        changed
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.poll_events() {
            ctx.request_repaint();
        }

        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect::<Vec<_>>(),
            )
        });
        self.state.drag_hover = hovering;
        if !dropped.is_empty() {
            self.submit_paths(dropped);
        }

        // Workers report through the channel, so keep polling.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn cloud_client(config: &AppConfig) -> Result<Arc<dyn CloudClient>, UploadError> {
    let key = config
        .filestack_api_key
        .as_deref()
        .ok_or(UploadError::MissingApiKey)?;
    Ok(Arc::new(FilestackClient::new(key)?))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl App for FileDropUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
