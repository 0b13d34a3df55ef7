use super::file_list::FileList;
use crate::upload::{UploadEvent, UploadableFile, COMPLETE_TEXT};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

#[derive(Clone, Debug, PartialEq)]
pub enum ActionProgress {
    Idle,
    Uploading { total: usize, percent: f32, text: String },
}

impl Default for ActionProgress {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Default)]
pub struct UploadState {
    pub progress: ActionProgress,
    pub status_text: String,
    pub percent: f32,
    pub file_list: FileList,
    pub search_query: String,
    pub warnings: VecDeque<String>,
    pub drag_hover: bool,
    pub event_receiver: Option<Receiver<UploadEvent>>,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(self.progress, ActionProgress::Uploading { .. })
    }

    /// Fraction for the progress bar.
    pub fn get_progress_fraction(&self) -> f32 {
        match &self.progress {
            ActionProgress::Idle => self.percent / 100.0,
            ActionProgress::Uploading { percent, .. } => percent / 100.0,
        }
    }

    pub fn get_status_text(&self) -> String {
        match &self.progress {
            ActionProgress::Idle => self.status_text.clone(),
            ActionProgress::Uploading { total, text, .. } if text.is_empty() => {
                format!("Preparing {} files...", total)
            }
            ActionProgress::Uploading { text, .. } => text.clone(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push_back(warning.into());
    }

    /// New cards are appended visible; the search only runs when edited.
    pub fn add_file(&mut self, file: UploadableFile, today: NaiveDate) {
        self.file_list.add(file, today);
    }

    /// Applies one worker event.
    pub fn apply_event(&mut self, event: UploadEvent, today: NaiveDate) {
        match event {
            UploadEvent::BatchStarted { total } => {
                self.progress = ActionProgress::Uploading {
                    total,
                    percent: 0.0,
                    text: String::new(),
                };
            }
            UploadEvent::Progress { percent, text } => match &mut self.progress {
                ActionProgress::Uploading {
                    percent: current,
                    text: current_text,
                    ..
                } => {
                    *current = percent;
                    *current_text = text;
                }
                ActionProgress::Idle => {
                    self.percent = percent;
                    self.status_text = text;
                }
            },
            UploadEvent::FileUploaded(file) => self.add_file(file, today),
            UploadEvent::Warning(warning) => self.push_warning(warning),
            UploadEvent::BatchFinished => {
                self.progress = ActionProgress::Idle;
                self.percent = 0.0;
                self.status_text = COMPLETE_TEXT.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_idle_uploading_idle() {
        let mut state = UploadState::default();
        assert!(!state.is_uploading());

        state.apply_event(UploadEvent::BatchStarted { total: 2 }, day());
        assert!(state.is_uploading());
        assert_eq!(state.get_status_text(), "Preparing 2 files...");

        state.apply_event(
            UploadEvent::Progress {
                percent: 40.0,
                text: "Uploading 1 of 2...".to_string(),
            },
            day(),
        );
        assert_eq!(state.get_progress_fraction(), 0.4);
        assert_eq!(state.get_status_text(), "Uploading 1 of 2...");

        state.apply_event(UploadEvent::BatchFinished, day());
        assert!(!state.is_uploading());
        assert_eq!(state.get_progress_fraction(), 0.0);
        assert_eq!(state.get_status_text(), "Upload complete!");
    }

    #[test]
    fn test_uploaded_files_and_warnings_land_in_state() {
        let mut state = UploadState::default();
        state.apply_event(
            UploadEvent::FileUploaded(UploadableFile::local("a.txt", 1, "")),
            day(),
        );
        state.apply_event(UploadEvent::Warning("nope".to_string()), day());

        assert_eq!(state.file_list.cards().len(), 1);
        assert_eq!(state.warnings.front().map(String::as_str), Some("nope"));
    }

    #[test]
    fn test_new_cards_show_until_search_is_edited() {
        let mut state = UploadState::default();
        state.search_query = "pdf".to_string();
        state.file_list.apply_filter(&state.search_query);
        state.add_file(UploadableFile::local("a.txt", 1, ""), day());
        state.add_file(UploadableFile::local("b.pdf", 1, ""), day());
        assert_eq!(state.file_list.visible_cards().count(), 2);

        state.file_list.apply_filter(&state.search_query);
        let visible: Vec<_> = state
            .file_list
            .visible_cards()
            .map(|c| c.file_name.as_str())
            .collect();
        assert_eq!(visible, ["b.pdf"]);
    }
}
