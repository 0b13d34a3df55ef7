use crate::upload::types::UploadEvent;
use rand::Rng;
use std::sync::mpsc::Sender;

/// Overall batch progress for file `position` (1-based) of `total` while that
/// file is at `local_percent`.
pub fn overall_progress(position: usize, total: usize, local_percent: f32) -> f32 {
    if total == 0 {
        return 0.0;
    }
    // ((k-1)*100 + p) / n
    let finished = position.saturating_sub(1) as f64 * 100.0;
    let local = f64::from(local_percent.clamp(0.0, 100.0));
    ((finished + local) / total as f64).clamp(0.0, 100.0) as f32
}

pub fn status_text(position: usize, total: usize) -> String {
    format!("Uploading {} of {}...", position, total)
}

/// Supplies the per-tick increment of a simulated upload.
pub trait ProgressSource: Send + Sync {
    fn next_increment(&self) -> f32;
}

/// Random increments in `[0, 15)`.
#[derive(Debug, Default)]
pub struct RandomProgress;

impl ProgressSource for RandomProgress {
    fn next_increment(&self) -> f32 {
        rand::thread_rng().gen_range(0.0..15.0)
    }
}

/// Turns per-file percentages into `UploadEvent::Progress` messages.
#[derive(Clone)]
pub struct ProgressReporter {
    sender: Sender<UploadEvent>,
}

impl ProgressReporter {
    pub fn new(sender: Sender<UploadEvent>) -> Self {
        Self { sender }
    }

    pub fn report(&self, position: usize, total: usize, local_percent: f32) {
        let event = UploadEvent::Progress {
            percent: overall_progress(position, total, local_percent),
            text: status_text(position, total),
        };
        self.sender.send(event).unwrap_or_default();
    }

    pub fn send(&self, event: UploadEvent) {
        self.sender.send(event).unwrap_or_default();
    }
}


#[cfg(test)]
pub use scripted::ScriptedProgress;
