mod batch;
mod cloud;
mod collector;
mod picker;
mod progress;
mod strategy;
mod types;
mod validation;

pub use batch::{BatchUploader, UploadSettings, COMPLETE_TEXT};
pub use cloud::{CloudClient, CloudUpload, FilestackClient};
pub use collector::FileCollector;
pub use picker::{CloudPicker, PickerOptions};
pub use progress::RandomProgress;
#[cfg(test)]
pub use progress::ScriptedProgress;
pub use strategy::{SimulatedUpload, UploadStrategy};
#[cfg(test)]
pub use types::RemoteFile;
pub use types::{FileSource, UploadEvent, UploadableFile};
