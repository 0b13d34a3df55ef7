use crate::upload::types::UploadableFile;
use crate::utils::mime::mime_from_path;
use ignore::Walk;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Turns dialog selections and dropped paths into upload candidates.
/// Directories are walked (honouring `.gitignore`), files are taken as is.
#[derive(Debug, Default, Clone)]
pub struct FileCollector;

impl FileCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self, paths: &[PathBuf]) -> Vec<UploadableFile> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                debug!("Expanding dropped folder {}", path.display());
                for entry in Walk::new(path) {
                    match entry {
                        Ok(entry) if entry.path().is_file() => {
                            if let Some(file) = Self::describe(entry.path()) {
                                files.push(file);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Error walking directory: {}", e),
                    }
                }
            } else if let Some(file) = Self::describe(path) {
                files.push(file);
            }
        }

        files
    }

    fn describe(path: &Path) -> Option<UploadableFile> {
        let name = path.file_name()?.to_string_lossy().to_string();
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        Some(UploadableFile::local(name, size, mime_from_path(path)).with_path(path.to_path_buf()))
    }
}
