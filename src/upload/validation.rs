use crate::upload::types::UploadableFile;
use tracing::warn;

/// Outcome of checking a user selection against the size limit.
#[derive(Debug, Default)]
pub struct Selection {
    pub accepted: Vec<UploadableFile>,
    pub warnings: Vec<String>,
}

/// Keeps every candidate no larger than `max_size`, in order, and produces
/// one warning per rejected file.
pub fn validate_selection(candidates: Vec<UploadableFile>, max_size: u64) -> Selection {
    let limit = limit_label(max_size);
    let mut selection = Selection::default();

    for file in candidates {
        if file.size > max_size {
            warn!("Rejecting {} ({} bytes): over the {} limit", file.name, file.size, limit);
            selection
                .warnings
                .push(format!("{} is too large. Maximum size is {}.", file.name, limit));
        } else {
            selection.accepted.push(file);
        }
    }

    selection
}

fn limit_label(max_size: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if max_size % MIB == 0 {
        format!("{}MB", max_size / MIB)
    } else {
        crate::utils::file_size::FileSizeUtils::format_size(max_size)
    }
}
