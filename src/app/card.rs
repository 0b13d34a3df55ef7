use crate::upload::{FileSource, UploadableFile};
use crate::utils::file_size::FileSizeUtils;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    None,
    Image(String),
    Pdf(String),
}

/// Something the user can do from a card. The app applies it after the frame
/// is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Delete(String),
    View(String),
    CopyLink(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub icon: &'static str,
    pub file_name: String,
    pub meta: String,
    pub preview: Preview,
    pub actions: Vec<CardAction>,
    pub visible: bool,
}

#[cfg(test)]
impl Card {
    pub fn is_cloud(&self) -> bool {
        self.icon == CLOUD_ICON
    }
}

const CLOUD_ICON: &str = "☁️";

pub fn file_icon(mime_type: &str) -> &'static str {
    if mime_type.starts_with("image/") {
        "🖼️"
    } else if mime_type.starts_with("video/") {
        "🎥"
    } else if mime_type.starts_with("audio/") {
        "🎵"
    } else if mime_type.contains("pdf") {
        "📄"
    } else if mime_type.contains("word") {
        "📝"
    } else if mime_type.contains("excel") || mime_type.contains("spreadsheet") {
        "📊"
    } else {
        "📁"
    }
}

pub fn format_card_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn render_card(file: &UploadableFile, today: NaiveDate) -> Card {
    match &file.source {
        FileSource::Local { .. } => render_local_card(file, today),
        FileSource::Cloud { url } => render_cloud_card(file, url),
    }
}

fn render_local_card(file: &UploadableFile, today: NaiveDate) -> Card {
    Card {
        icon: file_icon(&file.mime_type),
        file_name: file.name.clone(),
        meta: format!(
            "{} • {}",
            FileSizeUtils::format_size(file.size),
            format_card_date(today)
        ),
        preview: Preview::None,
        actions: vec![CardAction::Delete(file.name.clone())],
        visible: true,
    }
}

// Cloud cards have no delete action.
fn render_cloud_card(file: &UploadableFile, url: &str) -> Card {
    Card {
        icon: CLOUD_ICON,
        file_name: file.name.clone(),
        meta: format!("{} • Cloud Storage", FileSizeUtils::format_size(file.size)),
        preview: preview_for(&file.mime_type, url),
        actions: vec![
            CardAction::View(url.to_string()),
            CardAction::CopyLink(url.to_string()),
        ],
        visible: true,
    }
}

pub fn preview_for(mime_type: &str, url: &str) -> Preview {
    if mime_type.starts_with("image/") {
        Preview::Image(url.to_string())
    } else if mime_type == "application/pdf" {
        Preview::Pdf(url.to_string())
    } else {
        Preview::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::RemoteFile;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_icon_rules_in_priority_order() {
        assert_eq!(file_icon("image/png"), "🖼️");
        assert_eq!(file_icon("video/mp4"), "🎥");
        assert_eq!(file_icon("audio/mpeg"), "🎵");
        assert_eq!(file_icon("application/pdf"), "📄");
        assert_eq!(file_icon("application/msword"), "📝");
        assert_eq!(
            file_icon("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            "📝"
        );
        assert_eq!(file_icon("application/vnd.ms-excel"), "📊");
        assert_eq!(
            file_icon("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            "📊"
        );
        assert_eq!(file_icon(""), "📁");
        assert_eq!(file_icon("text/plain"), "📁");
    }

    #[test]
    fn test_local_card() {
        let file = UploadableFile::local("report.pdf", 1536, "application/pdf");
        let card = render_card(&file, today());
        assert_eq!(card.icon, "📄");
        assert_eq!(card.file_name, "report.pdf");
        assert_eq!(card.meta, "1.5 KB • 3/7/2024");
        assert_eq!(card.preview, Preview::None);
        assert_eq!(card.actions, [CardAction::Delete("report.pdf".to_string())]);
        assert!(card.visible);
        assert!(!card.is_cloud());
    }

    #[test]
    fn test_cloud_card_has_preview_and_link_actions() {
        let file = UploadableFile::from(RemoteFile {
            filename: "cat.png".to_string(),
            size: 1_048_576,
            url: "https://cdn/cat".to_string(),
            mimetype: Some("image/png".to_string()),
        });
        let card = render_card(&file, today());
        assert_eq!(card.icon, "☁️");
        assert_eq!(card.meta, "1 MB • Cloud Storage");
        assert_eq!(card.preview, Preview::Image("https://cdn/cat".to_string()));
        assert_eq!(
            card.actions,
            [
                CardAction::View("https://cdn/cat".to_string()),
                CardAction::CopyLink("https://cdn/cat".to_string()),
            ]
        );
        assert!(card.is_cloud());
    }

    #[test]
    fn test_dropped_file_uploaded_to_cloud_keeps_preview() {
        let file = UploadableFile {
            name: "notes.pdf".to_string(),
            size: 2048,
            mime_type: "application/pdf".to_string(),
            source: FileSource::Cloud {
                url: "https://cdn/notes".to_string(),
            },
        };
        let card = render_card(&file, today());
        assert_eq!(card.icon, "☁️");
        assert_eq!(card.file_name, "notes.pdf");
        assert_eq!(card.meta, "2 KB • Cloud Storage");
        assert_eq!(card.preview, Preview::Pdf("https://cdn/notes".to_string()));
    }

    #[test]
    fn test_preview_kinds() {
        assert_eq!(preview_for("application/pdf", "u"), Preview::Pdf("u".to_string()));
        assert_eq!(preview_for("image/gif", "u"), Preview::Image("u".to_string()));
        assert_eq!(preview_for("application/pdf; x", "u"), Preview::None);
        assert_eq!(preview_for("", "u"), Preview::None);
    }
}
