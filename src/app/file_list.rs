use super::card::{render_card, Card};
use crate::upload::UploadableFile;
use chrono::NaiveDate;
use tracing::debug;

/// Uploaded files and the cards drawn for them, kept index-aligned.
#[derive(Debug, Default)]
pub struct FileList {
    files: Vec<UploadableFile>,
    cards: Vec<Card>,
}

impl FileList {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: UploadableFile, today: NaiveDate) {
        self.cards.push(render_card(&file, today));
        self.files.push(file);
    }

    /// Drops every file called `name`, then redraws the rest in order.
    /// Returns how many files were removed.
    pub fn remove_file(&mut self, name: &str, today: NaiveDate) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        let removed = before - self.files.len();
        debug!("Removed {} file(s) named {}", removed, name);
        self.rerender(today);
        removed
    }

    /// Full redraw; any active filter is cleared.
    pub fn rerender(&mut self, today: NaiveDate) {
        self.cards = self.files.iter().map(|f| render_card(f, today)).collect();
    }

    /// Shows cards whose name contains `query`, ignoring case. Only the cards
    /// are touched, the files stay.
    pub fn apply_filter(&mut self, query: &str) {
        let query = query.to_lowercase();
        for card in &mut self.cards {
            card.visible = card.file_name.to_lowercase().contains(&query);
        }
    }

    #[cfg(test)]
    pub fn files(&self) -> &[UploadableFile] {
        &self.files
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
