use eframe::egui::Color32;

pub const DEFAULT_ACCENT: Color32 = Color32::from_rgb(161, 89, 225);

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

/// Accent color from settings, falling back to the default purple.
pub fn accent_or_default(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(DEFAULT_ACCENT)
}
