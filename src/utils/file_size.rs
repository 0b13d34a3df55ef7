pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human readable size in 1024-based units, at most two decimals.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
        if size == 0 {
            return "0 Bytes".to_string();
        }

        // Anything past GB stays in GB.
        let unit_index = (size.ilog(1024) as usize).min(UNITS.len() - 1);
        let value = size as f64 / 1024f64.powi(unit_index as i32);

        // Ties round up: 1.125 -> 1.13.
        let rounded = format!("{:.2}", (value * 100.0).round() / 100.0);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        format!("{} {}", trimmed, UNITS[unit_index])
    }
}
