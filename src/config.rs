use crate::error::ConfigError;
use crate::upload::{PickerOptions, UploadSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    #[default]
    Local,
    Cloud,
}

impl FromStr for UploadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" => Ok(Self::Cloud),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: UploadMode,
    pub filestack_api_key: Option<String>,
    pub max_file_size: u64,
    pub tick_interval_ms: u64,
    pub hide_delay_ms: u64,
    pub picker_max_files: usize,
    pub accent_color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: UploadMode::Local,
            filestack_api_key: None,
            max_file_size: MAX_FILE_SIZE,
            tick_interval_ms: 200,
            hide_delay_ms: 1000,
            picker_max_files: 10,
            accent_color: "#a159e1".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `settings.json` from the platform config directory, then applies
    /// `UPLOADER_MODE` and `FILESTACK_API_KEY` from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };
        config.apply_env(
            std::env::var("UPLOADER_MODE").ok(),
            std::env::var("FILESTACK_API_KEY").ok(),
        )?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Reading settings from {}", path.display());
        let bytes = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(
        &mut self,
        mode: Option<String>,
        api_key: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(mode) = mode {
            self.mode = mode.parse()?;
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.filestack_api_key = Some(key.trim().to_string());
        }
        Ok(())
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            max_file_size: self.max_file_size,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            hide_delay: Duration::from_millis(self.hide_delay_ms),
        }
    }

    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            max_files: self.picker_max_files,
            ..PickerOptions::default()
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com.local", "File Drop Uploader", "FileDropUploader")
        .map(|proj| proj.config_dir().join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_widget_constants() {
        let config = AppConfig::default();
        assert_eq!(config.max_file_size, 104_857_600);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.hide_delay_ms, 1000);
        assert_eq!(config.picker_max_files, 10);
        assert_eq!(config.mode, UploadMode::Local);
    }

    #[test]
    fn test_partial_settings_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mode": "cloud", "filestack_api_key": "abc"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode, UploadMode::Cloud);
        assert_eq!(config.filestack_api_key.as_deref(), Some("abc"));
        assert_eq!(config.tick_interval_ms, 200);
    }

    #[test]
    fn test_invalid_settings_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(Some("Cloud".to_string()), Some("  key123 ".to_string()))
            .unwrap();
        assert_eq!(config.mode, UploadMode::Cloud);
        assert_eq!(config.filestack_api_key.as_deref(), Some("key123"));

        let err = config.apply_env(Some("ftp".to_string()), None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(m) if m == "ftp"));
    }

    #[test]
    fn test_blank_env_key_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(None, Some("   ".to_string())).unwrap();
        assert!(config.filestack_api_key.is_none());
    }
}
