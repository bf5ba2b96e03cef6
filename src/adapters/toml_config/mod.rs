// TOML config adapter - Configuration loaded from a `[cropper]` table

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::model::DEFAULT_OUTPUT_EXTENSION;
use crate::error::{CropperError, CropperResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "cropper.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];
const EVENT_FORMATS: &[&str] = &["text", "json"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// ffmpeg executable used for extraction
    pub ffmpeg_path: String,
    /// ffprobe executable used for duration probing
    pub ffprobe_path: String,
    /// Container extension of written clips
    pub output_extension: String,
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    /// How `run` renders processing events: `text` or `json`
    pub event_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            event_format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Reject values the rest of the program cannot act on
    pub fn validate(&self) -> CropperResult<()> {
        check_choice("log_level", &self.log_level, LOG_LEVELS)?;
        check_choice("log_format", &self.log_format, LOG_FORMATS)?;
        check_choice("event_format", &self.event_format, EVENT_FORMATS)?;

        if self.ffmpeg_path.trim().is_empty() {
            return Err(CropperError::Config("ffmpeg_path cannot be empty".to_string()));
        }
        if self.ffprobe_path.trim().is_empty() {
            return Err(CropperError::Config("ffprobe_path cannot be empty".to_string()));
        }
        let extension = self.output_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(|c: char| c == '/' || c == '\\') {
            return Err(CropperError::Config(format!(
                "Invalid output_extension: '{}'",
                self.output_extension
            )));
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    pub fn json_events(&self) -> bool {
        self.event_format == "json"
    }
}

fn check_choice(key: &str, value: &str, allowed: &[&str]) -> CropperResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CropperError::Config(format!(
            "Invalid {}: {}. Valid values: {}",
            key,
            value,
            allowed.join(", ")
        )))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    cropper: AppConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text; keys missing from the file keep
    /// their defaults
    pub fn parse(toml_content: &str) -> CropperResult<AppConfig> {
        let file: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| CropperError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.cropper)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> CropperResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CropperError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        info!("Loading configuration from: {}", path.display());
        Self::parse(&content)
    }

    /// Load the explicit file if given, else `cropper.toml` when present,
    /// else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> CropperResult<AppConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            debug!("No config file found, using defaults");
            Ok(AppConfig::default())
        }
    }

    /// Serialize configuration back to TOML
    pub fn to_toml(config: &AppConfig) -> CropperResult<String> {
        #[derive(Serialize)]
        struct Wrapper<'a> {
            cropper: &'a AppConfig,
        }
        toml::to_string(&Wrapper { cropper: config })
            .map_err(|e| CropperError::Config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_extension, "mp4");
        assert!(!config.json_events());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
[cropper]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
event_format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.ffprobe_path, "ffprobe");
        assert!(config.json_events());
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(TomlConfigAdapter::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(
            TomlConfigAdapter::parse("[cropper\nffmpeg_path ="),
            Err(CropperError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_values() {
        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.event_format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.output_extension = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_and_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cropper]\nlog_level = \"debug\"").unwrap();

        let config = TomlConfigAdapter::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");

        let text = TomlConfigAdapter::to_toml(&config).unwrap();
        assert_eq!(TomlConfigAdapter::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(TomlConfigAdapter::load_or_default(Some(&missing)).is_err());
    }
}
