//! Configuration initialization and hierarchy management

use tracing::debug;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::error::CropperResult;

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CROPPER_FFMPEG", "ffmpeg_path"),
    ("CROPPER_FFPROBE", "ffprobe_path"),
    ("CROPPER_OUTPUT_EXTENSION", "output_extension"),
    ("CROPPER_LOG_LEVEL", "log_level"),
    ("CROPPER_LOG_FORMAT", "log_format"),
    ("CROPPER_EVENT_FORMAT", "event_format"),
];

/// Build the effective configuration following precedence:
/// CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> CropperResult<AppConfig> {
    let mut config = TomlConfigAdapter::load_or_default(cli.config.as_deref())?;
    apply_environment_overrides(&mut config, |key| std::env::var(key).ok());
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides read through `lookup`
pub fn apply_environment_overrides<F>(config: &mut AppConfig, lookup: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            set_key(config, key, value);
            env_overrides += 1;
        }
    }
    env_overrides
}

/// Apply global command-line flags
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let overrides = [
        ("log_level", cli.log_level.clone()),
        ("log_format", cli.log_format.clone()),
        ("event_format", cli.event_format.clone()),
    ];

    let mut cli_overrides = 0;
    for (key, value) in overrides {
        if let Some(value) = value {
            set_key(config, key, value);
            cli_overrides += 1;
        }
    }
    cli_overrides
}

fn set_key(config: &mut AppConfig, key: &str, value: String) {
    match key {
        "ffmpeg_path" => config.ffmpeg_path = value,
        "ffprobe_path" => config.ffprobe_path = value,
        "output_extension" => config.output_extension = value,
        "log_level" => config.log_level = value.to_lowercase(),
        "log_format" => config.log_format = value.to_lowercase(),
        "event_format" => config.event_format = value.to_lowercase(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("CROPPER_FFMPEG", "/usr/local/bin/ffmpeg"),
            ("CROPPER_LOG_LEVEL", "DEBUG"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let applied =
            apply_environment_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(applied, 2);
        assert_eq!(config.ffmpeg_path, "/usr/local/bin/ffmpeg");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ffprobe_path, "ffprobe");
    }

    #[test]
    fn test_cli_overrides_win_over_environment() {
        let cli = Cli::parse_from([
            "cropper",
            "--log-level",
            "warn",
            "--events",
            "json",
            "probe",
            "--input",
            "a.mp4",
        ]);

        let mut config = AppConfig::default();
        apply_environment_overrides(&mut config, |key| {
            (key == "CROPPER_LOG_LEVEL").then(|| "trace".to_string())
        });
        let applied = apply_cli_overrides(&mut config, &cli);

        assert_eq!(applied, 2);
        assert_eq!(config.log_level, "warn");
        assert!(config.json_events());
    }
}
