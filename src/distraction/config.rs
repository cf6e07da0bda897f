use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::seconds_or_default;

const CONFIG_PATH: &str = "config/distraction.toml";
const MIN_INTERVAL_SECONDS: f32 = 1.0;
const DEFAULT_INTERVAL_SECONDS: f32 = 45.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDistractionConfig {
    enabled: bool,
    interval_seconds: f32,
    distracted_line: String,
    refocused_line: String,
}

impl Default for RawDistractionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            distracted_line: "What was I doing again...?".to_string(),
            refocused_line: "Right. Back to it.".to_string(),
        }
    }
}

/// Runtime configuration derived from `config/distraction.toml`.
#[derive(Debug, Clone)]
pub struct DistractionSettings {
    /// Periodic interruptions. Requests still work when this is off.
    pub enabled: bool,
    pub interval: Duration,
    pub distracted_line: String,
    pub refocused_line: String,
}

impl DistractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawDistractionConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }
}

impl Default for DistractionSettings {
    fn default() -> Self {
        RawDistractionConfig::default().into()
    }
}

impl From<RawDistractionConfig> for DistractionSettings {
    fn from(value: RawDistractionConfig) -> Self {
        Self {
            enabled: value.enabled,
            interval: seconds_or_default(
                "interval_seconds",
                value.interval_seconds,
                MIN_INTERVAL_SECONDS,
                DEFAULT_INTERVAL_SECONDS,
            ),
            distracted_line: value.distracted_line.trim().to_string(),
            refocused_line: value.refocused_line.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_interval_and_keeps_missing_fields() {
        let raw: RawDistractionConfig =
            toml::from_str("interval_seconds = 0.1\nrefocused_line = \"  Okay.  \"\n")
                .expect("config should parse");
        let settings = DistractionSettings::from(raw);

        assert!(settings.enabled);
        assert_eq!(settings.interval, Duration::from_secs(1));
        assert_eq!(settings.refocused_line, "Okay.");
        assert_eq!(settings.distracted_line, "What was I doing again...?");
    }

    #[test]
    fn infinite_interval_falls_back_to_default() {
        let raw: RawDistractionConfig =
            toml::from_str("interval_seconds = inf\n").expect("toml accepts inf");
        let settings = DistractionSettings::from(raw);

        assert_eq!(settings.interval, Duration::from_secs(45));
    }
}
