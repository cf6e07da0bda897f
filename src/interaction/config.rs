use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::seconds_or_default;

const CONFIG_PATH: &str = "config/interaction.toml";
const DEFAULT_CLEANING_SECONDS: f32 = 2.4;
const DEFAULT_TIMEOUT_SECONDS: f32 = 30.0;
/// A timeout must leave the cleaning effect at least this long to finish.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    interaction: RawInteraction,
    #[serde(default)]
    cleaning: RawCleaning,
    #[serde(default)]
    timeout: RawTimeout,
    #[serde(default)]
    dialogue: RawDialogue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteraction {
    radius: f32,
}

impl Default for RawInteraction {
    fn default() -> Self {
        Self { radius: 60.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCleaning {
    duration_seconds: f32,
}

impl Default for RawCleaning {
    fn default() -> Self {
        // Four 0.6s bob cycles.
        Self {
            duration_seconds: DEFAULT_CLEANING_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTimeout {
    enabled: bool,
    seconds: f32,
}

impl Default for RawTimeout {
    fn default() -> Self {
        Self {
            enabled: false,
            seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDialogue {
    completion_lines: Vec<String>,
    gave_up_line: String,
}

impl Default for RawDialogue {
    fn default() -> Self {
        Self {
            completion_lines: vec![
                "That feels... a little better.".to_string(),
                "One step at a time...".to_string(),
                "I can do this.".to_string(),
                "It's coming together.".to_string(),
                "Maybe I can manage this.".to_string(),
                "A bit of progress...".to_string(),
            ],
            gave_up_line: "I... can't right now.".to_string(),
        }
    }
}

/// Runtime configuration derived from `config/interaction.toml`.
#[derive(Debug, Clone)]
pub struct InteractionSettings {
    /// Player must be strictly closer than this to an interactable.
    pub radius: f32,
    pub cleaning_duration: Duration,
    /// Stuck walks or cleaning effects are abandoned after this long.
    pub action_timeout: Option<Duration>,
    pub completion_lines: Vec<String>,
    pub gave_up_line: String,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawInteractionConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawInteractionConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let mut completion_lines: Vec<String> = value
            .dialogue
            .completion_lines
            .iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        if completion_lines.is_empty() {
            completion_lines = RawDialogue::default().completion_lines;
        }

        let cleaning_duration = seconds_or_default(
            "cleaning.duration_seconds",
            value.cleaning.duration_seconds,
            0.0,
            DEFAULT_CLEANING_SECONDS,
        );
        let action_timeout = value.timeout.enabled.then(|| {
            seconds_or_default(
                "timeout.seconds",
                value.timeout.seconds,
                1.0,
                DEFAULT_TIMEOUT_SECONDS,
            )
            .max(cleaning_duration + TIMEOUT_GRACE)
        });

        let radius = if value.interaction.radius.is_finite() {
            value.interaction.radius.max(1.0)
        } else {
            warn!(
                "interaction.radius = {} is not usable, using {}",
                value.interaction.radius,
                RawInteraction::default().radius
            );
            RawInteraction::default().radius
        };

        Self {
            radius,
            cleaning_duration,
            action_timeout,
            completion_lines,
            gave_up_line: value.dialogue.gave_up_line.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_feel() {
        let settings = InteractionSettings::default();
        assert_eq!(settings.radius, 60.0);
        assert_eq!(settings.cleaning_duration, Duration::from_secs_f32(2.4));
        assert!(settings.action_timeout.is_none());
        assert_eq!(settings.completion_lines.len(), 6);
    }

    #[test]
    fn sanitises_parsed_values() {
        let raw: RawInteractionConfig = toml::from_str(
            r#"
            [interaction]
            radius = -5.0

            [timeout]
            enabled = true
            seconds = 0.2

            [dialogue]
            completion_lines = ["  ", "Done."]
            "#,
        )
        .expect("config should parse");
        let settings = InteractionSettings::from(raw);

        assert_eq!(settings.radius, 1.0);
        assert_eq!(
            settings.action_timeout,
            Some(Duration::from_secs_f32(2.4) + TIMEOUT_GRACE)
        );
        assert_eq!(settings.completion_lines, vec!["Done.".to_string()]);
        assert_eq!(settings.cleaning_duration, Duration::from_secs_f32(2.4));
    }

    #[test]
    fn empty_line_list_falls_back() {
        let raw: RawInteractionConfig =
            toml::from_str("[dialogue]\ncompletion_lines = []\n").expect("config should parse");
        let settings = InteractionSettings::from(raw);
        assert_eq!(settings.completion_lines.len(), 6);
    }

    #[test]
    fn infinite_durations_fall_back_to_defaults() {
        let raw: RawInteractionConfig = toml::from_str(
            r#"
            [interaction]
            radius = inf

            [cleaning]
            duration_seconds = inf

            [timeout]
            enabled = true
            seconds = inf
            "#,
        )
        .expect("toml accepts inf");
        let settings = InteractionSettings::from(raw);

        assert_eq!(settings.radius, 60.0);
        assert_eq!(settings.cleaning_duration, Duration::from_secs_f32(2.4));
        assert_eq!(settings.action_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn timeout_always_outlasts_the_cleaning_effect() {
        let raw: RawInteractionConfig = toml::from_str(
            "[cleaning]\nduration_seconds = 4.0\n[timeout]\nenabled = true\nseconds = 2.0\n",
        )
        .expect("config should parse");
        let settings = InteractionSettings::from(raw);

        assert_eq!(settings.action_timeout, Some(Duration::from_secs(5)));
    }
}
