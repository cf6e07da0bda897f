//! Simulation settings from `config/simulation.toml` and shared duration parsing.
use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/simulation.toml";
const DEFAULT_TIME_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSimulationConfig {
    time_scale: f32,
}

impl Default for RawSimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

/// Runtime configuration derived from `config/simulation.toml`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    /// Multiplier applied to every engine timer.
    pub time_scale: f32,
}

impl SimulationSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawSimulationConfig>(&raw) {
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

impl Default for SimulationSettings {
    fn default() -> Self {
        RawSimulationConfig::default().into()
    }
}

impl From<RawSimulationConfig> for SimulationSettings {
    fn from(value: RawSimulationConfig) -> Self {
        // The clock clamps the lower bound; only unusable values are replaced here.
        let time_scale = if value.time_scale.is_finite() {
            value.time_scale
        } else {
            warn!(
                "time_scale = {} is not usable, using {}",
                value.time_scale, DEFAULT_TIME_SCALE
            );
            DEFAULT_TIME_SCALE
        };
        Self { time_scale }
    }
}

/// Converts a configured number of seconds, clamped to `min`. Values that do
/// not fit in a `Duration` (infinite, or far too large) fall back to `default`.
pub fn seconds_or_default(field: &str, seconds: f32, min: f32, default: f32) -> Duration {
    match Duration::try_from_secs_f32(seconds.max(min)) {
        Ok(duration) => duration,
        Err(err) => {
            warn!(
                "{} = {} is not a usable duration ({}), using {}s",
                field, seconds, err, default
            );
            Duration::from_secs_f32(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_time_scale() {
        let raw: RawSimulationConfig =
            toml::from_str("time_scale = 2.5\n").expect("config should parse");
        assert_eq!(SimulationSettings::from(raw).time_scale, 2.5);

        let raw: RawSimulationConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(SimulationSettings::from(raw).time_scale, DEFAULT_TIME_SCALE);
    }

    #[test]
    fn non_finite_time_scale_falls_back() {
        let raw: RawSimulationConfig =
            toml::from_str("time_scale = inf\n").expect("toml accepts inf");
        assert_eq!(SimulationSettings::from(raw).time_scale, DEFAULT_TIME_SCALE);
    }

    #[test]
    fn unusable_durations_fall_back_to_default() {
        assert_eq!(
            seconds_or_default("cleaning.duration_seconds", f32::INFINITY, 0.0, 2.0),
            Duration::from_secs(2)
        );
        assert_eq!(
            seconds_or_default("cleaning.duration_seconds", 1.0e30, 0.0, 2.0),
            Duration::from_secs(2)
        );
        assert_eq!(
            seconds_or_default("interval_seconds", f32::NAN, 0.5, 2.0),
            Duration::from_millis(500)
        );
        assert_eq!(
            seconds_or_default("interval_seconds", -4.0, 1.0, 2.0),
            Duration::from_secs(1)
        );
    }
}
