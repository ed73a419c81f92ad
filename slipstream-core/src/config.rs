//! Centralized configuration for the quality switching core.
//!
//! All tunable parameters and persistence keys are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::prefs::StorageSelection;

/// Storage key for the remembered quality name.
pub const DEFAULT_QUALITY_KEY: &str = "vjs.dynamic.sources.selected.quality";

/// Storage key for the auto-detection enabled flag.
pub const DEFAULT_DETECTION_KEY: &str = "vjs.dynamic.sources.quality.detection.enabled";

/// Central configuration for the switcher and its components.
#[derive(Debug, Clone, Default)]
pub struct SlipstreamConfig {
    pub preference: PreferenceConfig,
    pub detection: DetectionConfig,
}

/// Persistence of the user's quality choice.
#[derive(Debug, Clone)]
pub struct PreferenceConfig {
    /// Backend holding the remembered quality name
    pub storage: StorageSelection,
    /// Key the name is stored under
    pub key: String,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            storage: StorageSelection::None,
            key: DEFAULT_QUALITY_KEY.to_owned(),
        }
    }
}

/// Bandwidth-adaptive quality detection parameters.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Whether the auto quality engine is built at all
    pub enabled: bool,
    /// Backend holding the detection enabled flag
    pub state_storage: StorageSelection,
    /// Key the flag is stored under
    pub state_key: String,
    /// Base sliding window over which progress rates are measured
    pub window: Duration,
    /// Grace delay before measurement resumes after a disruptive event;
    /// defaults to half the base window
    pub start_delay: Option<Duration>,
    /// Played-per-wall-clock rate below which quality steps down
    pub step_down_played_rate: f64,
    /// Buffered-per-wall-clock rate above which quality steps up
    pub step_up_buffered_rate: f64,
    /// Window growth per step-down decision
    pub widen_factor: f64,
    /// Window shrink per step-up decision
    pub narrow_factor: f64,
    /// Ceiling for window widening, as a multiple of the base window
    pub max_window_multiplier: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            state_storage: StorageSelection::None,
            state_key: DEFAULT_DETECTION_KEY.to_owned(),
            window: Duration::from_millis(3000),
            start_delay: None, // Half the window
            step_down_played_rate: 0.98,
            step_up_buffered_rate: 2.7,
            widen_factor: 1.3,
            narrow_factor: 0.7,
            max_window_multiplier: 2.0,
        }
    }
}

impl DetectionConfig {
    /// The configured start delay, or half the base window when unset.
    pub fn effective_start_delay(&self) -> Duration {
        self.start_delay.unwrap_or(self.window / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_start_delay_is_half_window() {
        let config = DetectionConfig::default();
        assert_eq!(config.effective_start_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_explicit_start_delay_wins() {
        let config = DetectionConfig {
            start_delay: Some(Duration::from_millis(250)),
            ..DetectionConfig::default()
        };
        assert_eq!(config.effective_start_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_default_keys() {
        let config = SlipstreamConfig::default();
        assert_eq!(config.preference.key, "vjs.dynamic.sources.selected.quality");
        assert_eq!(
            config.detection.state_key,
            "vjs.dynamic.sources.quality.detection.enabled"
        );
    }
}
