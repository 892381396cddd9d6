use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning parameters for the rotation detector. Defaults are the values run
/// in the field; override per site via a YAML file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectorSettings {
    /// Samples per calibration window.
    pub thresh_samples: usize,
    /// Calibration windows averaged into the noise threshold.
    pub num_thresh_checks: usize,
    /// Fast (moving) window length in seconds.
    pub moving_check_seconds: f64,
    /// Capacity of the rolling history of fast diff sums.
    pub moving_history_capacity: usize,
    /// Scale applied to the noise average to get the motion threshold.
    pub moving_thresh_mult: f64,
    /// Slow (rotating) window length in seconds.
    pub rotating_check_seconds: f64,
    /// How much larger the slow diff sum must be than the history average.
    pub rotating_check_mult: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            thresh_samples: 10,
            num_thresh_checks: 20,
            moving_check_seconds: 60.0,
            moving_history_capacity: 5,
            moving_thresh_mult: 5.0,
            rotating_check_seconds: 20.0 * 60.0, // every 20 minutes
            rotating_check_mult: 2.0,
        }
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<DetectorSettings, String> {
    let settings_str = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings file: {}", e))?;

    serde_yaml::from_str(&settings_str)
        .map_err(|e| format!("Failed to parse settings file: {}", e))
}

pub fn save_settings<P: AsRef<Path>>(settings: &DetectorSettings, path: P) -> Result<(), String> {
    let yaml = serde_yaml::to_string(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;

    fs::write(path, yaml).map_err(|e| format!("Failed to write settings file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_field_values() {
        let settings = DetectorSettings::default();
        assert_eq!(settings.thresh_samples, 10);
        assert_eq!(settings.num_thresh_checks, 20);
        assert_eq!(settings.moving_check_seconds, 60.0);
        assert_eq!(settings.moving_history_capacity, 5);
        assert_eq!(settings.moving_thresh_mult, 5.0);
        assert_eq!(settings.rotating_check_seconds, 1200.0);
        assert_eq!(settings.rotating_check_mult, 2.0);
    }

    #[test]
    fn yaml_round_trip() {
        let settings = DetectorSettings {
            moving_check_seconds: 30.0,
            ..DetectorSettings::default()
        };
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let parsed: DetectorSettings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.moving_check_seconds, 30.0);
        assert_eq!(parsed.num_thresh_checks, 20);
    }
}
