use chrono::Duration;
use continuity_domain::{Profile, ReadError, Tuning, WriteError};

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, ReadError>;
    fn write_settings(&self, settings: &Settings) -> Result<(), WriteError>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Load increase per session for new profiles.
    pub progression_rate: f64,
    pub backup_interval_days: u32,
    pub recovery_steepness: f64,
    pub cns_steepness: f64,
    pub candidate_pool_size: usize,
}

impl Settings {
    #[must_use]
    pub fn tuning(&self) -> Tuning {
        Tuning {
            recovery_steepness: self.recovery_steepness,
            cns_steepness: self.cns_steepness,
            candidate_pool_size: self.candidate_pool_size,
            backup_interval: Duration::days(i64::from(self.backup_interval_days)),
            ..Tuning::default()
        }
    }

    #[must_use]
    pub fn new_profile(&self, name: &str) -> Profile {
        Profile {
            name: name.trim().to_string(),
            progression_rate: self.progression_rate,
            ..Profile::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            progression_rate: 0.02,
            backup_interval_days: 7,
            recovery_steepness: 3.0,
            cns_steepness: 1.5,
            candidate_pool_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default_tuning() {
        assert_eq!(Settings::default().tuning(), Tuning::default());
    }

    #[rstest]
    #[case(0, Duration::zero())]
    #[case(14, Duration::days(14))]
    fn test_tuning(#[case] backup_interval_days: u32, #[case] expected: Duration) {
        let settings = Settings {
            backup_interval_days,
            candidate_pool_size: 4,
            cns_steepness: 2.0,
            ..Settings::default()
        };

        let tuning = settings.tuning();

        assert_eq!(tuning.backup_interval, expected);
        assert_eq!(tuning.candidate_pool_size, 4);
        assert_approx_eq!(tuning.cns_steepness, 2.0);
        assert_eq!(tuning.rpe_window, 15);
    }

    #[test]
    fn test_new_profile() {
        let settings = Settings {
            progression_rate: 0.05,
            ..Settings::default()
        };

        let profile = settings.new_profile(" Alice ");

        assert_eq!(profile.name, "Alice");
        assert_approx_eq!(profile.progression_rate, 0.05);
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{"candidate_pool_size": 6}"#).unwrap();

        assert_eq!(
            settings,
            Settings {
                candidate_pool_size: 6,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let settings: Settings =
            serde_json::from_str(r#"{"rest_time": 120, "backup_interval_days": 3}"#).unwrap();

        assert_eq!(
            settings,
            Settings {
                backup_interval_days: 3,
                ..Settings::default()
            }
        );
    }
}
