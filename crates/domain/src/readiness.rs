use chrono::{DateTime, Duration, Utc};

use crate::{
    CyclePhase, Experience, Profile, Sex, SleepLog, TrainingSession, Tuning, training::mean,
};

pub const MIN_READINESS: f64 = 0.3;
pub const MAX_READINESS: f64 = 1.1;

const DEFAULT_RPE: f64 = 7.0;
const TARGET_SLEEP_HOURS: f64 = 8.0;

/// Factors whose product forms the global readiness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readiness {
    pub cns: f64,
    pub sleep: f64,
    pub hormonal: f64,
    pub demographic: f64,
}

impl Readiness {
    #[must_use]
    pub fn assess(
        profile: &Profile,
        sessions: &[TrainingSession],
        sleep_logs: &[SleepLog],
        tuning: &Tuning,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        Self {
            cns: cns_fatigue(
                recent_average_rpe(sessions, 3).unwrap_or(DEFAULT_RPE),
                tuning.cns_steepness,
            ),
            sleep: sleep_factor(average_sleep(sleep_logs, now)),
            hormonal: phase_multiplier(profile.cycle_phase(today)),
            demographic: sex_multiplier(profile.sex)
                * age_factor(profile.age(today))
                * experience_multiplier(profile.experience),
        }
    }

    /// Always within [`MIN_READINESS`, `MAX_READINESS`].
    #[must_use]
    pub fn global(&self) -> f64 {
        let product = self.cns * self.sleep * self.hormonal * self.demographic;
        if product.is_nan() {
            return MIN_READINESS;
        }
        product.clamp(MIN_READINESS, MAX_READINESS)
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.global() * 100.0).round() as u8;
        percent
    }
}

#[must_use]
pub fn cns_fatigue(avg_rpe: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (steepness * (avg_rpe - 8.5)).exp())
}

/// Mean average RPE of the most recent sessions that have one.
#[must_use]
pub fn recent_average_rpe(sessions: &[TrainingSession], count: usize) -> Option<f64> {
    mean(
        sessions
            .iter()
            .rev()
            .take(count)
            .filter_map(|s| s.summary.and_then(|summary| summary.average_rpe)),
    )
}

/// Mean hours of sleep logged within the trailing seven days.
#[must_use]
pub fn average_sleep(sleep_logs: &[SleepLog], now: DateTime<Utc>) -> Option<f64> {
    let start = now - Duration::days(7);
    mean(
        sleep_logs
            .iter()
            .filter(|log| log.date > start && log.date <= now)
            .map(|log| log.hours),
    )
}

#[must_use]
pub fn sleep_factor(avg_sleep: Option<f64>) -> f64 {
    avg_sleep.map_or(1.0, |hours| {
        (hours / TARGET_SLEEP_HOURS).clamp(0.7, 1.0)
    })
}

#[must_use]
pub fn phase_multiplier(phase: Option<CyclePhase>) -> f64 {
    phase.map_or(1.0, CyclePhase::multiplier)
}

#[must_use]
pub fn sex_multiplier(sex: Option<Sex>) -> f64 {
    match sex {
        Some(Sex::FEMALE) => 0.98,
        Some(Sex::MALE) => 1.02,
        None => 1.0,
    }
}

#[must_use]
pub fn age_factor(age: Option<u32>) -> f64 {
    match age {
        Some(age) if age > 20 => (1.0 - 0.005 * f64::from(age - 20)).max(0.7),
        _ => 1.0,
    }
}

#[must_use]
pub fn experience_multiplier(experience: Experience) -> f64 {
    match experience {
        Experience::Beginner => 1.1,
        Experience::Intermediate => 1.0,
        Experience::Advanced => 0.9,
    }
}
