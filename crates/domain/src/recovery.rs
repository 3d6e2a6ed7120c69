use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{Muscle, MuscleID, TrainingSession};

pub type MuscleLastTrained = BTreeMap<MuscleID, DateTime<Utc>>;

/// Derives the most recent training time of each muscle from completed exercises.
pub fn muscle_last_trained<'a>(
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
) -> MuscleLastTrained {
    let mut last_trained = MuscleLastTrained::new();
    for session in sessions {
        for muscle in session.trained_muscles() {
            last_trained
                .entry(muscle)
                .and_modify(|t| *t = (*t).max(session.timestamp))
                .or_insert(session.timestamp);
        }
    }
    last_trained
}

/// Number of sessions within the trailing seven days.
pub fn recent_session_count<'a>(
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
    now: DateTime<Utc>,
) -> usize {
    let start = now - Duration::days(7);
    sessions
        .into_iter()
        .filter(|s| s.timestamp > start)
        .count()
}

#[must_use]
pub fn systemic_fatigue_multiplier(recent_sessions: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count = recent_sessions as f64;
    (1.0 + 0.05 * count.powf(1.5)).min(2.0)
}

#[must_use]
pub fn effective_rest_days(muscle: &Muscle, fatigue: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = (f64::from(muscle.rest_days) * fatigue).round().max(0.0) as u32;
    days.max(1)
}

/// Whole days elapsed, never negative.
#[must_use]
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days().max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    NotTrained,
    Resting,
    Soon,
    Ready,
}

impl fmt::Display for RecoveryState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecoveryState::NotTrained => "Not trained",
                RecoveryState::Resting => "Resting",
                RecoveryState::Soon => "Soon",
                RecoveryState::Ready => "Ready",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryStatus {
    pub state: RecoveryState,
    pub percent: f64,
    pub days_since: Option<i64>,
    pub rest_days: u32,
}

#[must_use]
pub fn recovery_status(
    muscle: &Muscle,
    last_trained: Option<DateTime<Utc>>,
    fatigue: f64,
    now: DateTime<Utc>,
) -> RecoveryStatus {
    let needed = effective_rest_days(muscle, fatigue);
    let Some(last_trained) = last_trained else {
        return RecoveryStatus {
            state: RecoveryState::NotTrained,
            percent: 0.0,
            days_since: None,
            rest_days: needed,
        };
    };
    let days = days_since(last_trained, now);
    let needed_days = i64::from(needed);
    #[allow(clippy::cast_precision_loss)]
    let percent = (100.0 * days as f64 / f64::from(needed)).min(100.0);
    let state = if days >= needed_days {
        RecoveryState::Ready
    } else if days >= needed_days - 1 {
        RecoveryState::Soon
    } else {
        RecoveryState::Resting
    };
    RecoveryStatus {
        state,
        percent,
        days_since: Some(days),
        rest_days: needed,
    }
}

/// Muscles trained at least once whose effective rest period has passed.
#[must_use]
pub fn ready_muscles(
    last_trained: &MuscleLastTrained,
    fatigue: f64,
    now: DateTime<Utc>,
) -> Vec<MuscleID> {
    MuscleID::iter()
        .copied()
        .filter(|m| {
            last_trained.get(m).is_some_and(|t| {
                days_since(*t, now) >= i64::from(effective_rest_days(m.muscle(), fatigue))
            })
        })
        .collect()
}

/// Longevity, hand and foot muscles that have never been trained.
#[must_use]
pub fn neglected_muscles(last_trained: &MuscleLastTrained) -> Vec<MuscleID> {
    MuscleID::iter()
        .copied()
        .filter(|m| m.category().is_longevity() && !last_trained.contains_key(m))
        .collect()
}

/// Consecutive days with at least one session, ending today or yesterday.
pub fn streak<'a>(
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
    today: NaiveDate,
) -> u32 {
    let dates = sessions
        .into_iter()
        .map(|s| s.timestamp.date_naive())
        .collect::<BTreeSet<_>>();
    let mut day = if dates.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut result = 0;
    while dates.contains(&day) {
        result += 1;
        day -= Duration::days(1);
    }
    result
}
