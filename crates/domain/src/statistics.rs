use chrono::{DateTime, Duration, Utc};

use crate::{Exercise, ExerciseHistory, ExerciseID, Reps, TrainingSession, Weight};

/// Summed volume of all finalized sessions.
pub fn total_volume<'a>(sessions: impl IntoIterator<Item = &'a TrainingSession>) -> f64 {
    sessions
        .into_iter()
        .filter_map(|s| s.summary.as_ref())
        .map(|s| s.total_volume)
        .sum()
}

/// Summed volume of the sessions within the trailing `days`.
pub fn volume_within<'a>(
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
    days: i64,
    now: DateTime<Utc>,
) -> f64 {
    let start = now - Duration::days(days);
    total_volume(sessions.into_iter().filter(|s| s.timestamp > start))
}

/// Acute (7 days) to chronic (weekly mean over 28 days) volume ratio.
///
/// Without any chronic volume the ratio is neutral.
#[must_use]
pub fn workload_ratio(sessions: &[TrainingSession], now: DateTime<Utc>) -> f64 {
    let acute = volume_within(sessions, 7, now);
    let chronic = volume_within(sessions, 28, now) / 4.0;
    if chronic > 0.0 { acute / chronic } else { 1.0 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecord {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub weight: Weight,
    pub reps: Option<Reps>,
    pub date: Option<DateTime<Utc>>,
}

/// Best lifts with a positive load, named after the catalog entry if there is one.
#[must_use]
pub fn personal_records(
    exercises: &ExerciseHistory,
    catalog: &[Exercise],
) -> Vec<PersonalRecord> {
    exercises
        .iter()
        .filter_map(|(id, record)| {
            let weight = record.best_weight.filter(|w| !w.is_zero())?;
            let name = catalog
                .iter()
                .find(|e| e.id() == *id)
                .map_or_else(|| id.replace('_', " "), |e| e.name.to_string());
            Some(PersonalRecord {
                exercise_id: id.clone(),
                name,
                weight,
                reps: record.best_reps,
                date: record.last_trained,
            })
        })
        .collect()
}
