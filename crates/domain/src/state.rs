use chrono::{DateTime, Duration, Utc};

use crate::{
    ExerciseHistory, ExerciseID, ExerciseResult, Goal, Injury, MuscleLastTrained, Profile,
    ReadError, SleepLog, TrainingSession, WriteError, muscle_last_trained,
    recent_session_count, systemic_fatigue_multiplier,
};

pub trait StateRepository {
    fn read_state(&self) -> Result<TrainingState, ReadError>;
    fn write_state(&self, state: &TrainingState) -> Result<(), WriteError>;
    fn read_ongoing_session(&self) -> Result<Option<TrainingSession>, ReadError>;
    fn write_ongoing_session(&self, session: Option<&TrainingSession>) -> Result<(), WriteError>;
}

/// Everything persisted about a trainee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingState {
    pub profile: Profile,
    /// Finalized sessions in chronological order.
    pub sessions: Vec<TrainingSession>,
    pub exercises: ExerciseHistory,
    pub goals: Vec<Goal>,
    pub injuries: Vec<Injury>,
    pub sleep: Vec<SleepLog>,
    pub last_export: Option<DateTime<Utc>>,
}

impl TrainingState {
    #[must_use]
    pub fn last_trained(&self) -> MuscleLastTrained {
        muscle_last_trained(&self.sessions)
    }

    #[must_use]
    pub fn fatigue(&self, now: DateTime<Utc>) -> f64 {
        systemic_fatigue_multiplier(recent_session_count(&self.sessions, now))
    }

    #[must_use]
    pub fn backup_recommended(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        self.last_export.is_none_or(|t| now - t > interval)
    }

    pub fn add_result(&mut self, exercise_id: &ExerciseID, result: &ExerciseResult) {
        self.exercises
            .entry(exercise_id.clone())
            .or_default()
            .add(result);
    }

    /// Restores chronological order, e.g. after an import.
    pub fn sort_sessions(&mut self) {
        self.sessions.sort_by_key(|s| s.timestamp);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{TrainingSessionID, Weight};

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-05-20T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(1), false)]
    #[case(Some(7), false)]
    #[case(Some(8), true)]
    fn test_backup_recommended(#[case] days_ago: Option<i64>, #[case] expected: bool) {
        let state = TrainingState {
            last_export: days_ago.map(|d| now() - Duration::days(d)),
            ..TrainingState::default()
        };

        assert_eq!(state.backup_recommended(now(), Duration::days(7)), expected);
    }

    #[test]
    fn test_add_result() {
        let mut state = TrainingState::default();
        let id = ExerciseID::from("goblet_squat");
        let result = ExerciseResult {
            weight: Weight::new(40.0).unwrap(),
            sets: 3,
            reps: vec![],
            rpe: None,
            note: String::new(),
            completed: now(),
        };

        state.add_result(&id, &result);
        state.add_result(&id, &result);

        assert_eq!(state.exercises[&id].entries.len(), 2);
        assert_eq!(state.exercises[&id].best_load(), Some(40.0));
    }

    #[test]
    fn test_sort_sessions() {
        let session = |days_ago: i64, id: u128| TrainingSession {
            id: TrainingSessionID::from(id),
            timestamp: now() - Duration::days(days_ago),
            archetype: None,
            exercises: vec![],
            summary: None,
            readiness: None,
            backup_recommended: None,
        };
        let mut state = TrainingState {
            sessions: vec![session(1, 1), session(5, 2), session(3, 3)],
            ..TrainingState::default()
        };

        state.sort_sessions();

        assert_eq!(
            state.sessions.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![
                TrainingSessionID::from(2_u128),
                TrainingSessionID::from(3_u128),
                TrainingSessionID::from(1_u128)
            ]
        );
    }

    #[test]
    fn test_fatigue() {
        let state = TrainingState::default();

        assert_eq!(state.fatigue(now()), 1.0);
        assert!(state.last_trained().is_empty());
    }
}
