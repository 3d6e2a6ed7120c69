use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    ArchetypeID, ExerciseID, LogInputError, MuscleID, Prescription, RPE, Reps, Weight,
    training::mean,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSession {
    pub id: TrainingSessionID,
    pub timestamp: DateTime<Utc>,
    /// `None` for sessions whose archetype is not part of the rotation.
    pub archetype: Option<ArchetypeID>,
    pub exercises: Vec<ExerciseEntry>,
    pub summary: Option<Summary>,
    pub readiness: Option<u8>,
    pub backup_recommended: Option<bool>,
}

impl TrainingSession {
    #[must_use]
    pub fn muscles(&self) -> BTreeSet<MuscleID> {
        self.exercises
            .iter()
            .flat_map(|e| e.muscles.iter().copied())
            .collect()
    }

    /// Muscles touched by completed, non-skipped exercises.
    pub fn trained_muscles(&self) -> impl Iterator<Item = MuscleID> + '_ {
        self.exercises
            .iter()
            .filter(|e| e.is_completed())
            .flat_map(|e| e.muscles.iter().copied())
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub fn has_logged_results(&self) -> bool {
        self.exercises.iter().any(|e| e.outcome.is_some())
    }

    pub fn record_result(
        &mut self,
        index: usize,
        input: ResultInput,
        completed: DateTime<Utc>,
    ) -> Result<&ExerciseEntry, LogInputError> {
        if self.is_finalized() {
            return Err(LogInputError::AlreadyFinalized);
        }
        let result = input.validate(completed)?;
        let entry = self
            .exercises
            .get_mut(index)
            .ok_or(LogInputError::IndexOutOfRange(index))?;
        entry.note.clone_from(&result.note);
        entry.outcome = Some(Outcome::Completed(result));
        Ok(entry)
    }

    pub fn skip(&mut self, index: usize, note: &str) -> Result<(), LogInputError> {
        if self.is_finalized() {
            return Err(LogInputError::AlreadyFinalized);
        }
        let entry = self
            .exercises
            .get_mut(index)
            .ok_or(LogInputError::IndexOutOfRange(index))?;
        entry.note = if note.trim().is_empty() {
            "Skipped".to_string()
        } else {
            note.to_string()
        };
        entry.outcome = Some(Outcome::Skipped);
        Ok(())
    }

    #[must_use]
    pub fn summarize(&self) -> Summary {
        let completed = self
            .exercises
            .iter()
            .filter_map(ExerciseEntry::result)
            .collect::<Vec<_>>();
        Summary {
            total_volume: completed.iter().map(|r| r.volume()).sum(),
            average_rpe: mean(completed.iter().filter_map(|r| r.rpe).map(f64::from))
                .map(|rpe| (rpe * 10.0).round() / 10.0),
            completed_exercises: completed.len(),
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrainingSessionID(Uuid);

impl TrainingSessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for TrainingSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TrainingSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub muscles: Vec<MuscleID>,
    pub prescription: Prescription,
    pub outcome: Option<Outcome>,
    pub note: String,
}

impl ExerciseEntry {
    #[must_use]
    pub fn result(&self) -> Option<&ExerciseResult> {
        match &self.outcome {
            Some(Outcome::Completed(result)) => Some(result),
            Some(Outcome::Skipped) | None => None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.result().is_some()
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Skipped))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed(ExerciseResult),
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseResult {
    pub weight: Weight,
    pub sets: u32,
    pub reps: Vec<Reps>,
    pub rpe: Option<RPE>,
    pub note: String,
    pub completed: DateTime<Utc>,
}

impl ExerciseResult {
    #[must_use]
    pub fn avg_reps(&self) -> Option<f64> {
        mean(self.reps.iter().map(|r| f64::from(u32::from(*r))))
    }

    /// Weight times sets times mean reps, zero without recorded reps.
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(f32::from(self.weight)) * f64::from(self.sets) * self.avg_reps().unwrap_or(0.0)
    }

    #[must_use]
    pub fn best_reps(&self) -> Option<Reps> {
        self.reps
            .iter()
            .copied()
            .max_by_key(|r| u32::from(*r))
    }
}

/// Unvalidated input of a result entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultInput {
    pub weight: Option<Weight>,
    pub sets: u32,
    pub reps: Vec<Reps>,
    pub rpe: Option<RPE>,
    pub note: String,
}

impl ResultInput {
    pub fn validate(self, completed: DateTime<Utc>) -> Result<ExerciseResult, LogInputError> {
        let weight = match self.weight {
            Some(weight) if !weight.is_zero() => weight,
            _ => return Err(LogInputError::MissingWeight),
        };
        if self.sets == 0 {
            return Err(LogInputError::NoSets);
        }
        Ok(ExerciseResult {
            weight,
            sets: self.sets,
            reps: self.reps,
            rpe: self.rpe,
            note: self.note,
            completed,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_volume: f64,
    pub average_rpe: Option<f64>,
    pub completed_exercises: usize,
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    static NOW: LazyLock<DateTime<Utc>> = LazyLock::new(|| {
        DateTime::parse_from_rfc3339("2025-05-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    });

    fn entry(name: &str, muscles: &[MuscleID]) -> ExerciseEntry {
        ExerciseEntry {
            exercise_id: ExerciseID::from_name(name),
            name: name.to_string(),
            muscles: muscles.to_vec(),
            prescription: Prescription {
                load: 100,
                sets: 3,
                reps: "8-12".to_string(),
                rationale: String::new(),
            },
            outcome: None,
            note: String::new(),
        }
    }

    fn session() -> TrainingSession {
        TrainingSession {
            id: TrainingSessionID::from(1_u128),
            timestamp: *NOW,
            archetype: Some(ArchetypeID::Push),
            exercises: vec![
                entry("Barbell Bench Press", &[MuscleID::Chest, MuscleID::Triceps]),
                entry("Overhead Press", &[MuscleID::Shoulders, MuscleID::Triceps]),
                entry("Cable Pushdown", &[MuscleID::Triceps]),
            ],
            summary: None,
            readiness: Some(92),
            backup_recommended: Some(false),
        }
    }

    fn input(weight: f32, sets: u32, reps: &[u32], rpe: Option<f32>) -> ResultInput {
        ResultInput {
            weight: Some(Weight::new(weight).unwrap()),
            sets,
            reps: reps.iter().map(|r| Reps::new(*r).unwrap()).collect(),
            rpe: rpe.map(|v| RPE::new(v).unwrap()),
            note: String::new(),
        }
    }

    #[test]
    fn test_training_session_id_nil() {
        assert!(TrainingSessionID::nil().is_nil());
        assert_eq!(TrainingSessionID::nil(), TrainingSessionID::default());
    }

    #[test]
    fn test_training_session_muscles() {
        assert_eq!(
            session().muscles(),
            BTreeSet::from([MuscleID::Chest, MuscleID::Shoulders, MuscleID::Triceps])
        );
    }

    #[test]
    fn test_record_result() {
        let mut session = session();
        assert!(!session.has_logged_results());

        let entry = session
            .record_result(0, input(135.0, 3, &[10, 8, 6], Some(8.0)), *NOW)
            .unwrap();

        assert_approx_eq!(entry.result().unwrap().volume(), 135.0 * 3.0 * 8.0);
        assert!(session.has_logged_results());
        assert!(session.exercises[0].is_completed());
        assert_eq!(
            session.trained_muscles().collect::<Vec<_>>(),
            vec![MuscleID::Chest, MuscleID::Triceps]
        );
    }

    #[rstest]
    #[case(
        ResultInput { weight: None, sets: 3, ..ResultInput::default() },
        LogInputError::MissingWeight
    )]
    #[case(
        ResultInput { weight: Some(Weight::default()), sets: 3, ..ResultInput::default() },
        LogInputError::MissingWeight
    )]
    #[case(
        ResultInput { weight: Some(Weight::new(50.0).unwrap()), sets: 0, ..ResultInput::default() },
        LogInputError::NoSets
    )]
    fn test_record_result_invalid_input(
        #[case] input: ResultInput,
        #[case] error: LogInputError,
    ) {
        let mut session = session();

        assert_eq!(session.record_result(1, input, *NOW), Err(error));
        assert_eq!(session, self::session());
    }

    #[test]
    fn test_record_result_index_out_of_range() {
        let mut session = session();

        assert_eq!(
            session.record_result(3, input(50.0, 3, &[10], None), *NOW),
            Err(LogInputError::IndexOutOfRange(3))
        );
    }

    #[test]
    fn test_record_result_after_finalization() {
        let mut session = session();
        session.summary = Some(session.summarize());

        assert_eq!(
            session.record_result(0, input(50.0, 3, &[10], None), *NOW),
            Err(LogInputError::AlreadyFinalized)
        );
        assert_eq!(session.skip(0, ""), Err(LogInputError::AlreadyFinalized));
    }

    #[rstest]
    #[case("", "Skipped")]
    #[case("  ", "Skipped")]
    #[case("Shoulder hurts", "Shoulder hurts")]
    fn test_skip(#[case] note: &str, #[case] expected: &str) {
        let mut session = session();

        session.skip(1, note).unwrap();

        assert!(session.exercises[1].is_skipped());
        assert_eq!(session.exercises[1].note, expected);
        assert!(session.has_logged_results());
        assert_eq!(session.trained_muscles().count(), 0);
    }

    #[test]
    fn test_summarize() {
        let mut session = session();
        session
            .record_result(0, input(100.0, 3, &[10, 10, 10], Some(8.0)), *NOW)
            .unwrap();
        session
            .record_result(1, input(50.0, 2, &[8, 12], Some(7.5)), *NOW)
            .unwrap();
        session.skip(2, "").unwrap();

        let summary = session.summarize();

        assert_approx_eq!(summary.total_volume, 3000.0 + 1000.0);
        assert_approx_eq!(summary.average_rpe.unwrap(), 7.8);
        assert_eq!(summary.completed_exercises, 2);
    }

    #[test]
    fn test_summarize_without_results() {
        assert_eq!(
            session().summarize(),
            Summary {
                total_volume: 0.0,
                average_rpe: None,
                completed_exercises: 0,
            }
        );
    }

    #[rstest]
    #[case(&[], None, 0.0)]
    #[case(&[5, 7], Some(6.0), 60.0)]
    fn test_exercise_result_volume(
        #[case] reps: &[u32],
        #[case] avg_reps: Option<f64>,
        #[case] volume: f64,
    ) {
        let result = input(10.0, 1, reps, None).validate(*NOW).unwrap();

        assert_eq!(result.avg_reps(), avg_reps);
        assert_approx_eq!(result.volume(), volume);
    }
}
