use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{ExerciseID, ExerciseResult, RPE, Reps, Weight};

pub type ExerciseHistory = BTreeMap<ExerciseID, ExerciseRecord>;

/// Personal record and past results of a single exercise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseRecord {
    pub entries: Vec<HistoryEntry>,
    pub best_weight: Option<Weight>,
    pub best_reps: Option<Reps>,
    pub last_trained: Option<DateTime<Utc>>,
}

impl ExerciseRecord {
    pub fn add(&mut self, result: &ExerciseResult) {
        self.entries.push(HistoryEntry::from(result));

        if self.best_weight.is_none_or(|best| result.weight > best) {
            self.best_weight = Some(result.weight);
            self.best_reps = result.best_reps();
            self.last_trained = Some(result.completed);
        }
    }

    /// A record only counts once a positive load was achieved.
    #[must_use]
    pub fn best_load(&self) -> Option<f64> {
        self.best_weight
            .filter(|w| !w.is_zero())
            .map(|w| f64::from(f32::from(w)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub weight: Weight,
    pub sets: u32,
    pub reps: Vec<Reps>,
    pub rpe: Option<RPE>,
    pub volume: f64,
}

impl From<&ExerciseResult> for HistoryEntry {
    fn from(value: &ExerciseResult) -> Self {
        Self {
            date: value.completed,
            weight: value.weight,
            sets: value.sets,
            reps: value.reps.clone(),
            rpe: value.rpe,
            volume: value.volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    fn result(weight: f32, reps: &[u32], completed: DateTime<Utc>) -> ExerciseResult {
        ExerciseResult {
            weight: Weight::new(weight).unwrap(),
            sets: u32::try_from(reps.len()).unwrap(),
            reps: reps.iter().map(|r| Reps::new(*r).unwrap()).collect(),
            rpe: Some(RPE::EIGHT),
            note: String::new(),
            completed,
        }
    }

    #[test]
    fn test_exercise_record_add() {
        let first = DateTime::<Utc>::default();
        let second = first + Duration::days(3);
        let third = second + Duration::days(3);
        let mut record = ExerciseRecord::default();
        assert_eq!(record.best_load(), None);

        record.add(&result(100.0, &[8, 8, 7], first));
        assert_eq!(record.best_weight, Some(Weight::new(100.0).unwrap()));
        assert_eq!(record.best_reps, Some(Reps::new(8).unwrap()));
        assert_eq!(record.last_trained, Some(first));

        record.add(&result(95.0, &[12, 12], second));
        assert_eq!(record.best_weight, Some(Weight::new(100.0).unwrap()));
        assert_eq!(record.last_trained, Some(first));

        record.add(&result(105.0, &[5, 4], third));
        assert_eq!(record.best_weight, Some(Weight::new(105.0).unwrap()));
        assert_eq!(record.best_reps, Some(Reps::new(5).unwrap()));
        assert_eq!(record.last_trained, Some(third));
        assert_eq!(record.best_load(), Some(105.0));

        assert_eq!(record.entries.len(), 3);
        assert_eq!(record.entries[1].date, second);
        assert_eq!(record.entries[1].volume, 95.0 * 2.0 * 12.0);
    }
}
