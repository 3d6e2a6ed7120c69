use std::{fmt, slice::Iter};

use crate::{ExerciseHistory, ExerciseID, ExerciseRecord, MuscleID, TrainingSession};

const BENCH: [&str; 1] = ["Flat Bench Press"];
const SQUAT: [&str; 2] = ["Back Squat (high-bar)", "Front Squat"];
const DEADLIFT: [&str; 1] = ["Conventional Deadlift"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstStep,
    Consistent,
    Powerlifter,
    IronNeck,
    CenturyClub,
    LongevityMaster,
}

/// Training progress the achievements are checked against.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub sessions: &'a [TrainingSession],
    pub exercises: &'a ExerciseHistory,
    pub streak: u32,
    pub longevity_score: u32,
}

impl Achievement {
    pub fn iter() -> Iter<'static, Achievement> {
        static ACHIEVEMENTS: [Achievement; 6] = [
            Achievement::FirstStep,
            Achievement::Consistent,
            Achievement::Powerlifter,
            Achievement::IronNeck,
            Achievement::CenturyClub,
            Achievement::LongevityMaster,
        ];
        ACHIEVEMENTS.iter()
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstStep => "Complete 1 workout",
            Achievement::Consistent => "7 day streak",
            Achievement::Powerlifter => "Log Bench, Squat, and Deadlift",
            Achievement::IronNeck => "Log neck training 5 times",
            Achievement::CenturyClub => "100 total workouts",
            Achievement::LongevityMaster => "Longevity score of at least 80",
        }
    }

    #[must_use]
    pub fn is_unlocked(self, progress: &Progress) -> bool {
        match self {
            Achievement::FirstStep => !progress.sessions.is_empty(),
            Achievement::Consistent => progress.streak >= 7,
            Achievement::Powerlifter => [&BENCH[..], &SQUAT[..], &DEADLIFT[..]]
                .iter()
                .all(|lift| has_record(progress.exercises, lift)),
            Achievement::IronNeck => {
                progress
                    .sessions
                    .iter()
                    .filter(|s| s.trained_muscles().any(|m| m == MuscleID::Neck))
                    .count()
                    >= 5
            }
            Achievement::CenturyClub => progress.sessions.len() >= 100,
            Achievement::LongevityMaster => progress.longevity_score >= 80,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Achievement::FirstStep => "First Step",
                Achievement::Consistent => "Consistent",
                Achievement::Powerlifter => "Powerlifter",
                Achievement::IronNeck => "Iron Neck",
                Achievement::CenturyClub => "Century Club",
                Achievement::LongevityMaster => "Longevity Master",
            }
        )
    }
}

fn has_record(exercises: &ExerciseHistory, names: &[&str]) -> bool {
    names.iter().any(|name| {
        exercises
            .get(&ExerciseID::from_name(name))
            .and_then(ExerciseRecord::best_load)
            .is_some()
    })
}

#[must_use]
pub fn unlocked_achievements(progress: &Progress) -> Vec<Achievement> {
    Achievement::iter()
        .copied()
        .filter(|a| a.is_unlocked(progress))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        ExerciseEntry, ExerciseResult, Outcome, Prescription, Reps, TrainingSessionID, Weight,
    };

    use super::*;

    fn session(muscle: MuscleID, outcome: Option<Outcome>) -> TrainingSession {
        TrainingSession {
            id: TrainingSessionID::nil(),
            timestamp: DateTime::<Utc>::default(),
            archetype: None,
            exercises: vec![ExerciseEntry {
                exercise_id: ExerciseID::from(muscle.as_ref()),
                name: muscle.name().to_string(),
                muscles: vec![muscle],
                prescription: Prescription::default(),
                outcome,
                note: String::new(),
            }],
            summary: None,
            readiness: None,
            backup_recommended: None,
        }
    }

    fn completed() -> Option<Outcome> {
        Some(Outcome::Completed(ExerciseResult {
            weight: Weight::default(),
            sets: 1,
            reps: vec![Reps::new(10).unwrap()],
            rpe: None,
            note: String::new(),
            completed: DateTime::<Utc>::default(),
        }))
    }

    fn history(names: &[(&str, f32)]) -> ExerciseHistory {
        names
            .iter()
            .map(|(name, weight)| {
                let mut record = ExerciseRecord::default();
                record.add(&ExerciseResult {
                    weight: Weight::new(*weight).unwrap(),
                    sets: 1,
                    reps: vec![Reps::new(3).unwrap()],
                    rpe: None,
                    note: String::new(),
                    completed: DateTime::<Utc>::default(),
                });
                (ExerciseID::from_name(name), record)
            })
            .collect()
    }

    #[test]
    fn test_achievement_iter() {
        assert_eq!(Achievement::iter().count(), 6);
        for achievement in Achievement::iter() {
            assert!(!achievement.to_string().is_empty());
            assert!(!achievement.description().is_empty());
        }
    }

    #[test]
    fn test_unlocked_achievements_none() {
        let exercises = ExerciseHistory::new();

        assert!(
            unlocked_achievements(&Progress {
                sessions: &[],
                exercises: &exercises,
                streak: 0,
                longevity_score: 17,
            })
            .is_empty()
        );
    }

    #[rstest]
    #[case(6, false)]
    #[case(7, true)]
    fn test_consistent(#[case] streak: u32, #[case] expected: bool) {
        let exercises = ExerciseHistory::new();
        let progress = Progress {
            streak,
            ..progress(&[], &exercises)
        };

        assert_eq!(Achievement::Consistent.is_unlocked(&progress), expected);
    }

    #[rstest]
    #[case(&[("Flat Bench Press", 135.0), ("Back Squat (high-bar)", 185.0)], false)]
    #[case(
        &[
            ("Flat Bench Press", 135.0),
            ("Front Squat", 135.0),
            ("Conventional Deadlift", 225.0),
        ],
        true
    )]
    #[case(
        &[
            ("Flat Bench Press", 135.0),
            ("Back Squat (high-bar)", 185.0),
            ("Conventional Deadlift", 0.0),
        ],
        false
    )]
    fn test_powerlifter(#[case] names: &[(&str, f32)], #[case] expected: bool) {
        let exercises = history(names);

        assert_eq!(
            Achievement::Powerlifter.is_unlocked(&progress(&[], &exercises)),
            expected
        );
    }

    fn progress<'a>(
        sessions: &'a [TrainingSession],
        exercises: &'a ExerciseHistory,
    ) -> Progress<'a> {
        Progress {
            sessions,
            exercises,
            streak: 0,
            longevity_score: 0,
        }
    }

    #[test]
    fn test_iron_neck() {
        let exercises = ExerciseHistory::new();
        let mut sessions = vec![session(MuscleID::Neck, completed()); 4];
        sessions.push(session(MuscleID::Neck, Some(Outcome::Skipped)));
        sessions.push(session(MuscleID::DeepNeck, completed()));

        assert!(!Achievement::IronNeck.is_unlocked(&progress(&sessions, &exercises)));

        sessions.push(session(MuscleID::Neck, completed()));

        assert!(Achievement::IronNeck.is_unlocked(&progress(&sessions, &exercises)));
        assert_eq!(
            unlocked_achievements(&progress(&sessions, &exercises)),
            vec![Achievement::FirstStep, Achievement::IronNeck]
        );
    }

    #[test]
    fn test_century_club_and_longevity_master() {
        let exercises = ExerciseHistory::new();
        let sessions = vec![session(MuscleID::Chest, completed()); 100];

        assert_eq!(
            unlocked_achievements(&Progress {
                sessions: &sessions,
                exercises: &exercises,
                streak: 30,
                longevity_score: 80,
            }),
            vec![
                Achievement::FirstStep,
                Achievement::Consistent,
                Achievement::CenturyClub,
                Achievement::LongevityMaster,
            ]
        );
    }
}
