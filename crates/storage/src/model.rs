use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use continuity_domain as domain;
use log::warn;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DataError {
    #[error("unknown muscle: {0}")]
    UnknownMuscle(String),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidRPE(#[from] domain::RPEError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct State {
    pub profile: Profile,
    pub sessions: Vec<TrainingSession>,
    pub exercises: BTreeMap<String, ExerciseRecord>,
    pub goals: Vec<Goal>,
    pub injuries: Vec<Injury>,
    pub sleep: Vec<SleepLog>,
    pub last_export: Option<DateTime<Utc>>,
}

impl From<&domain::TrainingState> for State {
    fn from(value: &domain::TrainingState) -> Self {
        Self {
            profile: Profile::from(&value.profile),
            sessions: value.sessions.iter().map(TrainingSession::from).collect(),
            exercises: value
                .exercises
                .iter()
                .map(|(id, record)| (id.to_string(), ExerciseRecord::from(record)))
                .collect(),
            goals: value.goals.iter().map(Goal::from).collect(),
            injuries: value.injuries.iter().map(Injury::from).collect(),
            sleep: value.sleep.iter().map(SleepLog::from).collect(),
            last_export: value.last_export,
        }
    }
}

impl TryFrom<State> for domain::TrainingState {
    type Error = DataError;

    fn try_from(value: State) -> Result<Self, Self::Error> {
        Ok(Self {
            profile: domain::Profile::try_from(value.profile)?,
            sessions: value
                .sessions
                .into_iter()
                .map(domain::TrainingSession::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            exercises: value
                .exercises
                .into_iter()
                .map(|(id, record)| Ok((domain::ExerciseID::from(id), record.try_into()?)))
                .collect::<Result<domain::ExerciseHistory, DataError>>()?,
            goals: value.goals.into_iter().map(domain::Goal::from).collect(),
            injuries: value
                .injuries
                .into_iter()
                .map(domain::Injury::from)
                .collect(),
            sleep: value
                .sleep
                .into_iter()
                .map(domain::SleepLog::from)
                .collect(),
            last_export: value.last_export,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub body_weight: Option<f32>,
    pub experience: String,
    pub goal: String,
    pub progression_rate: Option<f64>,
    pub cycle_start: Option<NaiveDate>,
    pub cycle_length: Option<u32>,
}

impl From<&domain::Profile> for Profile {
    fn from(value: &domain::Profile) -> Self {
        Self {
            name: value.name.clone(),
            sex: value.sex.map(|sex| sex.to_string()),
            birth_date: value.birth_date,
            body_weight: value.body_weight.map(f32::from),
            experience: value.experience.to_string(),
            goal: value.goal.to_string(),
            progression_rate: Some(value.progression_rate),
            cycle_start: value.cycle.map(|c| c.last_period_start),
            cycle_length: value.cycle.map(|c| c.length),
        }
    }
}

impl TryFrom<Profile> for domain::Profile {
    type Error = DataError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            sex: value.sex.as_deref().map(domain::Sex::from),
            birth_date: value.birth_date,
            body_weight: value.body_weight.map(domain::Weight::new).transpose()?,
            experience: domain::Experience::from(value.experience.as_str()),
            goal: domain::TrainingGoal::from(value.goal.as_str()),
            progression_rate: value
                .progression_rate
                .unwrap_or(domain::Profile::default().progression_rate),
            cycle: value
                .cycle_start
                .map(|start| domain::MenstrualCycle::new(start, value.cycle_length)),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingSession {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub archetype: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub readiness: Option<u8>,
    #[serde(default)]
    pub backup_recommended: Option<bool>,
}

impl From<&domain::TrainingSession> for TrainingSession {
    fn from(value: &domain::TrainingSession) -> Self {
        Self {
            id: *value.id,
            timestamp: value.timestamp,
            archetype: value.archetype.map(|a| a.as_ref().to_string()),
            exercises: value.exercises.iter().map(ExerciseEntry::from).collect(),
            summary: value.summary.map(Summary::from),
            readiness: value.readiness,
            backup_recommended: value.backup_recommended,
        }
    }
}

impl TryFrom<TrainingSession> for domain::TrainingSession {
    type Error = DataError;

    fn try_from(value: TrainingSession) -> Result<Self, Self::Error> {
        let archetype = value.archetype.as_deref().and_then(|archetype| {
            let id = archetype.parse::<domain::ArchetypeID>().ok();
            if id.is_none() {
                warn!("ignoring unknown archetype {archetype}");
            }
            id
        });
        Ok(Self {
            id: value.id.into(),
            timestamp: value.timestamp,
            archetype,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            summary: value.summary.map(domain::Summary::from),
            readiness: value.readiness,
            backup_recommended: value.backup_recommended,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub exercise_id: String,
    pub name: String,
    pub muscles: Vec<String>,
    pub prescription: Prescription,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub note: String,
}

impl From<&domain::ExerciseEntry> for ExerciseEntry {
    fn from(value: &domain::ExerciseEntry) -> Self {
        Self {
            exercise_id: value.exercise_id.to_string(),
            name: value.name.clone(),
            muscles: value.muscles.iter().map(|m| m.as_ref().to_string()).collect(),
            prescription: Prescription::from(&value.prescription),
            outcome: value.outcome.as_ref().map(Outcome::from),
            note: value.note.clone(),
        }
    }
}

impl TryFrom<ExerciseEntry> for domain::ExerciseEntry {
    type Error = DataError;

    fn try_from(value: ExerciseEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            name: value.name,
            muscles: value
                .muscles
                .iter()
                .map(|m| {
                    m.parse::<domain::MuscleID>()
                        .map_err(|_| DataError::UnknownMuscle(m.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            prescription: value.prescription.into(),
            outcome: value.outcome.map(domain::Outcome::try_from).transpose()?,
            note: value.note,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Prescription {
    pub load: u32,
    pub sets: u32,
    pub reps: String,
    #[serde(default)]
    pub rationale: String,
}

impl From<&domain::Prescription> for Prescription {
    fn from(value: &domain::Prescription) -> Self {
        Self {
            load: value.load,
            sets: value.sets,
            reps: value.reps.clone(),
            rationale: value.rationale.clone(),
        }
    }
}

impl From<Prescription> for domain::Prescription {
    fn from(value: Prescription) -> Self {
        Self {
            load: value.load,
            sets: value.sets,
            reps: value.reps,
            rationale: value.rationale,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Completed(ExerciseResult),
    Skipped,
}

impl From<&domain::Outcome> for Outcome {
    fn from(value: &domain::Outcome) -> Self {
        match value {
            domain::Outcome::Completed(result) => Outcome::Completed(result.into()),
            domain::Outcome::Skipped => Outcome::Skipped,
        }
    }
}

impl TryFrom<Outcome> for domain::Outcome {
    type Error = DataError;

    fn try_from(value: Outcome) -> Result<Self, Self::Error> {
        Ok(match value {
            Outcome::Completed(result) => domain::Outcome::Completed(result.try_into()?),
            Outcome::Skipped => domain::Outcome::Skipped,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseResult {
    pub weight: f32,
    pub sets: u32,
    pub reps: Vec<u32>,
    pub rpe: Option<f32>,
    #[serde(default)]
    pub note: String,
    pub completed: DateTime<Utc>,
}

impl From<&domain::ExerciseResult> for ExerciseResult {
    fn from(value: &domain::ExerciseResult) -> Self {
        Self {
            weight: value.weight.into(),
            sets: value.sets,
            reps: value.reps.iter().map(|r| u32::from(*r)).collect(),
            rpe: value.rpe.map(f32::from),
            note: value.note.clone(),
            completed: value.completed,
        }
    }
}

impl TryFrom<ExerciseResult> for domain::ExerciseResult {
    type Error = DataError;

    fn try_from(value: ExerciseResult) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::new(value.weight)?,
            sets: value.sets,
            reps: reps(&value.reps)?,
            rpe: value.rpe.map(domain::RPE::new).transpose()?,
            note: value.note,
            completed: value.completed,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_volume: f64,
    pub average_rpe: Option<f64>,
    pub completed_exercises: usize,
}

impl From<domain::Summary> for Summary {
    fn from(value: domain::Summary) -> Self {
        Self {
            total_volume: value.total_volume,
            average_rpe: value.average_rpe,
            completed_exercises: value.completed_exercises,
        }
    }
}

impl From<Summary> for domain::Summary {
    fn from(value: Summary) -> Self {
        Self {
            total_volume: value.total_volume,
            average_rpe: value.average_rpe,
            completed_exercises: value.completed_exercises,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExerciseRecord {
    pub entries: Vec<HistoryEntry>,
    pub best_weight: Option<f32>,
    pub best_reps: Option<u32>,
    pub last_trained: Option<DateTime<Utc>>,
}

impl From<&domain::ExerciseRecord> for ExerciseRecord {
    fn from(value: &domain::ExerciseRecord) -> Self {
        Self {
            entries: value.entries.iter().map(HistoryEntry::from).collect(),
            best_weight: value.best_weight.map(f32::from),
            best_reps: value.best_reps.map(u32::from),
            last_trained: value.last_trained,
        }
    }
}

impl TryFrom<ExerciseRecord> for domain::ExerciseRecord {
    type Error = DataError;

    fn try_from(value: ExerciseRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            entries: value
                .entries
                .into_iter()
                .map(domain::HistoryEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            best_weight: value.best_weight.map(domain::Weight::new).transpose()?,
            best_reps: value.best_reps.map(domain::Reps::new).transpose()?,
            last_trained: value.last_trained,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub weight: f32,
    pub sets: u32,
    pub reps: Vec<u32>,
    pub rpe: Option<f32>,
    pub volume: f64,
}

impl From<&domain::HistoryEntry> for HistoryEntry {
    fn from(value: &domain::HistoryEntry) -> Self {
        Self {
            date: value.date,
            weight: value.weight.into(),
            sets: value.sets,
            reps: value.reps.iter().map(|r| u32::from(*r)).collect(),
            rpe: value.rpe.map(f32::from),
            volume: value.volume,
        }
    }
}

impl TryFrom<HistoryEntry> for domain::HistoryEntry {
    type Error = DataError;

    fn try_from(value: HistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date,
            weight: domain::Weight::new(value.weight)?,
            sets: value.sets,
            reps: reps(&value.reps)?,
            rpe: value.rpe.map(domain::RPE::new).transpose()?,
            volume: value.volume,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub title: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl From<&domain::Goal> for Goal {
    fn from(value: &domain::Goal) -> Self {
        Self {
            title: value.title.clone(),
            target: value.target.clone(),
            deadline: value.deadline,
            completed: value.completed,
        }
    }
}

impl From<Goal> for domain::Goal {
    fn from(value: Goal) -> Self {
        Self {
            title: value.title,
            target: value.target,
            deadline: value.deadline,
            completed: value.completed,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Injury {
    pub date: DateTime<Utc>,
    pub note: String,
    #[serde(default)]
    pub pain_level: u8,
}

impl From<&domain::Injury> for Injury {
    fn from(value: &domain::Injury) -> Self {
        Self {
            date: value.date,
            note: value.note.clone(),
            pain_level: value.pain_level,
        }
    }
}

impl From<Injury> for domain::Injury {
    fn from(value: Injury) -> Self {
        Self {
            date: value.date,
            note: value.note,
            pain_level: value.pain_level,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SleepLog {
    pub date: DateTime<Utc>,
    pub hours: f64,
}

impl From<&domain::SleepLog> for SleepLog {
    fn from(value: &domain::SleepLog) -> Self {
        Self {
            date: value.date,
            hours: value.hours,
        }
    }
}

impl From<SleepLog> for domain::SleepLog {
    fn from(value: SleepLog) -> Self {
        Self {
            date: value.date,
            hours: value.hours,
        }
    }
}

fn reps(values: &[u32]) -> Result<Vec<domain::Reps>, DataError> {
    values
        .iter()
        .map(|r| domain::Reps::new(*r).map_err(DataError::from))
        .collect()
}
