use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::{MuscleID, Weight};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub sex: Option<Sex>,
    pub birth_date: Option<NaiveDate>,
    pub body_weight: Option<Weight>,
    pub experience: Experience,
    pub goal: TrainingGoal,
    pub progression_rate: f64,
    pub cycle: Option<MenstrualCycle>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            sex: None,
            birth_date: None,
            body_weight: None,
            experience: Experience::default(),
            goal: TrainingGoal::default(),
            progression_rate: 0.02,
            cycle: None,
        }
    }
}

impl Profile {
    #[must_use]
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.birth_date?)
    }

    /// Only tracked for female trainees.
    #[must_use]
    pub fn cycle_phase(&self, today: NaiveDate) -> Option<CyclePhase> {
        if self.sex != Some(Sex::FEMALE) {
            return None;
        }
        self.cycle.as_ref()?.phase(today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    FEMALE,
    MALE,
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value {
            "female" => Sex::FEMALE,
            _ => Sex::MALE,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sex::FEMALE => "female",
                Sex::MALE => "male",
            }
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl From<&str> for Experience {
    fn from(value: &str) -> Self {
        match value {
            "beginner" => Experience::Beginner,
            "advanced" => Experience::Advanced,
            _ => Experience::Intermediate,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Experience::Beginner => "beginner",
                Experience::Intermediate => "intermediate",
                Experience::Advanced => "advanced",
            }
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrainingGoal {
    #[default]
    Balanced,
    Strength,
    Powerlifting,
    Hypertrophy,
    Longevity,
}

impl From<&str> for TrainingGoal {
    fn from(value: &str) -> Self {
        match value {
            "strength" => TrainingGoal::Strength,
            "powerlifting" => TrainingGoal::Powerlifting,
            "hypertrophy" => TrainingGoal::Hypertrophy,
            "longevity" => TrainingGoal::Longevity,
            _ => TrainingGoal::Balanced,
        }
    }
}

impl fmt::Display for TrainingGoal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrainingGoal::Balanced => "balanced",
                TrainingGoal::Strength => "strength",
                TrainingGoal::Powerlifting => "powerlifting",
                TrainingGoal::Hypertrophy => "hypertrophy",
                TrainingGoal::Longevity => "longevity",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenstrualCycle {
    pub last_period_start: NaiveDate,
    pub length: u32,
}

impl MenstrualCycle {
    pub const DEFAULT_LENGTH: u32 = 28;

    #[must_use]
    pub fn new(last_period_start: NaiveDate, length: Option<u32>) -> Self {
        Self {
            last_period_start,
            length: length
                .filter(|l| *l > 0)
                .unwrap_or(Self::DEFAULT_LENGTH),
        }
    }

    /// Returns `None` for a start date in the future.
    #[must_use]
    pub fn phase(&self, today: NaiveDate) -> Option<CyclePhase> {
        let days = (today - self.last_period_start).num_days();
        if days < 0 || self.length == 0 {
            return None;
        }
        let day = days % i64::from(self.length) + 1;
        Some(match day {
            1..=5 => CyclePhase::Menstrual,
            6..=13 => CyclePhase::Follicular,
            14..=17 => CyclePhase::Ovulatory,
            _ => CyclePhase::Luteal,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl CyclePhase {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            CyclePhase::Menstrual => 0.6,
            CyclePhase::Follicular => 1.0,
            CyclePhase::Ovulatory => 1.05,
            CyclePhase::Luteal => 0.8,
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CyclePhase::Menstrual => "menstrual",
                CyclePhase::Follicular => "follicular",
                CyclePhase::Ovulatory => "ovulatory",
                CyclePhase::Luteal => "luteal",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Injury {
    pub date: DateTime<Utc>,
    pub note: String,
    pub pain_level: u8,
}

impl Injury {
    #[must_use]
    pub fn affects(&self, muscle: MuscleID) -> bool {
        muscle.muscle().is_mentioned_in(&self.note)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepLog {
    pub date: DateTime<Utc>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub title: String,
    pub target: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
}
