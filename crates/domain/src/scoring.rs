use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::Rng;

use crate::{
    AgingRisk, Archetype, Category, Injury, MuscleID, MuscleLastTrained, TrainingGoal,
    TrainingSession, Tuning, days_since, effective_rest_days,
};

pub type TrainingFrequency = BTreeMap<MuscleID, u32>;

const FREQUENCY_WINDOW_DAYS: i64 = 30;
const INJURY_WINDOW_DAYS: i64 = 14;
const JITTER: f64 = 0.1;

/// Muscles carrying high tendon stress.
const TENDON_STRESS: [MuscleID; 7] = [
    MuscleID::Supraspinatus,
    MuscleID::Infraspinatus,
    MuscleID::Subscapularis,
    MuscleID::Popliteus,
    MuscleID::Brachioradialis,
    MuscleID::Forearms,
    MuscleID::ArticularisGenus,
];

/// Muscles driving the big barbell lifts.
const MAIN_LIFTS: [MuscleID; 6] = [
    MuscleID::Quads,
    MuscleID::Hamstrings,
    MuscleID::Glutes,
    MuscleID::Chest,
    MuscleID::Back,
    MuscleID::Erectors,
];

/// Everything the score of a single muscle depends on, apart from jitter.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub last_trained: &'a MuscleLastTrained,
    pub frequency: &'a TrainingFrequency,
    pub injuries: &'a [Injury],
    pub goal: TrainingGoal,
    pub global_readiness: f64,
    pub fatigue: f64,
    pub tuning: &'a Tuning,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub muscle: MuscleID,
    pub score: f64,
}

/// Completed exercises per muscle within the trailing 30 days.
pub fn training_frequency<'a>(
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
    now: DateTime<Utc>,
) -> TrainingFrequency {
    let start = now - Duration::days(FREQUENCY_WINDOW_DAYS);
    let mut frequency = TrainingFrequency::new();
    for session in sessions.into_iter().filter(|s| s.timestamp > start) {
        for muscle in session.trained_muscles() {
            *frequency.entry(muscle).or_default() += 1;
        }
    }
    frequency
}

#[must_use]
pub fn sigmoid(steepness: f64, x: f64) -> f64 {
    1.0 / (1.0 + (-steepness * x).exp())
}

/// Mandatory muscles are excluded, and calves only qualify on leg-focused days.
#[must_use]
pub fn is_eligible(muscle: MuscleID, archetype: &Archetype) -> bool {
    !archetype.is_mandatory(muscle) && (muscle != MuscleID::Calves || archetype.leg_focused)
}

#[must_use]
pub fn goal_factor(goal: TrainingGoal, muscle: MuscleID) -> f64 {
    let category = muscle.category();
    match goal {
        TrainingGoal::Strength | TrainingGoal::Powerlifting => {
            let mut factor = 1.0;
            if category == Category::Major {
                factor *= 1.1;
            }
            if MAIN_LIFTS.contains(&muscle) {
                factor *= 1.2;
            }
            factor
        }
        TrainingGoal::Longevity if category.is_longevity() => 1.5,
        TrainingGoal::Hypertrophy if category == Category::Major => 1.3,
        _ => 1.0,
    }
}

#[must_use]
pub fn tendon_factor(muscle: MuscleID) -> f64 {
    if TENDON_STRESS.contains(&muscle) {
        0.95
    } else {
        1.0
    }
}

#[must_use]
pub fn injury_factor(muscle: MuscleID, injuries: &[Injury], now: DateTime<Utc>) -> f64 {
    let start = now - Duration::days(INJURY_WINDOW_DAYS);
    if injuries
        .iter()
        .any(|injury| injury.date > start && injury.affects(muscle))
    {
        0.2
    } else {
        1.0
    }
}

impl ScoringContext<'_> {
    #[must_use]
    pub fn score(&self, muscle: MuscleID, jitter: f64) -> f64 {
        let definition = muscle.muscle();
        let rest_days = f64::from(effective_rest_days(definition, self.fatigue));
        #[allow(clippy::cast_precision_loss)]
        let days = self
            .last_trained
            .get(&muscle)
            .map(|t| days_since(*t, self.now) as f64);

        let ratio = days.map_or(f64::INFINITY, |d| d / rest_days);
        let local_recovery = sigmoid(self.tuning.recovery_steepness, ratio - 1.0);
        let adjusted_recovery = local_recovery * self.global_readiness;
        let frequency = f64::from(self.frequency.get(&muscle).copied().unwrap_or(0));
        let frequency_factor = (-frequency / 3.0).exp();
        let risk_urgency = if definition.aging_risk == Some(AgingRisk::High)
            && definition.category.is_longevity()
        {
            days.map_or(2.0, |d| (1.0 + d / 14.0).min(2.0))
        } else {
            1.0
        };
        let novelty_boost = if days.is_none() { 0.5 } else { 0.0 };
        let coverage_urgency = days.map_or(3.0, |d| (d / (rest_days * 1.5)).powi(2).min(3.0));

        let score = adjusted_recovery
            * frequency_factor
            * risk_urgency
            * goal_factor(self.goal, muscle)
            * injury_factor(muscle, self.injuries, self.now)
            * tendon_factor(muscle)
            * coverage_urgency
            + novelty_boost
            + jitter;
        score.max(0.0)
    }

    /// Scores every eligible muscle and keeps the best ones, highest first.
    pub fn candidate_pool(&self, archetype: &Archetype, rng: &mut impl Rng) -> Vec<Candidate> {
        let mut candidates = MuscleID::iter()
            .copied()
            .filter(|m| is_eligible(*m, archetype))
            .map(|muscle| Candidate {
                muscle,
                score: self.score(muscle, rng.gen_range(-JITTER..=JITTER)),
            })
            .collect::<Vec<_>>();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.tuning.candidate_pool_size);
        debug!(
            "candidate pool for {}: {}",
            archetype.name,
            candidates
                .iter()
                .map(|c| format!("{} {:.2}", c.muscle.as_ref(), c.score))
                .collect::<Vec<_>>()
                .join(", ")
        );
        candidates
    }
}
