use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    AgingRisk, Category, DEFAULT_BODY_WEIGHT, ExerciseHistory, ExerciseID, ExerciseRecord,
    MuscleID, MuscleLastTrained, Weight, days_since,
};

const GRIP_EXERCISES: [&str; 2] = ["Conventional Deadlift", "Farmer's Walk"];
const BALANCE_MUSCLES: [MuscleID; 2] = [MuscleID::Tibialis, MuscleID::PeroneusTertius];
const POSTURE_MUSCLES: [MuscleID; 5] = [
    MuscleID::Neck,
    MuscleID::DeepNeck,
    MuscleID::Rhomboids,
    MuscleID::RearDelts,
    MuscleID::Traps,
];
const PUSH_MUSCLES: [MuscleID; 3] = [MuscleID::Chest, MuscleID::Triceps, MuscleID::Shoulders];
const PULL_MUSCLES: [MuscleID; 3] = [MuscleID::Back, MuscleID::Biceps, MuscleID::RearDelts];

/// Component scores in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongevityBreakdown {
    pub grip_strength: f64,
    pub balance: f64,
    pub joint_mobility: f64,
    pub posture: f64,
    pub muscle_balance: f64,
    pub consistency: f64,
}

impl LongevityBreakdown {
    /// Weighted mean of the components, rounded to a whole score in [0, 100].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score(&self) -> u32 {
        let weighted = [
            (self.grip_strength, 0.15),
            (self.balance, 0.15),
            (self.joint_mobility, 0.25),
            (self.posture, 0.20),
            (self.muscle_balance, 0.15),
            (self.consistency, 0.10),
        ];
        let total = weighted.iter().map(|(score, weight)| score * weight).sum::<f64>();
        let weights = weighted.iter().map(|(_, weight)| weight).sum::<f64>();
        (total / weights).round().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongevityReport {
    pub score: u32,
    pub breakdown: LongevityBreakdown,
    pub risks: Vec<AgingRiskFactor>,
    pub recommendations: Vec<LongevityRecommendation>,
}

/// Everything the longevity score is derived from.
#[derive(Debug, Clone, Copy)]
pub struct LongevityInput<'a> {
    pub last_trained: &'a MuscleLastTrained,
    pub exercises: &'a ExerciseHistory,
    pub body_weight: Option<Weight>,
    pub streak: u32,
    pub now: DateTime<Utc>,
}

impl LongevityInput<'_> {
    #[must_use]
    pub fn breakdown(&self) -> LongevityBreakdown {
        LongevityBreakdown {
            grip_strength: grip_strength_score(self.exercises, self.body_weight),
            balance: balance_score(self.last_trained, self.now),
            joint_mobility: joint_mobility_score(self.last_trained, self.now),
            posture: posture_score(self.last_trained, self.now),
            muscle_balance: muscle_balance_score(self.last_trained, self.now),
            consistency: consistency_score(self.streak),
        }
    }

    #[must_use]
    pub fn report(&self) -> LongevityReport {
        let breakdown = self.breakdown();
        LongevityReport {
            score: breakdown.score(),
            breakdown,
            risks: assess_aging_risks(&breakdown),
            recommendations: longevity_recommendations(&breakdown),
        }
    }
}

fn trained_within(
    last_trained: &MuscleLastTrained,
    muscle: MuscleID,
    days: i64,
    now: DateTime<Utc>,
) -> bool {
    last_trained
        .get(&muscle)
        .is_some_and(|t| days_since(*t, now) < days)
}

/// Best grip-heavy load relative to body weight. Without any such load the score is neutral.
#[must_use]
pub fn grip_strength_score(exercises: &ExerciseHistory, body_weight: Option<Weight>) -> f64 {
    let Some(best) = GRIP_EXERCISES
        .iter()
        .filter_map(|name| exercises.get(&ExerciseID::from_name(name)))
        .filter_map(ExerciseRecord::best_load)
        .max_by(f64::total_cmp)
    else {
        return 50.0;
    };
    let body_weight = body_weight
        .filter(|w| !w.is_zero())
        .map_or(DEFAULT_BODY_WEIGHT, |w| f64::from(f32::from(w)));
    match best / body_weight {
        r if r >= 1.5 => 100.0,
        r if r >= 1.2 => 80.0,
        r if r >= 1.0 => 60.0,
        r if r >= 0.8 => 40.0,
        _ => 20.0,
    }
}

#[must_use]
pub fn balance_score(last_trained: &MuscleLastTrained, now: DateTime<Utc>) -> f64 {
    if BALANCE_MUSCLES
        .iter()
        .any(|m| trained_within(last_trained, *m, 14, now))
    {
        90.0
    } else {
        30.0
    }
}

/// Share of longevity muscles trained within 30 days, capped at 80.
#[must_use]
pub fn joint_mobility_score(last_trained: &MuscleLastTrained, now: DateTime<Utc>) -> f64 {
    let muscles = MuscleID::iter()
        .copied()
        .filter(|m| m.category() == Category::Longevity)
        .collect::<Vec<_>>();
    let trained = muscles
        .iter()
        .filter(|m| trained_within(last_trained, **m, 30, now))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let share = trained as f64 / muscles.len() as f64;
    (share * 100.0 * 0.8).min(100.0)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn posture_score(last_trained: &MuscleLastTrained, now: DateTime<Utc>) -> f64 {
    let trained = POSTURE_MUSCLES
        .iter()
        .filter(|m| trained_within(last_trained, **m, 14, now))
        .count();
    trained as f64 / POSTURE_MUSCLES.len() as f64 * 100.0
}

/// Rewards training both pushing and pulling muscles within a week.
#[must_use]
pub fn muscle_balance_score(last_trained: &MuscleLastTrained, now: DateTime<Utc>) -> f64 {
    let push = PUSH_MUSCLES
        .iter()
        .any(|m| trained_within(last_trained, *m, 7, now));
    let pull = PULL_MUSCLES
        .iter()
        .any(|m| trained_within(last_trained, *m, 7, now));
    match (push, pull) {
        (true, true) => 100.0,
        (true, false) | (false, true) => 50.0,
        (false, false) => 20.0,
    }
}

#[must_use]
pub fn consistency_score(streak: u32) -> f64 {
    match streak {
        30.. => 100.0,
        14.. => 80.0,
        7.. => 60.0,
        3.. => 40.0,
        _ => 20.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgingRiskFactor {
    PostureWeakness,
    LowGripStrength,
    PoorBalance,
}

impl AgingRiskFactor {
    #[must_use]
    pub fn severity(self) -> AgingRisk {
        match self {
            AgingRiskFactor::PostureWeakness | AgingRiskFactor::PoorBalance => AgingRisk::High,
            AgingRiskFactor::LowGripStrength => AgingRisk::Medium,
        }
    }

    #[must_use]
    pub fn impact(self) -> &'static str {
        match self {
            AgingRiskFactor::PostureWeakness => "Forward head posture",
            AgingRiskFactor::LowGripStrength => "Reduced independence",
            AgingRiskFactor::PoorBalance => "Increased fall risk",
        }
    }

    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            AgingRiskFactor::PostureWeakness => "Add neck strengthening",
            AgingRiskFactor::LowGripStrength => "Add grip training",
            AgingRiskFactor::PoorBalance => "Add balance exercises",
        }
    }
}

impl fmt::Display for AgingRiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AgingRiskFactor::PostureWeakness => "Neck/Posture Weakness",
                AgingRiskFactor::LowGripStrength => "Low Grip Strength",
                AgingRiskFactor::PoorBalance => "Poor Balance",
            }
        )
    }
}

#[must_use]
pub fn assess_aging_risks(breakdown: &LongevityBreakdown) -> Vec<AgingRiskFactor> {
    let mut risks = vec![];
    if breakdown.posture < 50.0 {
        risks.push(AgingRiskFactor::PostureWeakness);
    }
    if breakdown.grip_strength < 40.0 {
        risks.push(AgingRiskFactor::LowGripStrength);
    }
    if breakdown.balance < 40.0 {
        risks.push(AgingRiskFactor::PoorBalance);
    }
    risks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongevityRecommendation {
    PostureCorrection,
    BalanceTraining,
    JointMobility,
}

impl fmt::Display for LongevityRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LongevityRecommendation::PostureCorrection =>
                    "Focus on posture correction exercises 3x/week",
                LongevityRecommendation::BalanceTraining => "Incorporate daily balance training",
                LongevityRecommendation::JointMobility =>
                    "Add joint-specific mobility work to every workout",
            }
        )
    }
}

#[must_use]
pub fn longevity_recommendations(breakdown: &LongevityBreakdown) -> Vec<LongevityRecommendation> {
    let mut recommendations = vec![];
    if breakdown.posture < 70.0 {
        recommendations.push(LongevityRecommendation::PostureCorrection);
    }
    if breakdown.balance < 60.0 {
        recommendations.push(LongevityRecommendation::BalanceTraining);
    }
    if breakdown.joint_mobility < 50.0 {
        recommendations.push(LongevityRecommendation::JointMobility);
    }
    recommendations
}
