use std::fmt;

use log::info;

use crate::{Exercise, ExerciseRecord, Profile, TrainingSession, readiness::recent_average_rpe};

pub const DELOAD_THRESHOLD: f64 = 8.5;
pub const DELOAD_MULTIPLIER: f64 = 0.8;
pub const DEFAULT_BODY_WEIGHT: f64 = 150.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prescription {
    /// Target load in pounds.
    pub load: u32,
    pub sets: u32,
    pub reps: String,
    pub rationale: String,
}

/// Load adjustments shared by all exercises of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadModifiers {
    pub phase: f64,
    pub deload: f64,
}

impl Default for LoadModifiers {
    fn default() -> Self {
        Self {
            phase: 1.0,
            deload: 1.0,
        }
    }
}

impl LoadModifiers {
    #[must_use]
    pub fn is_deload(&self) -> bool {
        self.deload < 1.0
    }
}

/// Mean session RPE over the last `window` sessions, ignoring sessions without rating.
#[must_use]
pub fn rolling_rpe_average(sessions: &[TrainingSession], window: usize) -> Option<f64> {
    recent_average_rpe(sessions, window)
}

#[must_use]
pub fn deload_multiplier(rolling_rpe: Option<f64>) -> f64 {
    match rolling_rpe {
        Some(rpe) if rpe > DELOAD_THRESHOLD => DELOAD_MULTIPLIER,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingZone {
    Analyzing,
    DeloadRecommended,
    IntensityLow,
    Optimal,
}

#[must_use]
pub fn training_zone(rolling_rpe: Option<f64>) -> TrainingZone {
    match rolling_rpe {
        None => TrainingZone::Analyzing,
        Some(rpe) if rpe > DELOAD_THRESHOLD => TrainingZone::DeloadRecommended,
        Some(rpe) if rpe < 5.0 => TrainingZone::IntensityLow,
        Some(_) => TrainingZone::Optimal,
    }
}

impl fmt::Display for TrainingZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrainingZone::Analyzing => "Analyzing",
                TrainingZone::DeloadRecommended => "Deload Recommended (High Tendon Strain)",
                TrainingZone::IntensityLow => "Intensity Low (Increase Effort)",
                TrainingZone::Optimal => "Optimal Training Zone",
            }
        )
    }
}

/// Computes today's target for `exercise`.
///
/// Repeat exercises progress from the best load achieved. First attempts start from a
/// fraction of body weight given by the exercise's load pattern, rounded to 5 lbs.
#[must_use]
pub fn prescribe(
    exercise: &Exercise,
    record: Option<&ExerciseRecord>,
    profile: &Profile,
    modifiers: LoadModifiers,
) -> Prescription {
    let (load, mut rationale) = match record.and_then(ExerciseRecord::best_load) {
        Some(best) => {
            let load = round_load(
                best * (1.0 + profile.progression_rate) * modifiers.phase * modifiers.deload,
            );
            (
                load,
                format!("Based on last session: {best} lbs, adjusted for phase."),
            )
        }
        None => {
            let body_weight = profile
                .body_weight
                .filter(|w| !w.is_zero())
                .map_or(DEFAULT_BODY_WEIGHT, |w| f64::from(f32::from(w)));
            let estimate =
                (body_weight * exercise.load.body_weight_coefficient() / 5.0).round() * 5.0;
            let load = round_load(estimate * modifiers.phase * modifiers.deload);
            (
                load,
                format!("First time! Try {load} lbs as starting weight."),
            )
        }
    };
    if modifiers.is_deload() {
        info!("deload active for {}", exercise.name);
        rationale.push_str(" Deload active (high RPE trend).");
    }
    Prescription {
        load,
        sets: exercise.sets,
        reps: exercise.reps.to_string(),
        rationale,
    }
}

fn round_load(value: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let load = value.round().max(0.0) as u32;
    load
}
