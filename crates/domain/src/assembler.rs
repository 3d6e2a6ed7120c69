use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    Archetype, ArchetypeID, Exercise, ExerciseEntry, LoadModifiers, MuscleID, MuscleLastTrained,
    Readiness, SamplingError, ScoringContext, TrainingSession, TrainingSessionID, TrainingState,
    Tuning, accessory_count, deload_multiplier, fallback_pool, next_archetype, phase_multiplier,
    pick_exercise, prescribe, rolling_rpe_average, training_frequency, weighted_sample,
};

/// Builds new sessions from a snapshot of the training state.
#[derive(Debug, Clone, Copy)]
pub struct SessionAssembler<'a> {
    pub state: &'a TrainingState,
    pub last_trained: &'a MuscleLastTrained,
    pub catalog: &'a [Exercise],
    pub tuning: &'a Tuning,
    pub now: DateTime<Utc>,
}

impl SessionAssembler<'_> {
    /// Assembles the session following the last one in the rotation.
    pub fn next_session(&self, rng: &mut impl Rng) -> TrainingSession {
        let archetype = next_archetype(self.state.sessions.last().and_then(|s| s.archetype));
        info!("assembling {}", archetype.name);

        let readiness = self.readiness();
        let frequency = training_frequency(&self.state.sessions, self.now);
        let context = ScoringContext {
            last_trained: self.last_trained,
            frequency: &frequency,
            injuries: &self.state.injuries,
            goal: self.state.profile.goal,
            global_readiness: readiness.global(),
            fatigue: self.state.fatigue(self.now),
            tuning: self.tuning,
            now: self.now,
        };

        let mut pool = context.candidate_pool(archetype, rng);
        if pool.is_empty() {
            warn!("{}, using fallback pool", SamplingError::EmptyCandidatePool);
            pool = fallback_pool(archetype);
        }
        let count = accessory_count(rng);
        let accessories = weighted_sample(pool, count, rng);
        debug!(
            "accessories: {}",
            accessories
                .iter()
                .map(|m| m.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let rolling_rpe = rolling_rpe_average(&self.state.sessions, self.tuning.rpe_window);
        let modifiers = LoadModifiers {
            phase: phase_multiplier(self.state.profile.cycle_phase(self.now.date_naive())),
            deload: deload_multiplier(rolling_rpe),
        };

        self.assemble(
            archetype,
            archetype.focus.iter().copied().chain(accessories),
            modifiers,
            &readiness,
            rng,
        )
    }

    /// Assembles a session of the longevity focus muscles only, unaffected by the cycle phase.
    pub fn longevity_session(&self, rng: &mut impl Rng) -> TrainingSession {
        let archetype = ArchetypeID::Longevity.archetype();
        let rolling_rpe = rolling_rpe_average(&self.state.sessions, self.tuning.rpe_window);
        let modifiers = LoadModifiers {
            phase: 1.0,
            deload: deload_multiplier(rolling_rpe),
        };
        self.assemble(
            archetype,
            archetype.focus.iter().copied(),
            modifiers,
            &self.readiness(),
            rng,
        )
    }

    fn readiness(&self) -> Readiness {
        Readiness::assess(
            &self.state.profile,
            &self.state.sessions,
            &self.state.sleep,
            self.tuning,
            self.now,
        )
    }

    fn assemble(
        &self,
        archetype: &Archetype,
        muscles: impl IntoIterator<Item = MuscleID>,
        modifiers: LoadModifiers,
        readiness: &Readiness,
        rng: &mut impl Rng,
    ) -> TrainingSession {
        let mut selected: Vec<MuscleID> = vec![];
        let mut exercises: Vec<ExerciseEntry> = vec![];

        for muscle in muscles {
            if selected.contains(&muscle) {
                continue;
            }
            selected.push(muscle);

            let exercise = match pick_exercise(self.catalog, muscle, rng) {
                Ok(exercise) => exercise,
                Err(err) => {
                    info!("{err}, omitting muscle");
                    continue;
                }
            };
            let exercise_id = exercise.id();
            if exercises.iter().any(|e| e.exercise_id == exercise_id) {
                debug!("{} already part of session", exercise.name);
                continue;
            }
            let prescription = prescribe(
                exercise,
                self.state.exercises.get(&exercise_id),
                &self.state.profile,
                modifiers,
            );
            exercises.push(ExerciseEntry {
                exercise_id,
                name: exercise.name.to_string(),
                muscles: exercise.muscles.to_vec(),
                prescription,
                outcome: None,
                note: String::new(),
            });
        }

        let id = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid();
        TrainingSession {
            id: TrainingSessionID::from(id),
            timestamp: self.now,
            archetype: Some(archetype.id),
            exercises,
            summary: None,
            readiness: Some(readiness.percent()),
            backup_recommended: Some(
                self.state
                    .backup_recommended(self.now, self.tuning.backup_interval),
            ),
        }
    }
}
