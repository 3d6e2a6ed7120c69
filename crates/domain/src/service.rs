use chrono::{DateTime, Utc};
use log::{debug, error, info};
use rand::Rng;

use crate::{
    Achievement, EXERCISES, Exercise, Injury, LongevityInput, LongevityReport, MuscleID,
    MuscleLastTrained, PersonalRecord, Profile, Progress, ReadError, RecoveryStatus, ResultInput,
    SessionAssembler, SessionError, SleepLog, StateRepository, TrainingSession, TrainingState,
    TrainingZone, Tuning, WriteError, neglected_muscles, personal_records, ready_muscles,
    recovery_status, rolling_rpe_average, streak, total_volume, training_zone,
    unlocked_achievements, volume_within, workload_ratio,
};

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

/// Owns the training state and the session in progress.
pub struct Service<R, G> {
    repository: R,
    rng: G,
    tuning: Tuning,
    catalog: &'static [Exercise],
    clock: fn() -> DateTime<Utc>,
    state: TrainingState,
    last_trained: MuscleLastTrained,
    ongoing: Option<TrainingSession>,
}

impl<R: StateRepository, G: Rng> Service<R, G> {
    pub fn new(repository: R, rng: G, tuning: Tuning) -> Result<Self, ReadError> {
        let mut state = log_on_error!(repository.read_state(), ReadError, "read", "state")?;
        state.sort_sessions();
        let ongoing = log_on_error!(
            repository.read_ongoing_session(),
            ReadError,
            "read",
            "ongoing session"
        )?;
        Ok(Self {
            repository,
            rng,
            tuning,
            catalog: EXERCISES,
            clock: Utc::now,
            last_trained: state.last_trained(),
            state,
            ongoing,
        })
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'static [Exercise]) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn ongoing_session(&self) -> Option<&TrainingSession> {
        self.ongoing.as_ref()
    }

    pub fn last_trained(&self) -> &MuscleLastTrained {
        &self.last_trained
    }

    /// Replaces the session in progress by the next session of the rotation.
    ///
    /// Logged results of the current session are only dropped if `discard` is set.
    pub fn request_next_session(
        &mut self,
        discard: bool,
    ) -> Result<&TrainingSession, SessionError> {
        self.check_discard(discard)?;
        let session = self.assemble(|assembler, rng| assembler.next_session(rng));
        self.start(session)
    }

    pub fn request_longevity_session(
        &mut self,
        discard: bool,
    ) -> Result<&TrainingSession, SessionError> {
        self.check_discard(discard)?;
        let session = self.assemble(|assembler, rng| assembler.longevity_session(rng));
        self.start(session)
    }

    pub fn record_exercise_result(
        &mut self,
        index: usize,
        input: ResultInput,
    ) -> Result<&TrainingSession, SessionError> {
        let now = (self.clock)();
        let session = self
            .ongoing
            .as_mut()
            .ok_or(SessionError::NoSessionInProgress)?;
        let entry = session.record_result(index, input, now)?;
        if let Some(result) = entry.result() {
            self.state.add_result(&entry.exercise_id, result);
        }
        log_on_error!(
            self.repository.write_state(&self.state),
            WriteError,
            "write",
            "state"
        )?;
        self.persist_ongoing()?;
        self.ongoing
            .as_ref()
            .ok_or(SessionError::NoSessionInProgress)
    }

    pub fn skip_exercise(
        &mut self,
        index: usize,
        note: &str,
    ) -> Result<&TrainingSession, SessionError> {
        self.ongoing
            .as_mut()
            .ok_or(SessionError::NoSessionInProgress)?
            .skip(index, note)?;
        self.persist_ongoing()?;
        self.ongoing
            .as_ref()
            .ok_or(SessionError::NoSessionInProgress)
    }

    /// Appends the session in progress to the history and prepares the next one.
    pub fn finalize_session(&mut self) -> Result<&TrainingSession, SessionError> {
        let mut session = self
            .ongoing
            .take()
            .ok_or(SessionError::NoSessionInProgress)?;
        let summary = session.summarize();
        info!(
            "finalized session with {} completed exercises",
            summary.completed_exercises
        );
        session.summary = Some(summary);
        self.state.sessions.push(session);
        self.last_trained = self.state.last_trained();

        let next = self.assemble(|assembler, rng| assembler.next_session(rng));
        let written = log_on_error!(
            self.repository.write_state(&self.state),
            WriteError,
            "write",
            "state"
        )
        .and_then(|()| {
            log_on_error!(
                self.repository.write_ongoing_session(Some(&next)),
                WriteError,
                "write",
                "ongoing session"
            )
        });
        let next = self.ongoing.insert(next);
        written?;
        Ok(next)
    }

    /// Replaces the whole state, e.g. by imported data.
    pub fn import_state(&mut self, mut state: TrainingState) -> Result<(), WriteError> {
        state.sort_sessions();
        info!("importing {} sessions", state.sessions.len());
        self.state = state;
        self.last_trained = self.state.last_trained();
        self.write_state()
    }

    pub fn mark_exported(&mut self) -> Result<(), WriteError> {
        self.state.last_export = Some((self.clock)());
        self.write_state()
    }

    pub fn replace_profile(&mut self, profile: Profile) -> Result<(), WriteError> {
        self.state.profile = profile;
        self.write_state()
    }

    pub fn log_injury(&mut self, note: &str, pain_level: u8) -> Result<(), WriteError> {
        self.state.injuries.push(Injury {
            date: (self.clock)(),
            note: note.to_string(),
            pain_level,
        });
        self.write_state()
    }

    pub fn log_sleep(&mut self, hours: f64) -> Result<(), WriteError> {
        self.state.sleep.push(SleepLog {
            date: (self.clock)(),
            hours,
        });
        self.write_state()
    }

    #[must_use]
    pub fn recovery_overview(&self) -> Vec<(MuscleID, RecoveryStatus)> {
        let now = (self.clock)();
        let fatigue = self.state.fatigue(now);
        MuscleID::iter()
            .map(|m| {
                (
                    *m,
                    recovery_status(m.muscle(), self.last_trained.get(m).copied(), fatigue, now),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn ready_muscles(&self) -> Vec<MuscleID> {
        let now = (self.clock)();
        ready_muscles(&self.last_trained, self.state.fatigue(now), now)
    }

    #[must_use]
    pub fn neglected_muscles(&self) -> Vec<MuscleID> {
        neglected_muscles(&self.last_trained)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        streak(&self.state.sessions, (self.clock)().date_naive())
    }

    #[must_use]
    pub fn training_zone(&self) -> TrainingZone {
        training_zone(rolling_rpe_average(
            &self.state.sessions,
            self.tuning.rpe_window,
        ))
    }

    #[must_use]
    pub fn longevity_report(&self) -> LongevityReport {
        let now = (self.clock)();
        LongevityInput {
            last_trained: &self.last_trained,
            exercises: &self.state.exercises,
            body_weight: self.state.profile.body_weight,
            streak: streak(&self.state.sessions, now.date_naive()),
            now,
        }
        .report()
    }

    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        unlocked_achievements(&Progress {
            sessions: &self.state.sessions,
            exercises: &self.state.exercises,
            streak: self.streak(),
            longevity_score: self.longevity_report().score,
        })
    }

    #[must_use]
    pub fn personal_records(&self) -> Vec<PersonalRecord> {
        personal_records(&self.state.exercises, self.catalog)
    }

    #[must_use]
    pub fn total_volume(&self) -> f64 {
        total_volume(&self.state.sessions)
    }

    /// Volume of the sessions within the trailing `days`.
    #[must_use]
    pub fn volume_within(&self, days: i64) -> f64 {
        volume_within(&self.state.sessions, days, (self.clock)())
    }

    #[must_use]
    pub fn workload_ratio(&self) -> f64 {
        workload_ratio(&self.state.sessions, (self.clock)())
    }

    fn assemble(
        &mut self,
        build: impl FnOnce(&SessionAssembler<'_>, &mut G) -> TrainingSession,
    ) -> TrainingSession {
        let assembler = SessionAssembler {
            state: &self.state,
            last_trained: &self.last_trained,
            catalog: self.catalog,
            tuning: &self.tuning,
            now: (self.clock)(),
        };
        build(&assembler, &mut self.rng)
    }

    fn check_discard(&self, discard: bool) -> Result<(), SessionError> {
        match &self.ongoing {
            Some(session) if session.has_logged_results() => {
                if discard {
                    info!("discarding logged results of ongoing session");
                    Ok(())
                } else {
                    Err(SessionError::UnsavedResults)
                }
            }
            _ => Ok(()),
        }
    }

    fn start(&mut self, session: TrainingSession) -> Result<&TrainingSession, SessionError> {
        let written = log_on_error!(
            self.repository.write_ongoing_session(Some(&session)),
            WriteError,
            "write",
            "ongoing session"
        );
        let session = self.ongoing.insert(session);
        written?;
        Ok(session)
    }

    fn persist_ongoing(&self) -> Result<(), WriteError> {
        log_on_error!(
            self.repository.write_ongoing_session(self.ongoing.as_ref()),
            WriteError,
            "write",
            "ongoing session"
        )
    }

    fn write_state(&self) -> Result<(), WriteError> {
        log_on_error!(
            self.repository.write_state(&self.state),
            WriteError,
            "write",
            "state"
        )
    }
}
