#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use continuity_domain as domain;

pub mod json_file;
pub mod model;

pub use json_file::{FileError, JsonFile};

/// Serializes the whole state for a backup file.
pub fn export_state(state: &domain::TrainingState) -> Result<String, FileError> {
    Ok(serde_json::to_string_pretty(&model::State::from(state))?)
}

/// Parses a backup file. Missing sections are treated as empty.
pub fn import_state(json: &str) -> Result<domain::TrainingState, FileError> {
    let state = serde_json::from_str::<model::State>(json)?;
    Ok(domain::TrainingState::try_from(state)?)
}

#[cfg(test)]
mod tests {
    pub mod data;

    use chrono::{DateTime, Utc};
    use continuity_app::Settings;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_export_import() {
        let json = export_state(&data::STATE).unwrap();

        assert_eq!(import_state(&json).unwrap(), *data::STATE);
    }

    #[test]
    fn test_import_partial() {
        let state = import_state(r#"{"profile": {"name": "Bob", "sex": "male"}}"#).unwrap();

        assert_eq!(state.profile.name, "Bob");
        assert_eq!(state.profile.sex, Some(domain::Sex::MALE));
        assert!(state.sessions.is_empty());
        assert!(state.exercises.is_empty());
    }

    #[test]
    fn test_import_invalid() {
        assert!(matches!(import_state("42"), Err(FileError::Json(_))));
        assert!(matches!(
            import_state(r#"{"profile": {"body_weight": 5000.0}}"#),
            Err(FileError::Data(_))
        ));
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-05-20T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_service_with_json_file() {
        let dir = tempdir().unwrap();
        let tuning = Settings::default().tuning();
        let input = domain::ResultInput {
            weight: Some(domain::Weight::new(100.0).unwrap()),
            sets: 3,
            reps: vec![domain::Reps::new(8).unwrap(); 3],
            rpe: Some(domain::RPE::SEVEN),
            note: String::new(),
        };

        let next = {
            let mut service = domain::Service::new(
                JsonFile::open(dir.path()).unwrap(),
                StdRng::seed_from_u64(0),
                tuning,
            )
            .unwrap()
            .with_clock(now);
            service.request_next_session(false).unwrap();
            service.record_exercise_result(0, input).unwrap();
            service.finalize_session().unwrap().clone()
        };

        let service = domain::Service::new(
            JsonFile::open(dir.path()).unwrap(),
            StdRng::seed_from_u64(1),
            tuning,
        )
        .unwrap();

        assert_eq!(service.state().sessions.len(), 1);
        assert_eq!(service.state().exercises.len(), 1);
        assert_eq!(service.ongoing_session(), Some(&next));
        assert_eq!(next.archetype, Some(domain::ArchetypeID::FullBodyB));
    }
}
