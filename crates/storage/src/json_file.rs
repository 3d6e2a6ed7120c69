use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use continuity_app::{Settings, SettingsRepository, log};
use continuity_domain as domain;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::model::{DataError, State, TrainingSession};

const MAX_LOG_ENTRIES: usize = 100;

/// Keeps every store as a JSON document in a single directory.
#[derive(Debug, Clone)]
pub struct JsonFile {
    dir: PathBuf,
}

#[derive(AsRefStr, Clone, Copy)]
pub enum Store {
    #[strum(serialize = "state.json")]
    State,
    #[strum(serialize = "ongoing_session.json")]
    OngoingSession,
    #[strum(serialize = "settings.json")]
    Settings,
    #[strum(serialize = "log.json")]
    Log,
}

impl JsonFile {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FileError> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(anyhow!("{} is not a directory", dir.display()).into());
        }
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, store: Store) -> PathBuf {
        self.dir.join(store.as_ref())
    }

    fn read<T: DeserializeOwned>(&self, store: Store) -> Result<Option<T>, FileError> {
        match fs::read_to_string(self.path(store)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write<T: Serialize>(&self, store: Store, value: &T) -> Result<(), FileError> {
        let path = self.path(store);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn remove(&self, store: Store) -> Result<(), FileError> {
        match fs::remove_file(self.path(store)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

impl domain::StateRepository for JsonFile {
    fn read_state(&self) -> Result<domain::TrainingState, domain::ReadError> {
        Ok(self
            .read::<State>(Store::State)?
            .map(domain::TrainingState::try_from)
            .transpose()
            .map_err(FileError::from)?
            .unwrap_or_default())
    }

    fn write_state(&self, state: &domain::TrainingState) -> Result<(), domain::WriteError> {
        Ok(self.write(Store::State, &State::from(state))?)
    }

    fn read_ongoing_session(&self) -> Result<Option<domain::TrainingSession>, domain::ReadError> {
        Ok(self
            .read::<TrainingSession>(Store::OngoingSession)?
            .map(domain::TrainingSession::try_from)
            .transpose()
            .map_err(FileError::from)?)
    }

    fn write_ongoing_session(
        &self,
        session: Option<&domain::TrainingSession>,
    ) -> Result<(), domain::WriteError> {
        match session {
            Some(session) => self.write(Store::OngoingSession, &TrainingSession::from(session)),
            None => self.remove(Store::OngoingSession),
        }
        .map_err(domain::WriteError::from)
    }
}

impl SettingsRepository for JsonFile {
    fn read_settings(&self) -> Result<Settings, domain::ReadError> {
        Ok(self.read(Store::Settings)?.unwrap_or_default())
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), domain::WriteError> {
        Ok(self.write(Store::Settings, settings)?)
    }
}

impl log::Repository for JsonFile {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        Ok(self
            .read(Store::Log)
            .map_err(|err| log::Error::Unknown(err.to_string()))?
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        self.write(Store::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FileError> for domain::StorageError {
    fn from(value: FileError) -> Self {
        match value {
            FileError::Json(_) | FileError::Data(_) => {
                domain::StorageError::Corrupt(value.to_string())
            }
            FileError::Io(_) | FileError::Other(_) => domain::StorageError::Other(Box::new(value)),
        }
    }
}

impl From<FileError> for domain::ReadError {
    fn from(value: FileError) -> Self {
        domain::ReadError::Storage(value.into())
    }
}

impl From<FileError> for domain::WriteError {
    fn from(value: FileError) -> Self {
        domain::WriteError::Storage(value.into())
    }
}

#[cfg(test)]
mod tests {
    use ::log::Level;
    use continuity_app::log::Repository;
    use continuity_domain::StateRepository;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::tests::data::{ONGOING_SESSION, STATE};

    use super::*;

    #[test]
    fn test_state() {
        let dir = tempdir().unwrap();
        let storage = JsonFile::open(dir.path()).unwrap();

        assert_eq!(
            storage.read_state().unwrap(),
            domain::TrainingState::default()
        );

        storage.write_state(&STATE).unwrap();

        assert_eq!(storage.read_state().unwrap(), *STATE);
        assert_eq!(
            JsonFile::open(dir.path()).unwrap().read_state().unwrap(),
            *STATE
        );
    }

    #[test]
    fn test_ongoing_session() {
        let dir = tempdir().unwrap();
        let storage = JsonFile::open(dir.path()).unwrap();

        assert_eq!(storage.read_ongoing_session().unwrap(), None);

        storage
            .write_ongoing_session(Some(&*ONGOING_SESSION))
            .unwrap();

        assert_eq!(
            storage.read_ongoing_session().unwrap(),
            Some(ONGOING_SESSION.clone())
        );

        storage.write_ongoing_session(None).unwrap();
        storage.write_ongoing_session(None).unwrap();

        assert_eq!(storage.read_ongoing_session().unwrap(), None);
    }

    #[test]
    fn test_corrupt_state() {
        let dir = tempdir().unwrap();
        let storage = JsonFile::open(dir.path()).unwrap();
        fs::write(dir.path().join("state.json"), "{\"sessions\": 42}").unwrap();

        assert!(matches!(
            storage.read_state(),
            Err(domain::ReadError::Storage(domain::StorageError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_open_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, "").unwrap();

        assert!(matches!(JsonFile::open(path), Err(FileError::Other(_))));
    }

    #[test]
    fn test_settings() {
        let dir = tempdir().unwrap();
        let storage = JsonFile::open(dir.path()).unwrap();
        let settings = Settings {
            backup_interval_days: 14,
            ..Settings::default()
        };

        assert_eq!(storage.read_settings().unwrap(), Settings::default());

        storage.write_settings(&settings).unwrap();

        assert_eq!(storage.read_settings().unwrap(), settings);
    }

    #[test]
    fn test_log() {
        let dir = tempdir().unwrap();
        let storage = JsonFile::open(dir.path()).unwrap();

        assert!(storage.read_entries().unwrap().is_empty());

        for i in 0..=MAX_LOG_ENTRIES {
            storage
                .write_entry(log::Entry {
                    time: String::new(),
                    level: Level::Info,
                    message: format!("{i}"),
                })
                .unwrap();
        }

        let entries = storage.read_entries().unwrap();
        assert_eq!(entries.len(), MAX_LOG_ENTRIES);
        assert_eq!(entries[0].message, MAX_LOG_ENTRIES.to_string());
        assert_eq!(entries[MAX_LOG_ENTRIES - 1].message, "1");
    }
}
