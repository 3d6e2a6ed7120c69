use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = Entry {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message: record.args().to_string(),
        };
        eprintln!("{} {:<5} {}", entry.time, entry.level, entry.message);

        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            if let Ok(repository) = repository.lock() {
                // A failing log repository must not produce further log records.
                let _ = repository.write_entry(entry);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use log::Log;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Entries(Mutex<VecDeque<Entry>>);

    impl Repository for Entries {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn write_entry(&self, entry: Entry) -> Result<(), Error> {
            self.0.lock().unwrap().push_front(entry);
            Ok(())
        }
    }

    #[test]
    fn test_logger() {
        let entries = Arc::new(Mutex::new(Entries::default()));
        *LOG.lock().unwrap() = Some(entries.clone());

        Logger.log(
            &Record::builder()
                .args(format_args!("missing exercise"))
                .level(Level::Warn)
                .build(),
        );
        Logger.log(
            &Record::builder()
                .args(format_args!("ignored"))
                .level(Level::Trace)
                .build(),
        );

        let entries = entries.lock().unwrap().read_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Warn);
        assert_eq!(entries[0].message, "missing exercise");
    }

    #[test]
    fn test_entry_serialization() {
        let entry = Entry {
            time: "May 20 12:00:00".to_string(),
            level: Level::Info,
            message: "assembling Legs Day".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(
            json,
            r#"{"time":"May 20 12:00:00","level":"Info","message":"assembling Legs Day"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);
    }
}
