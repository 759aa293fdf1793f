use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

static CONSOLE_LEVEL: Mutex<LevelFilter> = Mutex::new(LevelFilter::Warn);

/// Number of entries a repository is expected to keep.
pub const CAPACITY: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
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

/// Stores every record down to debug level in `storage` and echoes records down to `console` on
/// stderr.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    storage: Arc<Mutex<dyn Repository>>,
    console: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    if let Ok(mut level) = CONSOLE_LEVEL.lock() {
        *level = console;
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(console.max(LevelFilter::Debug)))
}

/// Entries of the repository the logger was initialized with, newest first.
pub fn entries() -> Result<VecDeque<Entry>, Error> {
    let log = LOG.lock().map_err(|err| Error::Unknown(err.to_string()))?;
    let Some(ref repository) = *log else {
        return Ok(VecDeque::new());
    };
    let repository = repository
        .lock()
        .map_err(|err| Error::Unknown(err.to_string()))?;
    repository.read_entries()
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
            || CONSOLE_LEVEL
                .lock()
                .is_ok_and(|level| metadata.level() <= *level)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        if CONSOLE_LEVEL
            .lock()
            .is_ok_and(|level| record.level() <= *level)
        {
            eprintln!("[{}] {message}", record.level());
        }

        if let Ok(log) = LOG.lock() {
            if let Some(ref log) = *log {
                if let Ok(repository) = log.lock() {
                    let _ = repository.write_entry(Entry {
                        time: Local::now().format("%b %d %H:%M:%S").to_string(),
                        level: record.level(),
                        message,
                    });
                }
            }
        }
    }

    fn flush(&self) {}
}
