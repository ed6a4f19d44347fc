//! Storage layer for Roster
//!
//! One JSON file per record kind, loaded once when storage is opened and
//! written back only on an explicit save. Atomic writes protect the last
//! good file.

pub mod file_io;
pub mod gateway;
pub mod store;

pub use file_io::{read_json_value, write_json_atomic};
pub use gateway::{JsonGateway, STORE_SCHEMA_VERSION};
pub use store::RecordStore;

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::paths::RosterPaths;
use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, Record, Student};

/// What happened when one data file was loaded
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file yet; the store starts empty
    Fresh,
    /// Records were read from the file
    Loaded(usize),
    /// The file was unreadable; the store starts empty and the file was
    /// moved to `moved_to` (if that succeeded)
    Recovered {
        error: RosterError,
        moved_to: Option<PathBuf>,
    },
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "no existing data file, starting fresh"),
            Self::Loaded(n) => write!(f, "loaded {} record(s)", n),
            Self::Recovered { error, moved_to } => {
                write!(f, "{}; starting with an empty list", error)?;
                match moved_to {
                    Some(path) => write!(f, " (unreadable file kept at {})", path.display()),
                    None => write!(f, " (unreadable file could not be moved aside)"),
                }
            }
        }
    }
}

/// Outcome of opening storage, per record kind
#[derive(Debug)]
pub struct LoadReport {
    pub employees: LoadOutcome,
    pub students: LoadOutcome,
}

impl LoadReport {
    /// True when any file had to be discarded
    pub fn has_recoveries(&self) -> bool {
        matches!(self.employees, LoadOutcome::Recovered { .. })
            || matches!(self.students, LoadOutcome::Recovered { .. })
    }
}

/// Main storage coordinator that owns both record stores
pub struct Storage {
    paths: RosterPaths,
    pub employees: RecordStore<Employee>,
    pub students: RecordStore<Student>,
    employee_file: JsonGateway<Employee>,
    student_file: JsonGateway<Student>,
}

impl Storage {
    /// Create the directories, then load both stores from disk
    ///
    /// A missing file yields an empty store. An unreadable file also yields
    /// an empty store; the problem is logged, recorded in the returned
    /// report, and the file is moved aside so the next save cannot destroy it.
    pub fn open(paths: RosterPaths) -> RosterResult<(Self, LoadReport)> {
        paths.ensure_directories()?;

        let storage = Self {
            employees: RecordStore::new(),
            students: RecordStore::new(),
            employee_file: JsonGateway::new(paths.employees_file()),
            student_file: JsonGateway::new(paths.students_file()),
            paths,
        };

        let report = LoadReport {
            employees: load_into(&storage.employees, &storage.employee_file)?,
            students: load_into(&storage.students, &storage.student_file)?,
        };

        Ok((storage, report))
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &RosterPaths {
        &self.paths
    }

    /// Write the employee file
    pub fn save_employees(&self) -> RosterResult<()> {
        let count = self.employees.flush(&self.employee_file)?;
        info!(count, path = %self.employee_file.path().display(), "employees saved");
        Ok(())
    }

    /// Write the student file
    pub fn save_students(&self) -> RosterResult<()> {
        let count = self.students.flush(&self.student_file)?;
        info!(count, path = %self.student_file.path().display(), "students saved");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> RosterResult<()> {
        self.save_employees()?;
        self.save_students()?;
        Ok(())
    }
}

fn load_into<R: Record>(store: &RecordStore<R>, gateway: &JsonGateway<R>) -> RosterResult<LoadOutcome> {
    match gateway.load() {
        Ok(None) => {
            info!(entity = R::ENTITY, path = %gateway.path().display(), "no data file, starting fresh");
            Ok(LoadOutcome::Fresh)
        }
        Ok(Some(records)) => {
            let count = records.len();
            store.replace_all(records)?;
            info!(entity = R::ENTITY, count, "records loaded");
            Ok(LoadOutcome::Loaded(count))
        }
        Err(error @ RosterError::CorruptStore { .. }) => {
            warn!(entity = R::ENTITY, %error, "data file unreadable, starting empty");
            let moved_to = match gateway.quarantine() {
                Ok(path) => {
                    warn!(entity = R::ENTITY, path = %path.display(), "unreadable data file moved aside");
                    Some(path)
                }
                Err(e) => {
                    warn!(entity = R::ENTITY, error = %e, "could not move unreadable data file");
                    None
                }
            };
            Ok(LoadOutcome::Recovered { error, moved_to })
        }
        Err(e) => Err(e),
    }
}
