//! JSON persistence for one record kind
//!
//! Each record kind lives in its own file:
//!
//! ```json
//! { "schema_version": 1, "records": [ { "emp_id": "EMP001", ... } ] }
//! ```
//!
//! Files written by earlier releases hold a bare array of records; those are
//! still read. Nothing newer than [`STORE_SCHEMA_VERSION`] is accepted.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::file_io::{quarantine, read_json_value, write_json_atomic};
use crate::error::{RosterError, RosterResult};
use crate::models::Record;

/// Current on-disk layout version
pub const STORE_SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
struct StoredRecords<'a, R> {
    schema_version: u64,
    records: &'a [R],
}

/// Loads and saves the complete record set of one kind
#[derive(Debug, Clone)]
pub struct JsonGateway<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonGateway<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from disk
    ///
    /// `Ok(None)` means the file does not exist yet (first run).
    pub fn load(&self) -> RosterResult<Option<Vec<R>>> {
        let Some(value) = read_json_value(&self.path)? else {
            return Ok(None);
        };

        let records = match value {
            Value::Array(_) => self.decode(value)?,
            Value::Object(mut object) => {
                let version = object
                    .get("schema_version")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| RosterError::corrupt(&self.path, "missing schema_version"))?;
                if version > STORE_SCHEMA_VERSION {
                    return Err(RosterError::corrupt(
                        &self.path,
                        format!(
                            "unsupported schema version {} (this build reads up to {})",
                            version, STORE_SCHEMA_VERSION
                        ),
                    ));
                }
                let records = object
                    .remove("records")
                    .ok_or_else(|| RosterError::corrupt(&self.path, "missing records"))?;
                self.decode(records)?
            }
            _ => {
                return Err(RosterError::corrupt(
                    &self.path,
                    "expected a list of records",
                ))
            }
        };

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id().to_string()) {
                return Err(RosterError::corrupt(
                    &self.path,
                    format!("duplicate identifier {}", record.id()),
                ));
            }
        }

        Ok(Some(records))
    }

    /// Overwrite the file with `records`
    pub fn save(&self, records: &[R]) -> RosterResult<()> {
        write_json_atomic(
            &self.path,
            &StoredRecords {
                schema_version: STORE_SCHEMA_VERSION,
                records,
            },
        )
    }

    /// Move the current file aside, returning where it went
    pub fn quarantine(&self) -> RosterResult<PathBuf> {
        quarantine(&self.path)
    }

    fn decode(&self, value: Value) -> RosterResult<Vec<R>> {
        serde_json::from_value(value).map_err(|e| RosterError::corrupt(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Marks, Student};
    use std::fs;
    use tempfile::TempDir;

    fn gateway<R: Record>(dir: &TempDir, name: &str) -> JsonGateway<R> {
        JsonGateway::new(dir.path().join(name))
    }

    fn sample_employees(n: usize) -> Vec<Employee> {
        (1..=n)
            .map(|i| {
                Employee::new(format!("EMP{:03}", i), format!("Person {}", i), "Ops", 1000.0 * i as f64)
            })
            .collect()
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Employee> = gateway(&dir, "employees.json");
        assert!(gw.load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_zero_one_many() {
        for n in [0, 1, 7] {
            let dir = TempDir::new().unwrap();
            let gw: JsonGateway<Employee> = gateway(&dir, "employees.json");
            let records = sample_employees(n);

            gw.save(&records).unwrap();
            let loaded = gw.load().unwrap().unwrap();
            assert_eq!(loaded, records);

            gw.save(&loaded).unwrap();
            assert_eq!(gw.load().unwrap().unwrap(), records);
        }
    }

    #[test]
    fn test_written_file_is_versioned() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Employee> = gateway(&dir, "employees.json");
        gw.save(&sample_employees(1)).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(gw.path()).unwrap()).unwrap();
        assert_eq!(raw["schema_version"], 1);
        assert_eq!(raw["records"][0]["emp_id"], "EMP001");
    }

    #[test]
    fn test_reads_legacy_array() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Student> = gateway(&dir, "students.json");
        fs::write(
            gw.path(),
            r#"[{"student_id": "STU001", "name": "Ann", "marks": {"Math": 95, "Science": 88}}]"#,
        )
        .unwrap();

        let loaded = gw.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].marks.get("Science"), Some(88.0));
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Employee> = gateway(&dir, "employees.json");

        for content in [
            r#"{"records": []}"#,
            r#"{"schema_version": 1}"#,
            r#"[{"emp_id": "EMP001"}]"#,
            r#""just a string""#,
            "garbage",
        ] {
            fs::write(gw.path(), content).unwrap();
            assert!(
                matches!(gw.load(), Err(RosterError::CorruptStore { .. })),
                "{content} should be corrupt"
            );
        }
    }

    #[test]
    fn test_newer_schema_refused() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Student> = gateway(&dir, "students.json");
        fs::write(gw.path(), r#"{"schema_version": 2, "records": []}"#).unwrap();

        let err = gw.load().unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 2"));
    }

    #[test]
    fn test_duplicate_ids_are_corrupt() {
        let dir = TempDir::new().unwrap();
        let gw: JsonGateway<Student> = gateway(&dir, "students.json");
        let s = Student::new("STU001", "Ann", Marks::new());
        gw.save(&[s.clone(), s]).unwrap();

        assert!(matches!(gw.load(), Err(RosterError::CorruptStore { .. })));
    }
}
