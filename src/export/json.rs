//! JSON Export functionality
//!
//! Exports both record kinds to one JSON document with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, Student};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub metadata: ExportMetadata,

    /// All employees, in store order
    pub employees: Vec<Employee>,

    /// All students, in store order
    pub students: Vec<Student>,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub employee_count: usize,
    pub student_count: usize,
}

impl FullExport {
    /// Snapshot both stores
    pub fn from_storage(storage: &Storage) -> RosterResult<Self> {
        let employees = storage.employees.all()?;
        let students = storage.students.all()?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata: ExportMetadata {
                employee_count: employees.len(),
                student_count: students.len(),
            },
            employees,
            students,
        })
    }

    /// Check the schema version and that the counts match the contents
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.metadata.employee_count != self.employees.len()
            || self.metadata.student_count != self.students.len()
        {
            return Err("Record counts do not match the exported records".into());
        }
        Ok(())
    }
}

/// Export everything to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> RosterResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| RosterError::Export(e.to_string()))?;

    info!(
        employees = export.metadata.employee_count,
        students = export.metadata.student_count,
        "exported json snapshot"
    );
    Ok(())
}

/// Read back a JSON export
pub fn read_json_export(json_str: &str) -> RosterResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| RosterError::Export(e.to_string()))?;
    export.validate().map_err(RosterError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterPaths;
    use crate::models::Marks;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let (storage, _) = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .employees
            .add(Employee::new("EMP001", "Asha Rao", "Engineering", 72000.0))
            .unwrap();
        let mut marks = Marks::new();
        marks.insert("Math", 88.0).unwrap();
        storage.students.add(Student::new("STU001", "Ann", marks)).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.employee_count, 1);
        assert_eq!(export.metadata.student_count, 1);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .employees
            .add(Employee::new("EMP001", "Asha Rao", "Engineering", 72000.0))
            .unwrap();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();
        let json = String::from_utf8(output).unwrap();
        assert!(json.contains("\"schema_version\""));

        let imported = read_json_export(&json).unwrap();
        assert_eq!(imported.employees.len(), 1);
        assert_eq!(imported.employees[0].name, "Asha Rao");
        assert!(imported.students.is_empty());
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.metadata.student_count = 3;
        assert!(export.validate().is_err());
    }
}
