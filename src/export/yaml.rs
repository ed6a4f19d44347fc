//! YAML Export functionality
//!
//! The same snapshot as the JSON export, in a human-readable form.

use std::io::Write;

use tracing::info;

use crate::error::{RosterError, RosterResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export everything to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> RosterResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# Roster Full Export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| RosterError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| RosterError::Export(e.to_string()))?;

    info!(
        employees = export.metadata.employee_count,
        students = export.metadata.student_count,
        "exported yaml snapshot"
    );
    Ok(())
}

/// Read back a YAML export
pub fn read_yaml_export(yaml_str: &str) -> RosterResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| RosterError::Export(e.to_string()))?;
    export.validate().map_err(RosterError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterPaths;
    use crate::models::{Employee, Marks, Student};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let (storage, _) = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        let mut marks = Marks::new();
        marks.insert("Science", 64.0).unwrap();
        storage.students.add(Student::new("STU001", "Ann", marks)).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Roster Full Export"));
        assert!(yaml.contains("STU001"));
        assert!(yaml.contains("Science"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .employees
            .add(Employee::new("EMP001", "Asha Rao", "Engineering", 72000.0))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        let imported = read_yaml_export(&yaml).unwrap();
        assert_eq!(imported.employees.len(), 1);
        assert_eq!(imported.employees[0].emp_id, "EMP001");
    }
}
