//! CSV Export functionality
//!
//! Flat tabular export of any record kind. Columns are chosen by field name
//! and rows follow the order of the given records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::{RosterError, RosterResult};
use crate::models::Record;

/// Write `records` as CSV with one column per entry of `fields`
///
/// A field no record knows is rejected before anything is written. A field
/// missing from one particular record (a subject the student never took)
/// becomes an empty cell.
pub fn export_csv<R, W>(records: &[R], fields: &[String], writer: W) -> RosterResult<()>
where
    R: Record,
    W: Write,
{
    check_fields(records, fields)?;

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer
        .write_record(fields)
        .map_err(|e| RosterError::Export(e.to_string()))?;

    for record in records {
        let row: Vec<String> = fields
            .iter()
            .map(|f| record.field(f).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        csv_writer
            .write_record(&row)
            .map_err(|e| RosterError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| RosterError::Export(e.to_string()))?;
    Ok(())
}

fn check_fields<R: Record>(records: &[R], fields: &[String]) -> RosterResult<()> {
    if fields.is_empty() {
        return Err(RosterError::Validation(
            "At least one export field is required".into(),
        ));
    }

    if !records.is_empty() {
        for field in fields {
            if records.iter().all(|r| r.field(field).is_none()) {
                return Err(RosterError::Validation(format!(
                    "Unknown {} field '{}'",
                    R::ENTITY.to_lowercase(),
                    field
                )));
            }
        }
    }
    Ok(())
}

/// Export to a file, creating its parent directory when needed
///
/// Fields are checked before the file is created.
pub fn export_csv_to_path<R: Record>(
    records: &[R],
    fields: &[String],
    path: &Path,
) -> RosterResult<()> {
    check_fields(records, fields)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RosterError::export_io(path, e))?;
    }

    let file = File::create(path).map_err(|e| RosterError::export_io(path, e))?;
    let mut writer = BufWriter::new(file);

    export_csv(records, fields, &mut writer).map_err(|e| match e {
        RosterError::Export(reason) => RosterError::export_io(path, reason),
        other => other,
    })?;
    writer.flush().map_err(|e| RosterError::export_io(path, e))?;

    info!(entity = R::ENTITY, rows = records.len(), path = %path.display(), "exported csv");
    Ok(())
}

/// Default export file name: `<kind>_export_<YYYYmmdd_HHMMSS>.csv`
pub fn default_export_path(exports_dir: &Path, kind: &str) -> PathBuf {
    exports_dir.join(format!(
        "{}_export_{}.csv",
        kind,
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
