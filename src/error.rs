//! Custom error types for Roster
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for Roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bad field value at creation or update
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A record with this identifier already exists
    #[error("{entity_type} already exists: {identifier}")]
    DuplicateIdentifier {
        entity_type: &'static str,
        identifier: String,
    },

    /// An existing identifier does not follow the `<prefix><digits>` shape
    #[error("Malformed identifier '{identifier}': expected '{prefix}' followed by digits")]
    MalformedIdentifier { identifier: String, prefix: String },

    /// A search query matched several records and no selection was made
    #[error("'{query}' matches {count} records; pick one with --pick 1..{count}")]
    AmbiguousMatches { query: String, count: usize },

    /// A disambiguation index outside the candidate list
    #[error("Invalid selection {index}: choose a number between 1 and {count}")]
    InvalidSelection { index: usize, count: usize },

    /// Range filter with lower bound above upper bound
    #[error("Invalid range for '{field}': minimum {min} is greater than maximum {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    /// Statistics requested over zero records
    #[error("No {0} records found")]
    EmptyStore(&'static str),

    /// The backing file exists but cannot be read as a record set
    #[error("Corrupt data file {path}: {reason}")]
    CorruptStore { path: String, reason: String },

    /// Writing the backing file failed; data was not durably saved
    #[error("Failed to {operation} {path}: {reason}")]
    Persist {
        path: String,
        operation: &'static str,
        reason: String,
    },

    /// Export destination could not be written
    #[error("Failed to export to {path}: {reason}")]
    ExportIo { path: String, reason: String },

    /// Export errors not tied to a destination
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RosterError {
    /// Create a "not found" error for employees
    pub fn employee_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Employee",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for students
    pub fn student_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Student",
            identifier: identifier.into(),
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl ToString) -> Self {
        Self::CorruptStore {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn persist(path: &Path, operation: &'static str, reason: impl ToString) -> Self {
        Self::Persist {
            path: path.display().to_string(),
            operation,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn export_io(path: &Path, reason: impl ToString) -> Self {
        Self::ExportIo {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error happened at the file boundary
    pub fn is_io_boundary(&self) -> bool {
        matches!(
            self,
            Self::CorruptStore { .. } | Self::Persist { .. } | Self::ExportIo { .. } | Self::Io(_)
        )
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Roster operations
pub type RosterResult<T> = Result<T, RosterError>;
