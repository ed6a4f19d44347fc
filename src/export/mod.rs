//! Export module for Roster
//!
//! - CSV: one record kind, caller-chosen columns (spreadsheet-compatible)
//! - JSON: machine-readable snapshot of both record kinds
//! - YAML: human-readable snapshot of both record kinds

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{default_export_path, export_csv, export_csv_to_path};
pub use self::json::{export_full_json, read_json_export, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_full_yaml, read_yaml_export};
