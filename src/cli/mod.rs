//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.
//!
//! Every command that changes records saves the affected file before it
//! returns.

pub mod config;
pub mod employee;
pub mod export;
pub mod student;

pub use config::{handle_config_command, ConfigCommands};
pub use employee::{handle_employee_command, EmployeeCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use student::{handle_student_command, StudentCommands};

use chrono::NaiveDate;

use crate::display::format_candidates;
use crate::error::{RosterError, RosterResult};
use crate::models::Record;
use crate::services::SearchOutcome;

/// Reduce a search outcome to one record, listing the candidates when the
/// query was ambiguous and no `--pick` was given
pub(crate) fn select_one<R: Record>(
    outcome: SearchOutcome<R>,
    query: &str,
    pick: Option<usize>,
) -> RosterResult<R> {
    if let SearchOutcome::AmbiguousMatches(candidates) = &outcome {
        if pick.map_or(true, |i| i == 0 || i > candidates.len()) {
            eprint!("{}", format_candidates(query, candidates));
        }
    }
    outcome.into_single(query, pick)
}

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(input: &str) -> RosterResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        RosterError::Validation(format!(
            "Invalid date '{}'. Use the form YYYY-MM-DD",
            input.trim()
        ))
    })
}
