//! CLI commands for data export
//!
//! Full snapshot export of every record kind. Per-kind CSV export lives on
//! the `employee` and `student` commands.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{RosterError, RosterResult};
use crate::export::{json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all records to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> RosterResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, output, format, pretty),
    }
}

fn handle_export_all(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> RosterResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RosterError::export_io(&output, e))?;
    }
    let file = File::create(&output).map_err(|e| RosterError::export_io(&output, e))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty),
        ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer),
    }
    .map_err(|e| match e {
        RosterError::Export(reason) => RosterError::export_io(&output, reason),
        other => other,
    })?;
    writer
        .flush()
        .map_err(|e| RosterError::export_io(&output, e))?;

    println!(
        "Exported {} employee(s) and {} student(s) to: {}",
        storage.employees.len()?,
        storage.students.len()?,
        output.display()
    );
    Ok(())
}
