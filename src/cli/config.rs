//! Configuration CLI commands
//!
//! Show the resolved paths and settings, and change the subject list.

use clap::Subcommand;

use crate::config::{RosterPaths, Settings};
use crate::error::RosterResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Set the subjects every new student needs a mark for
    Subjects {
        /// Subject names, in report order
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &RosterPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> RosterResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Roster Configuration");
            println!("====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Employees file:    {}", paths.employees_file().display());
            println!("Students file:     {}", paths.students_file().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Subjects:        {}", settings.subjects.join(", "));
            let edges: Vec<String> = settings
                .salary_band_edges
                .iter()
                .map(|e| e.to_string())
                .collect();
            println!("  Salary bands:    {}", edges.join(", "));
        }

        ConfigCommands::Subjects { names } => {
            settings.set_subjects(names)?;
            settings.save(paths)?;
            println!("Subjects set to: {}", settings.subjects.join(", "));
        }
    }

    Ok(())
}
