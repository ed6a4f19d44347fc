use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster::cli::{
    handle_config_command, handle_employee_command, handle_export_command,
    handle_student_command,
};
use roster::config::{RosterPaths, Settings};
use roster::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Employee and student record manager",
    long_about = "Roster keeps employee and student records in local JSON files. \
                  It adds, finds, edits and deletes records, filters them, \
                  reports salary and class statistics, and exports to CSV, \
                  JSON or YAML."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Employee record commands
    #[command(subcommand, alias = "emp")]
    Employee(roster::cli::EmployeeCommands),

    /// Student record commands
    #[command(subcommand, alias = "stu")]
    Student(roster::cli::StudentCommands),

    /// Export every record kind at once
    #[command(subcommand)]
    Export(roster::cli::ExportCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(roster::cli::ConfigCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = RosterPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Roster - employee and student records");
        println!();
        println!("Run 'roster --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Config(cmd) => handle_config_command(&paths, &mut settings, cmd)?,
        command => run_with_storage(paths, &settings, command)?,
    }

    Ok(())
}

fn run_with_storage(paths: RosterPaths, settings: &Settings, command: Commands) -> Result<()> {
    let (storage, report) = Storage::open(paths)?;
    for (kind, outcome) in [("employees", &report.employees), ("students", &report.students)] {
        if let LoadOutcome::Recovered { .. } = outcome {
            eprintln!("Warning: {} file: {}", kind, outcome);
        }
    }

    match command {
        Commands::Employee(cmd) => handle_employee_command(&storage, settings, cmd)?,
        Commands::Student(cmd) => handle_student_command(&storage, settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Config(_) => {}
    }

    Ok(())
}
