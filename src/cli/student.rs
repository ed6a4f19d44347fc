//! Student CLI commands
//!
//! Implements CLI commands for student records and report cards.

use std::path::PathBuf;

use clap::Subcommand;

use super::select_one;
use crate::config::Settings;
use crate::display::{format_report_card, format_student_list};
use crate::error::{RosterError, RosterResult};
use crate::export::default_export_path;
use crate::models::{parse_mark, parse_mark_assignment, Grade, Status};
use crate::services::{Criterion, NewStudent, StudentService, StudentSortKey, StudentUpdate};
use crate::storage::Storage;

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a new student
    Add {
        /// Full name
        name: String,
        /// A subject mark, repeatable (e.g., -m Math=91 -m Science=78)
        #[arg(short, long = "mark", value_name = "SUBJECT=MARK")]
        marks: Vec<String>,
    },
    /// Show a student's report card
    Show {
        /// Student name or ID
        student: String,
        /// Which match to use when the name is ambiguous (1-based)
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Rename a student or change marks
    Edit {
        /// Student name or ID
        student: String,
        #[arg(long)]
        pick: Option<usize>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Add or replace a subject mark, repeatable
        #[arg(short, long = "set", value_name = "SUBJECT=MARK")]
        set: Vec<String>,
        /// Remove a subject, repeatable
        #[arg(short, long = "remove", value_name = "SUBJECT")]
        remove: Vec<String>,
    },
    /// Delete a student
    Delete {
        /// Student name or ID
        student: String,
        #[arg(long)]
        pick: Option<usize>,
    },
    /// List all students
    List {
        /// Sort by name, id or average
        #[arg(long, default_value = "name")]
        sort: StudentSortKey,
    },
    /// Find students by grade, status or minimum average
    Filter {
        /// Letter grade (A+, A, B, C, D, F)
        #[arg(short, long)]
        grade: Option<String>,
        /// PASS or FAIL
        #[arg(long)]
        status: Option<String>,
        /// Minimum average (inclusive)
        #[arg(long)]
        min_average: Option<String>,
    },
    /// Show class statistics
    Stats,
    /// Export students to CSV
    Export {
        /// Output file (default: exports/students_export_<timestamp>.csv)
        output: Option<PathBuf>,
        /// Comma-separated columns (default: id, name, every subject, results)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
}

/// Handle a student command
pub fn handle_student_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StudentCommands,
) -> RosterResult<()> {
    let service = StudentService::new(storage);

    match cmd {
        StudentCommands::Add { name, marks } => {
            let marks = marks
                .iter()
                .map(|m| parse_mark_assignment(m))
                .collect::<RosterResult<Vec<_>>>()?;

            let student = service.create(NewStudent { name, marks }, &settings.subjects)?;
            storage.save_students()?;

            println!("Added student: {}", student.name);
            println!("  ID: {}", student.student_id);
            println!(
                "  Average: {:.2}  Grade: {}  Status: {}",
                student.average(),
                student.grade(),
                student.status()
            );
        }

        StudentCommands::Show { student, pick } => {
            let found = select_one(service.read(&student)?, &student, pick)?;
            print!("{}", format_report_card(&found));
        }

        StudentCommands::Edit {
            student,
            pick,
            name,
            set,
            remove,
        } => {
            let found = select_one(service.read(&student)?, &student, pick)?;

            let changes = StudentUpdate {
                name,
                set_marks: set
                    .iter()
                    .map(|m| parse_mark_assignment(m))
                    .collect::<RosterResult<Vec<_>>>()?,
                remove_subjects: remove,
            };
            if changes.is_empty() {
                println!("No changes specified. Use --name, --set or --remove.");
                return Ok(());
            }

            let updated = service.update(&found.student_id, changes)?;
            storage.save_students()?;
            println!("Updated student: {} ({})", updated.name, updated.student_id);
            println!(
                "  Average: {:.2}  Grade: {}  Status: {}",
                updated.average(),
                updated.grade(),
                updated.status()
            );
        }

        StudentCommands::Delete { student, pick } => {
            let found = select_one(service.read(&student)?, &student, pick)?;
            let removed = service.delete(&found.student_id)?;
            storage.save_students()?;
            println!("Deleted student: {} ({})", removed.name, removed.student_id);
        }

        StudentCommands::List { sort } => {
            let students = service.list_all(sort)?;
            print!("{}", format_student_list(&students));
        }

        StudentCommands::Filter {
            grade,
            status,
            min_average,
        } => {
            let mut criteria = Vec::new();
            if let Some(grade) = grade {
                let grade = Grade::parse(&grade).ok_or_else(|| {
                    RosterError::Validation(format!(
                        "Invalid grade '{}'. Valid grades: A+, A, B, C, D, F",
                        grade
                    ))
                })?;
                criteria.push(Criterion::equals("grade", grade.as_str()));
            }
            if let Some(status) = status {
                let status = Status::parse(&status).ok_or_else(|| {
                    RosterError::Validation(format!(
                        "Invalid status '{}'. Use PASS or FAIL",
                        status
                    ))
                })?;
                criteria.push(Criterion::equals("status", status.as_str()));
            }
            if let Some(min) = min_average {
                criteria.push(Criterion::range("average", Some(parse_mark(&min)?), None)?);
            }

            let students = service.filter(&criteria)?;
            if !criteria.is_empty() {
                let described: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();
                println!("Filter: {}", described.join(", "));
            }
            print!("{}", format_student_list(&students));
        }

        StudentCommands::Stats => {
            let report = service.stats()?;
            print!("{}", report.format_terminal());
        }

        StudentCommands::Export { output, fields } => {
            let fields = if fields.is_empty() {
                service.default_export_fields()?
            } else {
                fields
            };
            let output =
                output.unwrap_or_else(|| default_export_path(&storage.paths().exports_dir(), "students"));

            service.export_csv(&output, &fields)?;
            println!(
                "Exported {} student(s) to: {}",
                service.count()?,
                output.display()
            );
        }
    }

    Ok(())
}
