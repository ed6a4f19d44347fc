//! Employee CLI commands
//!
//! Implements CLI commands for employee management.

use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_date, select_one};
use crate::config::Settings;
use crate::display::{format_department_roster, format_employee_details, format_employee_list};
use crate::error::RosterResult;
use crate::export::default_export_path;
use crate::models::parse_salary;
use crate::services::{Criterion, EmployeeService, EmployeeSortKey, EmployeeUpdate, NewEmployee};
use crate::storage::Storage;

/// Employee subcommands
#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Add a new employee
    Add {
        /// Full name
        name: String,
        /// Department
        #[arg(short, long)]
        department: String,
        /// Annual salary (e.g., "45000" or "45,000.50")
        #[arg(short, long)]
        salary: String,
        /// Job title (default: Staff)
        #[arg(short, long)]
        position: Option<String>,
        /// Hire date (YYYY-MM-DD, default: today)
        #[arg(long)]
        hired: Option<String>,
    },
    /// Show an employee's details
    Show {
        /// Employee name or ID
        employee: String,
        /// Which match to use when the name is ambiguous (1-based)
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Edit an employee
    Edit {
        /// Employee name or ID
        employee: String,
        #[arg(long)]
        pick: Option<usize>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New job title
        #[arg(short, long)]
        position: Option<String>,
        /// New department
        #[arg(short, long)]
        department: Option<String>,
        /// New salary
        #[arg(short, long)]
        salary: Option<String>,
        /// New hire date (YYYY-MM-DD)
        #[arg(long)]
        hired: Option<String>,
    },
    /// Delete an employee
    Delete {
        /// Employee name or ID
        employee: String,
        #[arg(long)]
        pick: Option<usize>,
    },
    /// List all employees
    List {
        /// Sort by name, id, salary, department or hire-date
        #[arg(long, default_value = "name")]
        sort: EmployeeSortKey,
    },
    /// List employees grouped by department
    Departments,
    /// Find employees by department, position or salary range
    Filter {
        /// Department contains this text
        #[arg(short, long)]
        department: Option<String>,
        /// Position contains this text
        #[arg(short, long)]
        position: Option<String>,
        /// Minimum salary (inclusive)
        #[arg(long)]
        min_salary: Option<String>,
        /// Maximum salary (inclusive)
        #[arg(long)]
        max_salary: Option<String>,
    },
    /// Show salary statistics
    Stats,
    /// Export employees to CSV
    Export {
        /// Output file (default: exports/employees_export_<timestamp>.csv)
        output: Option<PathBuf>,
        /// Comma-separated columns (default: all)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
}

/// Handle an employee command
pub fn handle_employee_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EmployeeCommands,
) -> RosterResult<()> {
    let service = EmployeeService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        EmployeeCommands::Add {
            name,
            department,
            salary,
            position,
            hired,
        } => {
            let employee = service.create(NewEmployee {
                name,
                department,
                salary: parse_salary(&salary)?,
                position,
                hire_date: hired.as_deref().map(parse_date).transpose()?,
            })?;
            storage.save_employees()?;

            println!("Added employee: {}", employee.name);
            println!("  ID: {}", employee.emp_id);
        }

        EmployeeCommands::Show { employee, pick } => {
            let found = select_one(service.read(&employee)?, &employee, pick)?;
            print!(
                "{}",
                format_employee_details(&found, currency, &settings.date_format)
            );
        }

        EmployeeCommands::Edit {
            employee,
            pick,
            name,
            position,
            department,
            salary,
            hired,
        } => {
            let found = select_one(service.read(&employee)?, &employee, pick)?;

            let changes = EmployeeUpdate {
                name,
                position,
                department,
                salary: salary.as_deref().map(parse_salary).transpose()?,
                hire_date: hired.as_deref().map(parse_date).transpose()?,
            };
            if changes.is_empty() {
                println!("No changes specified. Use --name, --position, --department, --salary or --hired.");
                return Ok(());
            }

            let updated = service.update(&found.emp_id, changes)?;
            storage.save_employees()?;
            println!("Updated employee: {} ({})", updated.name, updated.emp_id);
        }

        EmployeeCommands::Delete { employee, pick } => {
            let found = select_one(service.read(&employee)?, &employee, pick)?;
            let removed = service.delete(&found.emp_id)?;
            storage.save_employees()?;
            println!("Deleted employee: {} ({})", removed.name, removed.emp_id);
        }

        EmployeeCommands::List { sort } => {
            let employees = service.list_all(sort)?;
            print!("{}", format_employee_list(&employees, currency));
        }

        EmployeeCommands::Departments => {
            let groups = service.by_department()?;
            print!("{}", format_department_roster(&groups, currency));
        }

        EmployeeCommands::Filter {
            department,
            position,
            min_salary,
            max_salary,
        } => {
            let mut criteria = Vec::new();
            if let Some(department) = department {
                criteria.push(Criterion::contains("department", department));
            }
            if let Some(position) = position {
                criteria.push(Criterion::contains("position", position));
            }
            let min = min_salary.as_deref().map(parse_salary).transpose()?;
            let max = max_salary.as_deref().map(parse_salary).transpose()?;
            if min.is_some() || max.is_some() {
                criteria.push(Criterion::range("salary", min, max)?);
            }

            let employees = service.filter(&criteria)?;
            if !criteria.is_empty() {
                let described: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();
                println!("Filter: {}", described.join(", "));
            }
            print!("{}", format_employee_list(&employees, currency));
        }

        EmployeeCommands::Stats => {
            let report = service.stats(&settings.salary_band_edges)?;
            print!("{}", report.format_terminal(currency));
        }

        EmployeeCommands::Export { output, fields } => {
            let fields = if fields.is_empty() {
                service.default_export_fields()
            } else {
                fields
            };
            let output =
                output.unwrap_or_else(|| default_export_path(&storage.paths().exports_dir(), "employees"));

            service.export_csv(&output, &fields)?;
            println!(
                "Exported {} employee(s) to: {}",
                service.count()?,
                output.display()
            );
        }
    }

    Ok(())
}
