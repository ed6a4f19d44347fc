//! Employee display formatting
//!
//! Formats employees for terminal output in table and detail views.

use std::fmt::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_amount, truncate};
use crate::models::Employee;
use crate::reports::payroll::display_department;

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Hired")]
    hired: String,
}

/// Format a list of employees as a table
pub fn format_employee_list(employees: &[Employee], currency: &str) -> String {
    if employees.is_empty() {
        return "No employee records found.\n".to_string();
    }

    let rows = employees.iter().map(|e| EmployeeRow {
        id: e.emp_id.clone(),
        name: truncate(&e.name, 30),
        position: truncate(&e.position, 20),
        department: truncate(display_department(&e.department), 20),
        salary: format_amount(e.salary, currency),
        hired: e.hire_date.to_string(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str(&format!("\n{} employee(s)\n", employees.len()));
    output
}

/// Format a single employee's details
pub fn format_employee_details(employee: &Employee, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Employee ID   : {}\n", employee.emp_id));
    output.push_str(&format!("Name          : {}\n", employee.name));
    output.push_str(&format!("Position      : {}\n", employee.position));
    output.push_str(&format!("Department    : {}\n", display_department(&employee.department)));
    output.push_str(&format!(
        "Salary        : {}\n",
        format_amount(employee.salary, currency)
    ));
    let mut hired = String::new();
    if write!(hired, "{}", employee.hire_date.format(date_format)).is_err() {
        hired = employee.hire_date.to_string();
    }
    output.push_str(&format!("Hire Date     : {}\n", hired));

    output
}

/// Format employees grouped by department
pub fn format_department_roster(groups: &[(String, Vec<Employee>)], currency: &str) -> String {
    if groups.is_empty() {
        return "No employee records found.\n".to_string();
    }

    let mut output = String::new();
    for (department, members) in groups {
        output.push_str(&format!(
            "\n{} ({} employee{})\n",
            display_department(department).to_uppercase(),
            members.len(),
            if members.len() == 1 { "" } else { "s" }
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for e in members {
            output.push_str(&format!(
                "  {:<20} | {:<15} | {}\n",
                truncate(&e.name, 20),
                truncate(&e.position, 15),
                format_amount(e.salary, currency)
            ));
        }
    }
    output
}
