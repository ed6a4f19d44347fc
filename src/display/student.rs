//! Student display formatting
//!
//! Report cards and class listings.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Student;

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subjects")]
    subjects: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format a list of students as a table
pub fn format_student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No student records found.\n".to_string();
    }

    let rows = students.iter().map(|s| StudentRow {
        id: s.student_id.clone(),
        name: truncate(&s.name, 30),
        subjects: s.marks.len(),
        total: format!("{:.2}", s.total()),
        average: format!("{:.2}", s.average()),
        grade: s.grade().to_string(),
        status: s.status().to_string(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str(&format!("\n{} student(s)\n", students.len()));
    output
}

/// Format a single student's report card
pub fn format_report_card(student: &Student) -> String {
    let mut output = String::new();

    output.push_str(&format!("Student ID : {}\n", student.student_id));
    output.push_str(&format!("Name       : {}\n", student.name));
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str("Subjects & Marks:\n");
    if student.marks.is_empty() {
        output.push_str("  (no subjects recorded)\n");
    }
    for (subject, mark) in student.marks.iter() {
        output.push_str(&format!("  {:<12} : {:6.2}\n", subject, mark));
    }
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&format!("Total      : {:6.2}\n", student.total()));
    output.push_str(&format!("Average    : {:6.2}\n", student.average()));
    output.push_str(&format!("Grade      : {}\n", student.grade()));
    output.push_str(&format!("Status     : {}\n", student.status()));

    output
}
