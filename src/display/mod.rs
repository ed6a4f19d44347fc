//! Terminal display formatting
//!
//! Table and detail views for records, plus shared report helpers.

pub mod employee;
pub mod report;
pub mod student;

pub use employee::{format_department_roster, format_employee_details, format_employee_list};
pub use report::format_amount;
pub use student::{format_report_card, format_student_list};

use crate::models::Record;

/// Numbered list of the records an ambiguous query matched
pub fn format_candidates<R: Record>(query: &str, candidates: &[R]) -> String {
    let mut output = format!(
        "Multiple {} records match '{}':\n",
        R::ENTITY.to_lowercase(),
        query.trim()
    );
    for (i, record) in candidates.iter().enumerate() {
        output.push_str(&format!("  {}. {} ({})\n", i + 1, record.name(), record.id()));
    }
    output
}
