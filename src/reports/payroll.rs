//! Payroll Report
//!
//! Salary statistics across all employees: totals and extremes, the salary
//! band distribution, and the average salary per department.

use crate::display::report::{format_amount, format_bar, separator};
use crate::error::RosterResult;
use crate::models::Employee;

use super::analytics::{bands_from_edges, distribution, group_by, summarize, Distribution, GroupSummary, Summary};

/// Width of the distribution bars
const BAR_WIDTH: usize = 20;

/// Payroll Report
#[derive(Debug, Clone)]
pub struct PayrollReport {
    /// Headcount, mean, extremes and total of salaries
    pub salaries: Summary,
    /// Employees per salary band
    pub bands: Distribution,
    /// Average salary per department, ordered by department name
    pub departments: Vec<GroupSummary>,
}

impl PayrollReport {
    /// Generate the report from a snapshot of employees
    pub fn generate(employees: &[Employee], band_edges: &[f64]) -> RosterResult<Self> {
        let salaries = summarize(employees, |e| e.salary)?;
        let bands = distribution(employees, &bands_from_edges(band_edges), |e| e.salary)?;
        let departments = group_by(employees, |e| e.department.clone(), |e| e.salary)?;

        Ok(Self {
            salaries,
            bands,
            departments,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let s = &self.salaries;

        output.push_str("SALARY STATISTICS\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Employees   : {}\n", s.count));
        output.push_str(&format!("Average Salary    : {}\n", format_amount(s.mean, currency)));
        output.push_str(&format!(
            "Highest Salary    : {} ({})\n",
            format_amount(s.max.value, currency),
            s.max.name
        ));
        output.push_str(&format!(
            "Lowest Salary     : {} ({})\n",
            format_amount(s.min.value, currency),
            s.min.name
        ));
        output.push_str(&format!("Total Payroll     : {}\n", format_amount(s.sum, currency)));

        output.push_str("\nSalary Distribution:\n");
        for bucket in self.bands.buckets.iter().filter(|b| b.count > 0) {
            output.push_str(&format!(
                "  {:<15} : {} {} ({:.1}%)\n",
                bucket.label,
                format_bar(bucket.percentage, 100.0, BAR_WIDTH),
                bucket.count,
                bucket.percentage
            ));
        }

        output.push_str("\nAverage Salary by Department:\n");
        for dept in &self.departments {
            output.push_str(&format!(
                "  {:<20} : {} ({} employee{})\n",
                display_department(&dept.key),
                format_amount(dept.mean, currency),
                dept.count,
                if dept.count == 1 { "" } else { "s" }
            ));
        }
        output.push_str(&separator(60));
        output.push('\n');

        output
    }
}

/// Label for a department, naming the blank one
pub fn display_department(department: &str) -> &str {
    if department.trim().is_empty() {
        "(none)"
    } else {
        department
    }
}
