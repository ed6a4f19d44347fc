//! Class Report
//!
//! Results across all students: pass rate, spread of averages and the grade
//! distribution.

use crate::display::report::{format_bar, separator};
use crate::error::RosterResult;
use crate::models::{Grade, Status, Student};

use super::analytics::{ratio, summarize, tally, Distribution, Summary};

const BAR_WIDTH: usize = 20;

/// Class Report
#[derive(Debug, Clone)]
pub struct ClassReport {
    /// Percentage of students with PASS status
    pub pass_rate: f64,
    /// Statistics of per-student averages
    pub averages: Summary,
    /// Students per grade, A+ first
    pub grades: Distribution,
}

impl ClassReport {
    /// Generate the report from a snapshot of students
    pub fn generate(students: &[Student]) -> RosterResult<Self> {
        let averages = summarize(students, Student::average)?;
        let pass_rate = ratio(students, |s| s.status() == Status::Pass)?;
        let labels: Vec<&str> = Grade::ALL.iter().map(Grade::as_str).collect();
        let grades = tally(students, &labels, |s| s.grade().to_string())?;

        Ok(Self {
            pass_rate,
            averages,
            grades,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let a = &self.averages;

        output.push_str("CLASS STATISTICS\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Students    : {}\n", a.count));
        output.push_str(&format!("Pass Rate         : {:.1}%\n", self.pass_rate));
        output.push_str(&format!("Average Score     : {:.2}\n", a.mean));
        output.push_str(&format!("Highest Average   : {:.2} ({})\n", a.max.value, a.max.name));
        output.push_str(&format!("Lowest Average    : {:.2} ({})\n", a.min.value, a.min.name));

        output.push_str("\nGrade Distribution:\n");
        for bucket in &self.grades.buckets {
            output.push_str(&format!(
                "  {:<3} : {} {} ({:.1}%)\n",
                bucket.label,
                format_bar(bucket.percentage, 100.0, BAR_WIDTH),
                bucket.count,
                bucket.percentage
            ));
        }
        output.push_str(&separator(60));
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::models::Marks;

    fn student(id: &str, name: &str, marks: &[(&str, f64)]) -> Student {
        let mut m = Marks::new();
        for (subject, mark) in marks {
            m.insert(subject, *mark).unwrap();
        }
        Student::new(id, name, m)
    }

    fn class() -> Vec<Student> {
        vec![
            student("STU001", "Ann", &[("Math", 95.0), ("Science", 91.0)]),
            student("STU002", "Ben", &[("Math", 100.0), ("Science", 30.0)]),
            student("STU003", "Cara", &[("Math", 40.0), ("Science", 42.0)]),
            student("STU004", "Dev", &[("Math", 75.0), ("Science", 71.0)]),
        ]
    }

    #[test]
    fn test_generate() {
        let report = ClassReport::generate(&class()).unwrap();
        assert_eq!(report.averages.count, 4);
        assert_eq!(report.pass_rate, 50.0);
        assert_eq!(report.averages.max.name, "Ann");
        assert_eq!(report.averages.min.name, "Cara");

        let counts: Vec<_> = report.grades.buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();
        assert_eq!(
            counts,
            [("A+", 1), ("A", 0), ("B", 1), ("C", 1), ("D", 0), ("F", 1)]
        );
        assert_eq!(report.grades.unbinned, 0);
    }

    #[test]
    fn test_empty_is_reported() {
        assert!(matches!(
            ClassReport::generate(&[]),
            Err(RosterError::EmptyStore("Student"))
        ));
    }

    #[test]
    fn test_format_terminal() {
        let output = ClassReport::generate(&class()).unwrap().format_terminal();
        assert!(output.contains("Total Students    : 4"));
        assert!(output.contains("Pass Rate         : 50.0%"));
        assert!(output.contains("Highest Average   : 93.00 (Ann)"));
        assert!(output.contains("A+"));
        assert!(output.contains("(25.0%)"));
    }
}
