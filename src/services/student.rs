//! Student service
//!
//! Business logic for student records: creation with per-subject marks,
//! lookup, updates of names and marks, listings, filters, class statistics
//! and CSV export.
//!
//! Mutations change the in-memory store only; callers decide when to save.

use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

use super::filter::{filter_records, Criterion};
use super::search::{resolve, SearchOutcome};
use crate::error::{RosterError, RosterResult};
use crate::export::export_csv_to_path;
use crate::models::student::DERIVED_FIELDS;
use crate::models::{validate_name, Marks, Student};
use crate::reports::ClassReport;
use crate::storage::Storage;

/// Input for a new student
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: String,
    /// Subject and mark pairs, in entry order
    pub marks: Vec<(String, f64)>,
}

/// Changes to apply to a student
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    /// Marks to add or replace
    pub set_marks: Vec<(String, f64)>,
    /// Subjects to drop; each must be present
    pub remove_subjects: Vec<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.set_marks.is_empty() && self.remove_subjects.is_empty()
    }
}

/// Display order for student listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudentSortKey {
    #[default]
    Name,
    Id,
    /// Highest average first
    Average,
}

impl FromStr for StudentSortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            "average" | "avg" => Ok(Self::Average),
            other => Err(RosterError::Validation(format!(
                "Unknown sort key '{}'. Use name, id or average",
                other
            ))),
        }
    }
}

/// Service for student management
pub struct StudentService<'a> {
    storage: &'a Storage,
}

impl<'a> StudentService<'a> {
    /// Create a new student service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new student with the next free identifier
    ///
    /// Every subject in `required_subjects` must be given a mark.
    pub fn create(&self, input: NewStudent, required_subjects: &[String]) -> RosterResult<Student> {
        let name = input.name.trim().to_string();
        validate_name(&name)?;

        let mut marks = Marks::new();
        for (subject, mark) in &input.marks {
            marks.insert(subject, *mark)?;
        }

        let missing: Vec<&str> = required_subjects
            .iter()
            .map(String::as_str)
            .filter(|s| !marks.contains(s))
            .collect();
        if !missing.is_empty() {
            return Err(RosterError::Validation(format!(
                "Missing marks for: {}",
                missing.join(", ")
            )));
        }

        self.storage.students.insert_new(|id| {
            let student = Student::new(id, name, marks);
            student.validate()?;
            Ok(student)
        })
    }

    /// Resolve a query against all students
    pub fn read(&self, query: &str) -> RosterResult<SearchOutcome<Student>> {
        Ok(resolve(query, &self.storage.students.all()?))
    }

    /// Resolve a query to exactly one student
    pub fn find(&self, query: &str, pick: Option<usize>) -> RosterResult<Student> {
        self.read(query)?.into_single(query, pick)
    }

    /// Get a student by identifier
    pub fn get(&self, id: &str) -> RosterResult<Student> {
        self.storage.students.get(id)
    }

    /// Rename a student or change marks; nothing changes on any error
    pub fn update(&self, id: &str, changes: StudentUpdate) -> RosterResult<Student> {
        self.storage.students.update(id, |student| {
            if let Some(name) = changes.name {
                student.name = name.trim().to_string();
            }
            for subject in &changes.remove_subjects {
                if student.marks.remove(subject).is_none() {
                    return Err(RosterError::Validation(format!(
                        "{} has no mark for '{}'",
                        student.name,
                        subject.trim()
                    )));
                }
            }
            for (subject, mark) in &changes.set_marks {
                student.marks.set(subject, *mark)?;
            }
            student.validate()
        })
    }

    /// Delete a student, returning the removed record
    pub fn delete(&self, id: &str) -> RosterResult<Student> {
        self.storage.students.delete(id)
    }

    /// All students in the requested order
    pub fn list_all(&self, sort: StudentSortKey) -> RosterResult<Vec<Student>> {
        let mut students = self.storage.students.all()?;
        sort_students(&mut students, sort);
        Ok(students)
    }

    /// Students satisfying every criterion, sorted by name
    pub fn filter(&self, criteria: &[Criterion]) -> RosterResult<Vec<Student>> {
        let mut students = filter_records(&self.storage.students.all()?, criteria)?;
        sort_students(&mut students, StudentSortKey::Name);
        Ok(students)
    }

    /// Class statistics over all students
    pub fn stats(&self) -> RosterResult<ClassReport> {
        ClassReport::generate(&self.storage.students.all()?)
    }

    /// Number of students
    pub fn count(&self) -> RosterResult<usize> {
        self.storage.students.len()
    }

    /// Identifier, name, every subject in first-seen order, then the
    /// derived columns
    pub fn default_export_fields(&self) -> RosterResult<Vec<String>> {
        let mut fields = vec!["student_id".to_string(), "name".to_string()];
        let mut subjects: Vec<String> = Vec::new();
        for student in self.storage.students.all()? {
            for subject in student.marks.subjects() {
                if !subjects.iter().any(|s| s.eq_ignore_ascii_case(subject)) {
                    subjects.push(subject.to_string());
                }
            }
        }
        fields.extend(subjects);
        fields.extend(DERIVED_FIELDS.iter().map(|f| f.to_string()));
        Ok(fields)
    }

    /// Export all students, in store order, to a CSV file
    pub fn export_csv(&self, path: &Path, fields: &[String]) -> RosterResult<()> {
        export_csv_to_path(&self.storage.students.all()?, fields, path)
    }
}

fn by_name(a: &Student, b: &Student) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.student_id.cmp(&b.student_id))
}

fn sort_students(students: &mut [Student], sort: StudentSortKey) {
    match sort {
        StudentSortKey::Name => students.sort_by(by_name),
        StudentSortKey::Id => students.sort_by(|a, b| {
            a.student_id
                .len()
                .cmp(&b.student_id.len())
                .then_with(|| a.student_id.cmp(&b.student_id))
        }),
        StudentSortKey::Average => students.sort_by(|a, b| {
            b.average()
                .partial_cmp(&a.average())
                .unwrap_or(Ordering::Equal)
                .then_with(|| by_name(a, b))
        }),
    }
}
