//! Student model
//!
//! A student record holds per-subject marks. Total, average, letter grade and
//! pass/fail status are derived from the marks on every call and never
//! stored, so editing a mark is immediately reflected everywhere.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

use super::employee::validate_name;
use super::record::{FieldValue, Record};
use crate::error::{RosterError, RosterResult};

/// Highest possible mark
pub const MAX_MARK: f64 = 100.0;

/// Lowest mark in any single subject that still allows a pass
pub const PASS_MARK: f64 = 40.0;

/// Letter grade banded from the average mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades from best to worst
    pub const ALL: [Grade; 6] = [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Band an average mark into a grade
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Self::APlus
        } else if average >= 80.0 {
            Self::A
        } else if average >= 70.0 {
            Self::B
        } else if average >= 60.0 {
            Self::C
        } else if average >= 50.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Parse a grade letter (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass/fail outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pass" | "passed" => Some(Self::Pass),
            "fail" | "failed" => Some(Self::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject marks in entry order
///
/// Serialized as a JSON object (`{"Math": 91.0, ...}`) with key order kept.
/// Subject lookups are case-insensitive and a subject appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Marks(Vec<(String, f64)>);

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mark for a subject that is not present yet
    pub fn insert(&mut self, subject: &str, mark: f64) -> RosterResult<()> {
        let subject = validate_subject(subject)?;
        validate_mark(mark)?;
        if self.contains(&subject) {
            return Err(RosterError::Validation(format!(
                "Subject '{}' already has a mark",
                subject
            )));
        }
        self.0.push((subject, mark));
        Ok(())
    }

    /// Add or replace the mark for a subject
    pub fn set(&mut self, subject: &str, mark: f64) -> RosterResult<()> {
        let subject = validate_subject(subject)?;
        validate_mark(mark)?;
        match self.position(&subject) {
            Some(i) => self.0[i].1 = mark,
            None => self.0.push((subject, mark)),
        }
        Ok(())
    }

    /// Remove a subject, returning its mark
    pub fn remove(&mut self, subject: &str) -> Option<f64> {
        let i = self.position(subject)?;
        Some(self.0.remove(i).1)
    }

    pub fn get(&self, subject: &str) -> Option<f64> {
        self.position(subject).map(|i| self.0[i].1)
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.position(subject).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(s, _)| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(s, m)| (s.as_str(), *m))
    }

    fn position(&self, subject: &str) -> Option<usize> {
        let subject = subject.trim();
        self.0
            .iter()
            .position(|(s, _)| s.eq_ignore_ascii_case(subject))
    }
}

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (subject, mark) in &self.0 {
            map.serialize_entry(subject, mark)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Marks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MarksVisitor;

        impl<'de> Visitor<'de> for MarksVisitor {
            type Value = Marks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of subject names to marks")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Marks, A::Error> {
                let mut entries: Vec<(String, f64)> = Vec::new();
                while let Some((subject, mark)) = access.next_entry::<String, f64>()? {
                    let subject = validate_subject(&subject).map_err(serde::de::Error::custom)?;
                    // Keys differing only in case collapse onto the first spelling
                    let existing = entries.iter().find(|(s, _)| s.eq_ignore_ascii_case(&subject));
                    if let Some(kept) = existing {
                        warn!(
                            kept = %kept.0,
                            dropped = %subject,
                            mark,
                            "ignoring duplicate subject"
                        );
                        continue;
                    }
                    entries.push((subject, mark));
                }
                Ok(Marks(entries))
            }
        }

        deserializer.deserialize_map(MarksVisitor)
    }
}

/// A student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier (e.g., "STU001")
    pub student_id: String,

    /// Full name
    pub name: String,

    /// Marks per subject
    #[serde(default)]
    pub marks: Marks,
}

impl Student {
    pub fn new(student_id: impl Into<String>, name: impl Into<String>, marks: Marks) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            marks,
        }
    }

    /// Sum of all marks
    pub fn total(&self) -> f64 {
        self.marks.iter().map(|(_, m)| m).sum()
    }

    /// Mean mark, or 0 when no subjects are recorded
    pub fn average(&self) -> f64 {
        if self.marks.is_empty() {
            0.0
        } else {
            self.total() / self.marks.len() as f64
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }

    /// PASS requires a non-F grade and no single mark below the pass mark
    pub fn status(&self) -> Status {
        let every_subject_passed = self.marks.iter().all(|(_, m)| m >= PASS_MARK);
        if self.grade() != Grade::F && every_subject_passed {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn validate(&self) -> RosterResult<()> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.student_id)
    }
}

impl Record for Student {
    const ENTITY: &'static str = "Student";
    const ID_PREFIX: &'static str = "STU";

    fn id(&self) -> &str {
        &self.student_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        let mut names = vec!["student_id".to_string(), "name".to_string()];
        names.extend(self.marks.subjects().map(str::to_string));
        names.extend(DERIVED_FIELDS.iter().map(|f| f.to_string()));
        names
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name.to_lowercase().as_str() {
            "student_id" | "id" => FieldValue::from(self.student_id.as_str()),
            "name" => FieldValue::from(self.name.as_str()),
            "total" => FieldValue::from(self.total()),
            "average" => FieldValue::from(self.average()),
            "grade" => FieldValue::from(self.grade().as_str()),
            "status" => FieldValue::from(self.status().as_str()),
            _ => return self.marks.get(name).map(FieldValue::Number),
        };
        Some(value)
    }
}

/// Computed student columns, exported after the subject columns
pub const DERIVED_FIELDS: [&str; 4] = ["total", "average", "grade", "status"];

/// Built-in student fields a subject may not shadow
const RESERVED_FIELDS: [&str; 3] = ["student_id", "id", "name"];

/// Trim a subject name and check it does not collide with a built-in field
pub fn validate_subject(subject: &str) -> RosterResult<String> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return Err(RosterError::Validation("Subject name cannot be empty".into()));
    }
    if RESERVED_FIELDS
        .iter()
        .chain(DERIVED_FIELDS.iter())
        .any(|f| f.eq_ignore_ascii_case(trimmed))
    {
        return Err(RosterError::Validation(format!(
            "'{}' is a built-in student field and cannot be used as a subject",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Check that a mark lies within 0-100
pub fn validate_mark(mark: f64) -> RosterResult<()> {
    if !mark.is_finite() || !(0.0..=MAX_MARK).contains(&mark) {
        return Err(RosterError::Validation(format!(
            "Marks must be between 0 and {}",
            MAX_MARK
        )));
    }
    Ok(())
}

/// Parse a mark typed by a user
pub fn parse_mark(input: &str) -> RosterResult<f64> {
    let trimmed = input.trim();
    let mark: f64 = trimmed.parse().map_err(|_| {
        RosterError::Validation(format!("Invalid mark '{}'. Please enter a number", trimmed))
    })?;
    validate_mark(mark)?;
    Ok(mark)
}

/// Parse a `Subject=Mark` pair such as `Math=91.5`
pub fn parse_mark_assignment(input: &str) -> RosterResult<(String, f64)> {
    let (subject, mark) = input.split_once('=').ok_or_else(|| {
        RosterError::Validation(format!(
            "Invalid mark '{}'. Use the form Subject=Mark, e.g. Math=91",
            input
        ))
    })?;
    let subject = validate_subject(subject)?;
    Ok((subject, parse_mark(mark)?))
}
