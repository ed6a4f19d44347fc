//! Employee model
//!
//! An employee record: identity, department, position, salary and hire date.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::record::{FieldValue, Record};
use crate::error::{RosterError, RosterResult};

/// Position assigned when none is given
pub const DEFAULT_POSITION: &str = "Staff";

/// Longest accepted name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// An employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier (e.g., "EMP001")
    pub emp_id: String,

    /// Full name
    pub name: String,

    /// Department the employee belongs to
    pub department: String,

    /// Annual salary, never negative
    pub salary: f64,

    /// Job title
    #[serde(default = "default_position")]
    pub position: String,

    /// Date the employee joined
    #[serde(default = "today", deserialize_with = "deserialize_hire_date")]
    pub hire_date: NaiveDate,
}

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Older data files store an empty string when no hire date was recorded
fn deserialize_hire_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(today());
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(serde::de::Error::custom)
}

impl Employee {
    /// Create an employee hired today with the default position
    pub fn new(
        emp_id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            department: department.into(),
            salary,
            position: default_position(),
            hire_date: today(),
        }
    }

    /// Set the position, falling back to the default when blank
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = normalize_position(&position.into());
        self
    }

    pub fn with_hire_date(mut self, hire_date: NaiveDate) -> Self {
        self.hire_date = hire_date;
        self
    }

    /// Validate the employee
    pub fn validate(&self) -> RosterResult<()> {
        validate_name(&self.name)?;
        validate_salary(self.salary)?;
        Ok(())
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.emp_id, self.department)
    }
}

impl Record for Employee {
    const ENTITY: &'static str = "Employee";
    const ID_PREFIX: &'static str = "EMP";

    fn id(&self) -> &str {
        &self.emp_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        EMPLOYEE_FIELDS.iter().map(|f| f.to_string()).collect()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name.to_lowercase().as_str() {
            "emp_id" | "id" => FieldValue::from(self.emp_id.as_str()),
            "name" => FieldValue::from(self.name.as_str()),
            "position" => FieldValue::from(self.position.as_str()),
            "department" => FieldValue::from(self.department.as_str()),
            "salary" => FieldValue::from(self.salary),
            "hire_date" => FieldValue::from(self.hire_date),
            _ => return None,
        };
        Some(value)
    }
}

/// Exported employee columns, in order
pub const EMPLOYEE_FIELDS: [&str; 6] = [
    "emp_id",
    "name",
    "position",
    "department",
    "salary",
    "hire_date",
];

/// Check that a name is present and not too long
pub fn validate_name(name: &str) -> RosterResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::Validation("Name cannot be empty".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(RosterError::Validation(format!(
            "Name too long ({} chars, max {})",
            len, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Check that a salary is a finite, non-negative amount
pub fn validate_salary(salary: f64) -> RosterResult<()> {
    if !salary.is_finite() {
        return Err(RosterError::Validation("Salary must be a number".into()));
    }
    if salary < 0.0 {
        return Err(RosterError::Validation("Salary cannot be negative".into()));
    }
    Ok(())
}

/// Parse a salary typed by a user
///
/// Accepts plain numbers with optional thousands separators and a leading
/// currency symbol: "45000", "45,000.50", "₹45000", "$1,200".
pub fn parse_salary(input: &str) -> RosterResult<f64> {
    let trimmed = input.trim();
    let without_symbol = trimmed.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.');
    let cleaned: String = without_symbol.chars().filter(|c| *c != ',').collect();

    let salary: f64 = cleaned.parse().map_err(|_| {
        RosterError::Validation(format!(
            "Invalid salary '{}'. Please enter a numeric value",
            trimmed
        ))
    })?;

    validate_salary(salary)?;
    Ok(salary)
}

/// Trim a position, substituting the default when blank
pub fn normalize_position(position: &str) -> String {
    let trimmed = position.trim();
    if trimmed.is_empty() {
        default_position()
    } else {
        trimmed.to_string()
    }
}
