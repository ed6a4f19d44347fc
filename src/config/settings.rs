//! User settings for Roster
//!
//! Manages user preferences: currency symbol, date format, the default
//! subject list offered when adding students, and the salary band edges
//! used by the payroll report.

use std::fmt::Write;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::paths::RosterPaths;
use crate::error::RosterError;
use crate::models::validate_subject;

/// User settings for Roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying salaries
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Subjects every new student must be given a mark for
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,

    /// Ascending salary band boundaries for the payroll distribution
    #[serde(default = "default_salary_band_edges")]
    pub salary_band_edges: Vec<f64>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_subjects() -> Vec<String> {
    vec!["Math".into(), "Science".into(), "English".into()]
}

fn default_salary_band_edges() -> Vec<f64> {
    vec![30_000.0, 50_000.0, 75_000.0, 100_000.0]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            subjects: default_subjects(),
            salary_band_edges: default_salary_band_edges(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RosterPaths) -> Result<Self, RosterError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RosterError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RosterError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RosterPaths) -> Result<(), RosterError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RosterError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RosterError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Replace the default subject list
    pub fn set_subjects<I, S>(&mut self, subjects: I) -> Result<(), RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let subjects: Vec<String> = subjects
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .collect();
        let previous = std::mem::replace(&mut self.subjects, subjects);
        if let Err(e) = self.validate() {
            self.subjects = previous;
            return Err(e);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), RosterError> {
        for (i, subject) in self.subjects.iter().enumerate() {
            validate_subject(subject).map_err(|e| match e {
                RosterError::Validation(reason) => RosterError::Config(reason),
                other => other,
            })?;
            if self.subjects[..i]
                .iter()
                .any(|s| s.eq_ignore_ascii_case(subject))
            {
                return Err(RosterError::Config(format!(
                    "Subject '{}' is listed twice",
                    subject
                )));
            }
        }

        if self.date_format.trim().is_empty() || !formats_dates(&self.date_format) {
            return Err(RosterError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }

        if self
            .salary_band_edges
            .iter()
            .any(|edge| !edge.is_finite() || *edge <= 0.0)
        {
            return Err(RosterError::Config(
                "Salary band edges must be positive numbers".into(),
            ));
        }

        if self
            .salary_band_edges
            .windows(2)
            .any(|pair| !(pair[0] < pair[1]))
        {
            return Err(RosterError::Config(
                "Salary band edges must be strictly ascending".into(),
            ));
        }

        Ok(())
    }
}

/// Whether a strftime pattern renders a calendar date without error
///
/// Unknown specifiers and time-of-day fields both fail when applied to a date.
fn formats_dates(pattern: &str) -> bool {
    let mut rendered = String::new();
    write!(rendered, "{}", Local::now().date_naive().format(pattern)).is_ok()
}
