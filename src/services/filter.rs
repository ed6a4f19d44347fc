//! Predicate filtering over record snapshots
//!
//! Results keep the snapshot's enumeration order; callers sort for display.

use std::fmt;

use crate::error::{RosterError, RosterResult};
use crate::models::{FieldValue, Record};

/// One condition on a named field
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Field text contains `needle` (case-insensitive)
    Contains { field: String, needle: String },
    /// Field text equals `value` (case-insensitive)
    Equals { field: String, value: String },
    /// Numeric field within the inclusive bounds; a missing bound is open
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Criterion {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Build a range criterion, rejecting `min > max`
    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> RosterResult<Self> {
        let criterion = Self::Range {
            field: field.into(),
            min,
            max,
        };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Contains { field, .. } | Self::Equals { field, .. } | Self::Range { field, .. } => field,
        }
    }

    /// Reject inverted or non-numeric ranges
    pub fn validate(&self) -> RosterResult<()> {
        if let Self::Range { field, min, max } = self {
            for bound in [min, max].into_iter().flatten() {
                if bound.is_nan() {
                    return Err(RosterError::Validation(format!(
                        "Range bound for '{}' is not a number",
                        field
                    )));
                }
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(RosterError::InvalidRange {
                        field: field.clone(),
                        min: *min,
                        max: *max,
                    });
                }
            }
        }
        Ok(())
    }

    /// Evaluate against one record
    pub fn matches<R: Record>(&self, record: &R) -> RosterResult<bool> {
        let value = record.field(self.field()).ok_or_else(|| {
            RosterError::Validation(format!(
                "{} has no field '{}'",
                R::ENTITY,
                self.field()
            ))
        })?;

        Ok(match self {
            Self::Contains { needle, .. } => value
                .to_string()
                .to_lowercase()
                .contains(&needle.trim().to_lowercase()),
            Self::Equals { value: expected, .. } => {
                value.to_string().eq_ignore_ascii_case(expected.trim())
            }
            Self::Range { field, min, max } => {
                let n = match value {
                    FieldValue::Number(n) => n,
                    _ => {
                        return Err(RosterError::Validation(format!(
                            "Field '{}' is not numeric",
                            field
                        )))
                    }
                };
                min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
            }
        })
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { field, needle } => write!(f, "{} contains '{}'", field, needle),
            Self::Equals { field, value } => write!(f, "{} = '{}'", field, value),
            Self::Range { field, min, max } => match (min, max) {
                (Some(lo), Some(hi)) => write!(f, "{} between {} and {}", field, lo, hi),
                (Some(lo), None) => write!(f, "{} >= {}", field, lo),
                (None, Some(hi)) => write!(f, "{} <= {}", field, hi),
                (None, None) => write!(f, "any {}", field),
            },
        }
    }
}

/// Keep the records satisfying `predicate`, in snapshot order
pub fn filter_by<R, F>(snapshot: &[R], predicate: F) -> Vec<R>
where
    R: Record,
    F: Fn(&R) -> bool,
{
    snapshot.iter().filter(|r| predicate(r)).cloned().collect()
}

/// Keep the records satisfying every criterion, in snapshot order
pub fn filter_records<R: Record>(snapshot: &[R], criteria: &[Criterion]) -> RosterResult<Vec<R>> {
    for criterion in criteria {
        criterion.validate()?;
    }

    let mut kept = Vec::new();
    for record in snapshot {
        let mut keep = true;
        for criterion in criteria {
            if !criterion.matches(record)? {
                keep = false;
                break;
            }
        }
        if keep {
            kept.push(record.clone());
        }
    }
    Ok(kept)
}
