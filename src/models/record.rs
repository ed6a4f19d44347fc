//! The record abstraction shared by every managed entity
//!
//! Search, filtering, analytics and export are written once against
//! [`Record`] and work for employees and students alike.

use std::fmt;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

/// A value read from a record field by name
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue {
    /// Numeric view of the value, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// A keyed entity managed by a record store
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Human-readable entity label ("Employee")
    const ENTITY: &'static str;

    /// Identifier prefix ("EMP")
    const ID_PREFIX: &'static str;

    /// Unique identifier
    fn id(&self) -> &str;

    /// Display name used for searching and sorting
    fn name(&self) -> &str;

    /// Names of the fields this record exposes, in column order
    fn field_names(&self) -> Vec<String>;

    /// Look up a field by name; `None` if the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;
}
