//! Core data models for Roster
//!
//! This module contains the managed entities (employees and students), the
//! [`Record`] trait that the generic engine works against, and identifier
//! generation.

pub mod employee;
pub mod ids;
pub mod record;
pub mod student;

pub use employee::{parse_salary, validate_name, Employee, DEFAULT_POSITION};
pub use ids::next_id;
pub use record::{FieldValue, Record};
pub use student::{
    parse_mark, parse_mark_assignment, validate_subject, Grade, Marks, Status, Student,
};
