//! Service layer for Roster
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, lookup with disambiguation, filtering, statistics and export.

pub mod employee;
pub mod filter;
pub mod search;
pub mod student;

pub use employee::{EmployeeService, EmployeeSortKey, EmployeeUpdate, NewEmployee};
pub use filter::{filter_by, filter_records, Criterion};
pub use search::{resolve, SearchOutcome};
pub use student::{NewStudent, StudentService, StudentSortKey, StudentUpdate};
