//! Reports module for Roster
//!
//! Generic aggregate statistics over record snapshots, and the payroll and
//! class reports built on them.

pub mod analytics;
pub mod class;
pub mod payroll;

pub use analytics::{Bin, Bucket, Distribution, Extreme, GroupSummary, Summary};
pub use class::ClassReport;
pub use payroll::PayrollReport;
