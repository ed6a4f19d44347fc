//! Roster - employee and student record management
//!
//! This library provides the core of the Roster record manager: a generic
//! in-memory store with generated identifiers, JSON persistence, lookup by
//! id or name, predicate filtering, aggregate statistics and CSV export.
//! Employees and students are the two managed record kinds; everything past
//! the models is written once against the [`models::Record`] trait.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, derived student results and identifier generation
//! - `storage`: In-memory stores and the JSON file gateway
//! - `services`: Business logic, search and filtering
//! - `reports`: Aggregate statistics and the payroll and class reports
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `roster` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::config::RosterPaths;
//! use roster::services::{EmployeeService, NewEmployee};
//! use roster::storage::Storage;
//!
//! let (storage, _report) = Storage::open(RosterPaths::new()?)?;
//! let employee = EmployeeService::new(&storage).create(NewEmployee {
//!     name: "Asha Rao".into(),
//!     department: "Engineering".into(),
//!     salary: 72000.0,
//!     ..Default::default()
//! })?;
//! storage.save_employees()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::RosterError;
