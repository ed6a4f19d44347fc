//! Configuration module for Roster
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RosterPaths;
pub use settings::Settings;
