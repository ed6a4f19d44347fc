//! Path management for Roster
//!
//! Provides platform-aware path resolution for configuration, data, and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `ROSTER_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/roster` on Linux,
//!    `~/Library/Application Support/roster` on macOS, `%APPDATA%\roster` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::RosterError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Manages all paths used by Roster
#[derive(Debug, Clone)]
pub struct RosterPaths {
    /// Base directory for all Roster data
    base_dir: PathBuf,
}

impl RosterPaths {
    /// Create a new RosterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, RosterError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RosterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default export directory (`<base>/exports/`)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to employees.json
    pub fn employees_file(&self) -> PathBuf {
        self.data_dir().join("employees.json")
    }

    /// Get the path to students.json
    pub fn students_file(&self) -> PathBuf {
        self.data_dir().join("students.json")
    }

    /// Ensure the base, data, and export directories exist
    pub fn ensure_directories(&self) -> Result<(), RosterError> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.exports_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                RosterError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, RosterError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| RosterError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("roster"))
}
