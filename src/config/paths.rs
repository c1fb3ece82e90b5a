//! Path management for nextcheck
//!
//! ## Path Resolution Order
//!
//! 1. `NEXTCHECK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/nextcheck` or `~/.config/nextcheck`
//! 3. Windows: `%APPDATA%\nextcheck`

use std::path::PathBuf;

use crate::error::NextCheckError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "NEXTCHECK_DATA_DIR";

/// Manages all paths used by nextcheck
#[derive(Debug, Clone)]
pub struct NextCheckPaths {
    base_dir: PathBuf,
}

impl NextCheckPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, NextCheckError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/nextcheck/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to income.json
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), NextCheckError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| NextCheckError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| NextCheckError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, NextCheckError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                NextCheckError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("nextcheck"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, NextCheckError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| NextCheckError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("nextcheck"))
}
