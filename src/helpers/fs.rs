//! File System Utilities
//!
//! Configuration and data directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "dfc", "dfc-table").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/dfc-table/` or `$XDG_CONFIG_HOME/dfc-table/`
/// - **macOS**: `~/Library/Application Support/com.dfc.dfc-table/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\dfc\dfc-table\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory (log files)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/dfc-table/`
/// - **macOS**: `~/Library/Application Support/com.dfc.dfc-table/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\dfc\dfc-table\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Scratch directory under the system temp dir
pub fn get_or_create_temp_dir() -> Result<PathBuf> {
    ensure_dir(&std::env::temp_dir().join("dfc-table"))
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}
