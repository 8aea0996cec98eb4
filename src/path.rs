use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Absolute form of the scan target, defaulting to the current directory.
/// The path is not required to exist.
pub fn resolve_scan_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    match explicit {
        Some(path) => Ok(std::path::absolute(path)?),
        None => Ok(std::env::current_dir()?),
    }
}

/// Default project name: the final component of the scan path.
pub fn default_project_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
