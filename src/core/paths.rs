// src/core/paths.rs

use crate::constants::{
    OPS_DIR, PACKAGE_MANIFEST_FILENAME, PROJECT_CONFIG_FILENAME, USER_CONFIG_DIRNAME,
};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Any of these at a directory's top level marks it as a project root.
const ROOT_MARKERS: &[&str] = &[PROJECT_CONFIG_FILENAME, OPS_DIR, PACKAGE_MANIFEST_FILENAME];

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not determine the current directory")]
    CurrentDir(#[source] std::io::Error),
    #[error("Project root '{path}' is not accessible")]
    RootNotAccessible {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Project root '{0}' is not a directory.")]
    RootNotADirectory(String),
}

/// Resolves the project root.
///
/// An explicit root must exist and is canonicalized. Otherwise the nearest
/// ancestor of the current directory carrying a root marker wins, falling back
/// to the current directory itself.
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit {
        let root = dunce::canonicalize(path).map_err(|e| PathError::RootNotAccessible {
            path: path.display().to_string(),
            source: e,
        })?;
        if !root.is_dir() {
            return Err(PathError::RootNotADirectory(root.display().to_string()));
        }
        return Ok(root);
    }

    let cwd = env::current_dir().map_err(PathError::CurrentDir)?;
    Ok(find_project_root(&cwd))
}

/// Walks up from `start` to the first directory carrying a root marker.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .unwrap_or(start)
        .to_path_buf()
}

/// `<user config dir>/ops/ops.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIRNAME).join(PROJECT_CONFIG_FILENAME))
}
