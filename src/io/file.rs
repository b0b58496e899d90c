use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::GanttSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid board data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum AppDir {
    Config,
    Data,
}

/// `name` inside the application's OS directory of the given kind, or in the
/// working directory on platforms without one.
pub(crate) fn app_file(dir: AppDir, name: &str) -> PathBuf {
    match directories::ProjectDirs::from("", "", "SprintGantt") {
        Some(proj_dirs) => match dir {
            AppDir::Config => proj_dirs.config_dir().join(name),
            AppDir::Data => proj_dirs.data_dir().join(name),
        },
        None => PathBuf::from(".").join(name),
    }
}

/// Where the board is persisted between sessions.
pub fn default_storage_path() -> PathBuf {
    app_file(AppDir::Data, "gantt-storage.json")
}

/// Save a board snapshot to a JSON file, creating parent directories.
pub fn save_snapshot(snapshot: &GanttSnapshot, path: &Path) -> Result<(), StorageError> {
    write_json(snapshot, path)
}

/// Load a board snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<GanttSnapshot, StorageError> {
    let json = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)
}
