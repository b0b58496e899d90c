//! Board defaults, persisted as JSON in the OS config directory.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::io::file::{app_file, AppDir, StorageError};

const DEFAULT_SPRINT_LENGTH_DAYS: i64 = 14;

/// Defaults applied when the board creates sprints, members and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardSettings {
    pub project_title: String,
    pub primary_color: String,
    pub sprint_color: String,
    /// Color of the second sprint on a fresh board.
    pub alternate_sprint_color: String,
    pub sprint_length_days: i64,
    /// One sprint column minus its padding.
    pub default_task_width: f64,
    pub sprint_name: String,
    pub member_name: String,
    pub task_name: String,
    pub copy_suffix: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            project_title: "Untitled Project".into(),
            primary_color: "#6750A4".into(),
            sprint_color: "#B5C4B1".into(),
            alternate_sprint_color: "#D9B5B0".into(),
            sprint_length_days: DEFAULT_SPRINT_LENGTH_DAYS,
            default_task_width: 171.5,
            sprint_name: "Sprint".into(),
            member_name: "Member".into(),
            task_name: "Task".into(),
            copy_suffix: "(Copy)".into(),
        }
    }
}

impl BoardSettings {
    /// Location of `settings.json`, falling back to the working directory on
    /// platforms without a config dir.
    pub fn default_path() -> PathBuf {
        app_file(AppDir::Config, "settings.json")
    }

    /// Sprint length as a duration. A day count too large to represent
    /// falls back to the default two weeks.
    pub fn sprint_length(&self) -> TimeDelta {
        TimeDelta::try_days(self.sprint_length_days).unwrap_or_else(|| {
            warn!(
                days = self.sprint_length_days,
                "sprint length out of range, using default"
            );
            TimeDelta::days(DEFAULT_SPRINT_LENGTH_DAYS)
        })
    }

    /// Load from the default location. Missing or unreadable settings fall
    /// back to defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        crate::io::file::write_json(self, path)
    }
}
