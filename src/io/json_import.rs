use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::config::BoardSettings;
use crate::io::file::StorageError;
use crate::model::GanttSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid board format: {0}")]
    InvalidFormat(String),
}

const REQUIRED_ARRAYS: [&str; 3] = ["sprints", "members", "tasks"];

/// Parse a user-supplied board document.
///
/// The document must be an object with `sprints`, `members` and `tasks`
/// arrays. A missing or empty `projectTitle` / `primaryColor` is filled from
/// `settings`; missing selection maps mean everything is selected. Extra
/// keys such as `version` or `exportedAt` are ignored.
pub fn import_json(json: &str, settings: &BoardSettings) -> Result<GanttSnapshot, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(mut doc) = value else {
        warn!("rejecting import: top level is not an object");
        return Err(ImportError::InvalidFormat(
            "expected a JSON object at the top level".into(),
        ));
    };

    for key in REQUIRED_ARRAYS {
        if !doc.get(key).is_some_and(Value::is_array) {
            warn!(field = key, "rejecting import: missing array");
            return Err(ImportError::InvalidFormat(format!(
                "missing `{key}` array"
            )));
        }
    }

    fill_string(&mut doc, "projectTitle", &settings.project_title);
    fill_string(&mut doc, "primaryColor", &settings.primary_color);
    for key in ["selectedSprints", "selectedMembers"] {
        if !doc.get(key).is_some_and(Value::is_object) {
            doc.insert(key.into(), Value::Object(Map::new()));
        }
    }

    Ok(serde_json::from_value(Value::Object(doc))?)
}

/// Read a board document from `path` and parse it with [`import_json`].
pub fn import_file(path: &Path, settings: &BoardSettings) -> crate::Result<GanttSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(import_json(&json, settings)?)
}

fn fill_string(doc: &mut Map<String, Value>, key: &str, fallback: &str) {
    let present = doc
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if !present {
        doc.insert(key.into(), Value::String(fallback.into()));
    }
}
