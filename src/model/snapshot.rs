use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Member, Sprint, Task};

/// Sparse id -> selected map. An id with no entry counts as selected.
pub type SelectionMap = BTreeMap<String, bool>;

/// The plain, serializable state of a board: what gets persisted, exported
/// and handed to history recorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSnapshot {
    pub sprints: Vec<Sprint>,
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub project_title: String,
    pub primary_color: String,
    #[serde(default)]
    pub selected_sprints: SelectionMap,
    #[serde(default)]
    pub selected_members: SelectionMap,
}

/// Absence means selected.
pub fn is_selected(map: &SelectionMap, id: &str) -> bool {
    map.get(id).copied().unwrap_or(true)
}
