use serde::{Deserialize, Serialize};

/// Where a task currently lives.
///
/// An unassigned task sits in the storage pool and only has a position in
/// that pool. A placed task sits on a member's row and has a horizontal span
/// plus a lane (`row_index`) that keeps it from visually overlapping its
/// neighbours.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Unassigned {
        storage_order: usize,
    },
    Placed {
        member_id: String,
        /// Absolute pixel offset on the shared timeline.
        start_x: f64,
        row_index: usize,
    },
}

/// A single unit of work on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Bar width in pixels. Kept while the task sits in storage.
    pub width: f64,
    pub placement: Placement,
    pub background_color: Option<String>,
    pub url: Option<String>,
}

impl Task {
    /// Create a task in the storage pool at the given position.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        width: f64,
        storage_order: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width,
            placement: Placement::Unassigned { storage_order },
            background_color: None,
            url: None,
        }
    }

    pub fn member_id(&self) -> Option<&str> {
        match &self.placement {
            Placement::Placed { member_id, .. } => Some(member_id),
            Placement::Unassigned { .. } => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.placement, Placement::Placed { .. })
    }

    pub fn belongs_to(&self, member: &str) -> bool {
        self.member_id() == Some(member)
    }

    /// Horizontal offset; storage tasks report 0.
    pub fn start_x(&self) -> f64 {
        match self.placement {
            Placement::Placed { start_x, .. } => start_x,
            Placement::Unassigned { .. } => 0.0,
        }
    }

    /// Lane within the member row; storage tasks report 0.
    pub fn row_index(&self) -> usize {
        match self.placement {
            Placement::Placed { row_index, .. } => row_index,
            Placement::Unassigned { .. } => 0,
        }
    }

    pub fn storage_order(&self) -> Option<usize> {
        match self.placement {
            Placement::Unassigned { storage_order } => Some(storage_order),
            Placement::Placed { .. } => None,
        }
    }
}

/// Partial edit of a task. `None` leaves a field untouched; for the nullable
/// fields `Some(None)` clears them.
///
/// Setting `member_id` to `Some(None)` detaches the task into storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub member_id: Option<Option<String>>,
    pub start_x: Option<f64>,
    pub width: Option<f64>,
    pub background_color: Option<Option<String>>,
    pub url: Option<Option<String>>,
}

impl TaskUpdate {
    /// Whether the edit can change the task's horizontal placement.
    pub fn touches_geometry(&self) -> bool {
        self.start_x.is_some() || self.width.is_some() || self.member_id.is_some()
    }
}

/// On-disk shape of a task: a flat record with a nullable `memberId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    member_id: Option<String>,
    #[serde(default)]
    start_x: f64,
    width: f64,
    #[serde(default)]
    row_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_order: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let placement = match record.member_id {
            Some(member_id) => Placement::Placed {
                member_id,
                start_x: record.start_x,
                row_index: record.row_index,
            },
            None => Placement::Unassigned {
                storage_order: record.storage_order.unwrap_or(0),
            },
        };
        Self {
            id: record.id,
            title: record.title,
            width: record.width,
            placement,
            background_color: record.background_color,
            url: record.url,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (member_id, start_x, row_index, storage_order) = match task.placement {
            Placement::Placed {
                member_id,
                start_x,
                row_index,
            } => (Some(member_id), start_x, row_index, None),
            Placement::Unassigned { storage_order } => (None, 0.0, 0, Some(storage_order)),
        };
        Self {
            id: task.id,
            title: task.title,
            member_id,
            start_x,
            width: task.width,
            row_index,
            storage_order,
            background_color: task.background_color,
            url: task.url,
        }
    }
}
