//! Board state and lane layout for a sprint-based Gantt editor.
//!
//! [`GanttBoard`] owns sprints, members and tasks and exposes every state
//! transition a front end needs. After each change that can move a task bar
//! it re-runs the [`layout`] engine so that no two overlapping bars on the
//! same member row share a lane. Rendering is left to the caller, which reads
//! `(start_x, width, row_index)` per placed task.

pub mod config;
pub mod error;
pub mod history;
pub mod ids;
pub mod io;
pub mod layout;
pub mod model;
pub mod store;

pub use config::BoardSettings;
pub use error::{Error, Result};
pub use history::HistoryRecorder;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use layout::{overlaps, resolve_lane, LaneResolution};
pub use model::{
    GanttSnapshot, Member, MemberUpdate, Placement, SelectionMap, Sprint, SprintUpdate, Task,
    TaskUpdate,
};
pub use store::GanttBoard;
