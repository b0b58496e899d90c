use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Ordered;

/// A labelled time band drawn as a column across the timeline.
///
/// Sprints are purely informational: tasks are positioned by absolute pixel
/// offset and never belong to a sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub title: String,
    /// Serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Hex color string, e.g. `#B5C4B1`.
    pub color: String,
    /// Left-to-right column position.
    pub order: usize,
}

impl Sprint {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        color: impl Into<String>,
        order: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            end_date,
            color: color.into(),
            order,
        }
    }
}

impl Ordered for Sprint {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Partial edit of a sprint. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SprintUpdate {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}

impl SprintUpdate {
    pub(crate) fn apply(self, sprint: &mut Sprint) {
        if let Some(title) = self.title {
            sprint.title = title;
        }
        if let Some(start) = self.start_date {
            sprint.start_date = start;
        }
        if let Some(end) = self.end_date {
            sprint.end_date = end;
        }
        if let Some(color) = self.color {
            sprint.color = color;
        }
    }
}
