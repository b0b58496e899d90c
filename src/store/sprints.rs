use tracing::debug;

use super::{open_slot, renumber, GanttBoard};
use crate::model::SprintUpdate;

impl GanttBoard {
    /// Add a sprint after the one at `after_order`, or at the end. Returns
    /// the new sprint's id.
    pub fn add_sprint(&mut self, after_order: Option<usize>) -> String {
        let order = open_slot(&mut self.sprints, after_order);
        let start = chrono::Local::now().date_naive();
        let color = self.settings.sprint_color.clone();
        let sprint = self.new_sprint(order, start, color);
        let id = sprint.id.clone();
        debug!(id = %id, order, "sprint added");
        self.sprints.push(sprint);
        self.commit("add_sprint");
        id
    }

    pub fn update_sprint(&mut self, id: &str, updates: SprintUpdate) {
        let Some(sprint) = self.sprints.iter_mut().find(|s| s.id == id) else {
            return self.skip("update_sprint", id);
        };
        updates.apply(sprint);
        self.commit("update_sprint");
    }

    /// Remove a sprint. Tasks are positioned independently of sprints and
    /// stay where they are.
    pub fn delete_sprint(&mut self, id: &str) {
        let before = self.sprints.len();
        self.sprints.retain(|s| s.id != id);
        if self.sprints.len() == before {
            return self.skip("delete_sprint", id);
        }
        renumber(&mut self.sprints);
        self.selected_sprints.remove(id);
        self.commit("delete_sprint");
    }
}
