use tracing::{debug, trace};

use super::GanttBoard;
use crate::layout::{pack_lanes, relayout_member, resolve_lane};
use crate::model::{Placement, Task, TaskUpdate};

impl GanttBoard {
    /// Create a task at the end of the storage pool. Returns its id.
    pub fn add_task(&mut self) -> String {
        let task = Task::new(
            self.ids.next_id(),
            format!("{} {}", self.settings.task_name, self.tasks.len() + 1),
            self.settings.default_task_width,
            self.next_storage_order(None),
        );
        let id = task.id.clone();
        self.tasks.push(task);
        self.commit("add_task");
        id
    }

    /// Merge `updates` into a task.
    ///
    /// Any change to member, start or width re-fits the task's lane, then
    /// re-fits every other task on the row it came from.
    pub fn update_task(&mut self, id: &str, updates: TaskUpdate) {
        let Some(idx) = self.task_index(id) else {
            return self.skip("update_task", id);
        };
        if let Some(Some(member)) = &updates.member_id {
            if self.member(member).is_none() {
                return self.skip("update_task", member);
            }
        }

        let original_member = self.tasks[idx].member_id().map(str::to_owned);
        let relayout = updates.touches_geometry();
        let TaskUpdate {
            title,
            member_id,
            start_x,
            width,
            background_color,
            url,
        } = updates;

        let mut task = self.tasks[idx].clone();
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(color) = background_color {
            task.background_color = color;
        }
        if let Some(url) = url {
            task.url = url;
        }
        if let Some(width) = width {
            task.width = width;
        }
        match member_id {
            Some(None) => {
                if task.is_placed() {
                    task.placement = Placement::Unassigned {
                        storage_order: self.next_storage_order(Some(id)),
                    };
                }
            }
            Some(Some(member)) => {
                task.placement = Placement::Placed {
                    member_id: member,
                    start_x: start_x.unwrap_or(task.start_x()),
                    row_index: task.row_index(),
                };
            }
            None => {
                // storage has no horizontal position
                if let (Some(x), Placement::Placed { start_x, .. }) = (start_x, &mut task.placement)
                {
                    *start_x = x;
                }
            }
        }

        if relayout {
            if let Placement::Placed {
                member_id,
                start_x,
                row_index,
            } = &mut task.placement
            {
                *row_index =
                    resolve_lane(&self.tasks, member_id.as_str(), *start_x, task.width, id)
                        .suggested_row_index;
            }
        }
        self.tasks[idx] = task;

        if relayout {
            if let Some(member) = &original_member {
                relayout_member(&mut self.tasks, member, Some(id));
            }
            self.renumber_storage();
        }
        self.commit("update_task");
    }

    /// Remove a task and re-fit the row it was on.
    pub fn delete_task(&mut self, id: &str) {
        let Some(idx) = self.task_index(id) else {
            return self.skip("delete_task", id);
        };
        let removed = self.tasks.remove(idx);
        match removed.member_id() {
            Some(member) => {
                let changed = relayout_member(&mut self.tasks, member, None);
                debug!(id, member, changed, "placed task deleted");
            }
            None => self.renumber_storage(),
        }
        self.commit("delete_task");
    }

    /// Copy a task into the end of the storage pool. Returns the copy's id.
    pub fn duplicate_task(&mut self, id: &str) -> Option<String> {
        let Some(source) = self.task(id).cloned() else {
            self.skip("duplicate_task", id);
            return None;
        };
        let copy = Task {
            id: self.ids.next_id(),
            title: format!("{} {}", source.title, self.settings.copy_suffix),
            placement: Placement::Unassigned {
                storage_order: self.next_storage_order(None),
            },
            ..source
        };
        let copy_id = copy.id.clone();
        self.tasks.push(copy);
        self.commit("duplicate_task");
        Some(copy_id)
    }

    /// Drop a task onto a member row, or into storage when `member_id` is
    /// `None`.
    ///
    /// On a row, `width` overrides the current width and the task takes the
    /// lowest free lane at `start_x`. In storage, `start_x` and `width` are
    /// ignored and the task goes to the end of the pool. Leaving a row
    /// re-fits the tasks still on it.
    pub fn move_task(
        &mut self,
        id: &str,
        member_id: Option<&str>,
        start_x: f64,
        width: Option<f64>,
    ) {
        let Some(idx) = self.task_index(id) else {
            return self.skip("move_task", id);
        };
        let old_member = self.tasks[idx].member_id().map(str::to_owned);

        match member_id {
            None => {
                self.tasks[idx].placement = Placement::Unassigned {
                    storage_order: self.next_storage_order(Some(id)),
                };
                if let Some(old) = &old_member {
                    relayout_member(&mut self.tasks, old, None);
                }
            }
            Some(member) => {
                if self.member(member).is_none() {
                    return self.skip("move_task", member);
                }
                let width = width.unwrap_or(self.tasks[idx].width);
                let lane = resolve_lane(&self.tasks, member, start_x, width, id);
                trace!(id, member, lane = lane.suggested_row_index, "lane resolved");

                let task = &mut self.tasks[idx];
                task.width = width;
                task.placement = Placement::Placed {
                    member_id: member.to_string(),
                    start_x,
                    row_index: lane.suggested_row_index,
                };
                if let Some(old) = old_member.as_deref().filter(|old| *old != member) {
                    relayout_member(&mut self.tasks, old, None);
                }
            }
        }
        self.renumber_storage();
        self.commit("move_task");
    }

    /// Move the storage task at pool position `from` to position `to`. An
    /// out-of-range `from` is ignored; `to` is clamped to the end.
    pub fn reorder_storage_tasks(&mut self, from: usize, to: usize) {
        let mut pool: Vec<usize> = (0..self.tasks.len())
            .filter(|&idx| !self.tasks[idx].is_placed())
            .collect();
        if from >= pool.len() {
            trace!(from, to, "storage index out of range");
            return;
        }
        pool.sort_by_key(|&idx| (self.tasks[idx].storage_order(), idx));
        let moved = pool.remove(from);
        pool.insert(to.min(pool.len()), moved);
        for (position, idx) in pool.into_iter().enumerate() {
            self.tasks[idx].placement = Placement::Unassigned {
                storage_order: position,
            };
        }
        self.commit("reorder_storage_tasks");
    }

    /// Repack one member row into the fewest lanes.
    ///
    /// Never run implicitly: the incremental placement done by the other
    /// operations keeps lanes stable, this may move many bars at once.
    pub fn compact_lanes(&mut self, member_id: &str) {
        if self.member(member_id).is_none() {
            return self.skip("compact_lanes", member_id);
        }
        let row: Vec<usize> = (0..self.tasks.len())
            .filter(|&idx| self.tasks[idx].belongs_to(member_id))
            .collect();
        let spans: Vec<(f64, f64)> = row
            .iter()
            .map(|&idx| (self.tasks[idx].start_x(), self.tasks[idx].width))
            .collect();
        for (idx, lane) in row.into_iter().zip(pack_lanes(&spans)) {
            if let Placement::Placed { row_index, .. } = &mut self.tasks[idx].placement {
                *row_index = lane;
            }
        }
        debug!(member_id, lanes = self.lane_count(member_id), "lanes compacted");
        self.commit("compact_lanes");
    }

    fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}
