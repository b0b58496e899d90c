use tracing::{debug, trace};

use super::{move_order, open_slot, renumber, GanttBoard};
use crate::model::{Member, MemberUpdate, Placement};

impl GanttBoard {
    /// Add a member after the one at `after_order`, or at the end. Returns
    /// the new member's id.
    pub fn add_member(&mut self, after_order: Option<usize>) -> String {
        let order = open_slot(&mut self.members, after_order);
        let member = Member::new(
            self.ids.next_id(),
            format!("{} {}", self.settings.member_name, self.members.len() + 1),
            order,
        );
        let id = member.id.clone();
        debug!(id = %id, order, "member added");
        self.members.push(member);
        self.commit("add_member");
        id
    }

    pub fn update_member(&mut self, id: &str, updates: MemberUpdate) {
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            return self.skip("update_member", id);
        };
        updates.apply(member);
        self.commit("update_member");
    }

    /// Remove a member. Its tasks are not deleted: they move to the end of
    /// the storage pool in their current list order.
    pub fn delete_member(&mut self, id: &str) {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() == before {
            return self.skip("delete_member", id);
        }
        renumber(&mut self.members);
        self.selected_members.remove(id);

        let mut next = self.next_storage_order(None);
        let mut detached = 0;
        for task in self.tasks.iter_mut().filter(|t| t.belongs_to(id)) {
            task.placement = Placement::Unassigned {
                storage_order: next,
            };
            next += 1;
            detached += 1;
        }
        debug!(id, detached, "member deleted");
        self.commit("delete_member");
    }

    /// Move the member at row position `from` to position `to`. An
    /// out-of-range `from` is ignored; `to` is clamped to the last row.
    pub fn reorder_members(&mut self, from: usize, to: usize) {
        if !move_order(&mut self.members, from, to) {
            trace!(from, to, "member index out of range");
            return;
        }
        self.commit("reorder_members");
    }
}
