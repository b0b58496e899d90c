//! The board state container and its transitions.
//!
//! Every operation addressed by id is best-effort: an unknown id leaves the
//! board untouched. Each successful operation ends in exactly one commit,
//! which is what history recorders observe.

mod members;
mod sprints;
mod tasks;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::BoardSettings;
use crate::history::HistoryRecorder;
use crate::ids::{IdGenerator, UuidIds};
use crate::model::snapshot::is_selected;
use crate::model::{GanttSnapshot, Member, Ordered, SelectionMap, Sprint, Task};

/// Mutable source of truth for sprints, members, tasks and export selection.
pub struct GanttBoard {
    sprints: Vec<Sprint>,
    members: Vec<Member>,
    tasks: Vec<Task>,
    project_title: String,
    primary_color: String,
    selected_sprints: SelectionMap,
    selected_members: SelectionMap,
    settings: BoardSettings,
    ids: Box<dyn IdGenerator>,
    history: Option<Box<dyn HistoryRecorder>>,
}

impl Default for GanttBoard {
    fn default() -> Self {
        Self::new(BoardSettings::default())
    }
}

impl GanttBoard {
    /// A fresh board: two back-to-back sprints starting today and one member.
    pub fn new(settings: BoardSettings) -> Self {
        Self::with_id_generator(settings, UuidIds)
    }

    pub fn with_id_generator(settings: BoardSettings, ids: impl IdGenerator + 'static) -> Self {
        let mut board = Self {
            sprints: Vec::new(),
            members: Vec::new(),
            tasks: Vec::new(),
            project_title: settings.project_title.clone(),
            primary_color: settings.primary_color.clone(),
            selected_sprints: SelectionMap::new(),
            selected_members: SelectionMap::new(),
            settings,
            ids: Box::new(ids),
            history: None,
        };
        board.populate_defaults(2);
        board
    }

    /// Attach a recorder that receives a snapshot after every commit.
    pub fn with_history(mut self, recorder: impl HistoryRecorder + 'static) -> Self {
        self.history = Some(Box::new(recorder));
        self
    }

    // ── Getters ─────────────────────────────────────────────────

    /// Sprints in column order.
    pub fn sprints(&self) -> Vec<&Sprint> {
        sorted_by_order(&self.sprints)
    }

    /// Members in row order.
    pub fn members(&self) -> Vec<&Member> {
        sorted_by_order(&self.members)
    }

    pub fn sprint(&self, id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Unassigned tasks in storage order.
    pub fn storage_tasks(&self) -> Vec<&Task> {
        let mut pool: Vec<&Task> = self.tasks.iter().filter(|t| !t.is_placed()).collect();
        pool.sort_by_key(|t| t.storage_order());
        pool
    }

    /// Tasks placed on a member's row.
    pub fn member_tasks(&self, member_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.belongs_to(member_id)).collect()
    }

    /// Number of lanes a member's row needs: highest `row_index` plus one.
    pub fn lane_count(&self, member_id: &str) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.belongs_to(member_id))
            .map(|t| t.row_index() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn project_title(&self) -> &str {
        &self.project_title
    }

    pub fn primary_color(&self) -> &str {
        &self.primary_color
    }

    pub fn selected_sprint_map(&self) -> &SelectionMap {
        &self.selected_sprints
    }

    pub fn selected_member_map(&self) -> &SelectionMap {
        &self.selected_members
    }

    // ── Project ─────────────────────────────────────────────────

    pub fn set_project_title(&mut self, title: impl Into<String>) {
        self.project_title = title.into();
        self.commit("set_project_title");
    }

    pub fn set_primary_color(&mut self, color: impl Into<String>) {
        self.primary_color = color.into();
        self.commit("set_primary_color");
    }

    // ── Export selection ────────────────────────────────────────

    pub fn toggle_sprint_selection(&mut self, id: &str, selected: bool) {
        self.selected_sprints.insert(id.to_string(), selected);
        self.commit("toggle_sprint_selection");
    }

    pub fn toggle_member_selection(&mut self, id: &str, selected: bool) {
        self.selected_members.insert(id.to_string(), selected);
        self.commit("toggle_member_selection");
    }

    pub fn is_sprint_selected(&self, id: &str) -> bool {
        is_selected(&self.selected_sprints, id)
    }

    pub fn is_member_selected(&self, id: &str) -> bool {
        is_selected(&self.selected_members, id)
    }

    /// Sprints included in an image export, in column order.
    pub fn selected_sprints(&self) -> Vec<&Sprint> {
        self.sprints()
            .into_iter()
            .filter(|s| self.is_sprint_selected(&s.id))
            .collect()
    }

    /// Members included in an image export, in row order.
    pub fn selected_members(&self) -> Vec<&Member> {
        self.members()
            .into_iter()
            .filter(|m| self.is_member_selected(&m.id))
            .collect()
    }

    // ── Data management ─────────────────────────────────────────

    /// Replace the whole board with `snapshot`.
    ///
    /// Sprint, member and storage orders are renumbered densely, keeping
    /// their relative order. Recorded history is cleared and restarts from
    /// the loaded board.
    pub fn load(&mut self, snapshot: GanttSnapshot) {
        let GanttSnapshot {
            sprints,
            members,
            tasks,
            project_title,
            primary_color,
            selected_sprints,
            selected_members,
        } = snapshot;
        self.sprints = sprints;
        self.members = members;
        self.tasks = tasks;
        self.project_title = project_title;
        self.primary_color = primary_color;
        self.selected_sprints = selected_sprints;
        self.selected_members = selected_members;

        renumber(&mut self.sprints);
        renumber(&mut self.members);
        self.renumber_storage();

        debug!(
            sprints = self.sprints.len(),
            members = self.members.len(),
            tasks = self.tasks.len(),
            "board loaded"
        );
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        self.commit("load");
    }

    /// The persisted shape of the current board.
    pub fn export(&self) -> GanttSnapshot {
        GanttSnapshot {
            sprints: self.sprints.clone(),
            members: self.members.clone(),
            tasks: self.tasks.clone(),
            project_title: self.project_title.clone(),
            primary_color: self.primary_color.clone(),
            selected_sprints: self.selected_sprints.clone(),
            selected_members: self.selected_members.clone(),
        }
    }

    /// Clear everything back to one sprint, one member and no tasks.
    pub fn reset(&mut self) {
        self.sprints.clear();
        self.members.clear();
        self.tasks.clear();
        self.selected_sprints.clear();
        self.selected_members.clear();
        self.project_title = self.settings.project_title.clone();
        self.primary_color = self.settings.primary_color.clone();
        self.populate_defaults(1);

        debug!("board reset");
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        self.commit("reset");
    }

    // ── Internals ───────────────────────────────────────────────

    fn populate_defaults(&mut self, sprint_count: usize) {
        let today = chrono::Local::now().date_naive();
        let length = self.settings.sprint_length();
        for i in 0..sprint_count {
            let start = length
                .checked_mul(i as i32)
                .and_then(|offset| today.checked_add_signed(offset))
                .unwrap_or(today);
            let color = if i % 2 == 0 {
                self.settings.sprint_color.clone()
            } else {
                self.settings.alternate_sprint_color.clone()
            };
            let sprint = self.new_sprint(i, start, color);
            self.sprints.push(sprint);
        }
        let member = Member::new(
            self.ids.next_id(),
            format!("{} 1", self.settings.member_name),
            0,
        );
        self.members.push(member);
    }

    fn new_sprint(&mut self, order: usize, start: NaiveDate, color: String) -> Sprint {
        Sprint::new(
            self.ids.next_id(),
            format!("{} {}", self.settings.sprint_name, self.sprints.len() + 1),
            start,
            start
                .checked_add_signed(self.settings.sprint_length())
                .unwrap_or(start),
            color,
            order,
        )
    }

    /// Renumber the storage pool to `0..n`, keeping relative order.
    fn renumber_storage(&mut self) {
        let mut pool: Vec<(usize, usize)> = self
            .tasks
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| t.storage_order().map(|order| (order, idx)))
            .collect();
        pool.sort_unstable();
        for (position, (_, idx)) in pool.into_iter().enumerate() {
            self.tasks[idx].placement = crate::model::Placement::Unassigned {
                storage_order: position,
            };
        }
    }

    /// Storage position just past the current pool, ignoring `except`.
    fn next_storage_order(&self, except: Option<&str>) -> usize {
        self.tasks
            .iter()
            .filter(|t| except != Some(t.id.as_str()))
            .filter_map(Task::storage_order)
            .max()
            .map_or(0, |max| max + 1)
    }

    fn skip(&self, op: &'static str, id: &str) {
        trace!(op, id, "unknown id, nothing to do");
    }

    fn commit(&mut self, op: &'static str) {
        debug!(
            op,
            tasks = self.tasks.len(),
            placed = self.tasks.iter().filter(|t| t.is_placed()).count(),
            "commit"
        );
        if self.history.is_some() {
            let snapshot = self.export();
            if let Some(history) = self.history.as_mut() {
                history.record(&snapshot);
            }
        }
    }
}

fn sorted_by_order<T: Ordered>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.order());
    sorted
}

/// Renumber `order` to `0..n`, keeping relative order (ties by position).
fn renumber<T: Ordered>(items: &mut [T]) {
    let mut by_order: Vec<(usize, usize)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.order(), idx))
        .collect();
    by_order.sort_unstable();
    for (position, (_, idx)) in by_order.into_iter().enumerate() {
        items[idx].set_order(position);
    }
}

/// Open a slot after `after_order` (or at the end) and return its order.
fn open_slot<T: Ordered>(items: &mut [T], after_order: Option<usize>) -> usize {
    let slot = after_order.map_or(items.len(), |after| (after + 1).min(items.len()));
    for item in items.iter_mut() {
        if item.order() >= slot {
            item.set_order(item.order() + 1);
        }
    }
    slot
}

/// Move the item at sorted position `from` to position `to` and renumber.
/// Returns false when `from` is out of range.
fn move_order<T: Ordered>(items: &mut [T], from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let mut sequence: Vec<usize> = (0..items.len()).collect();
    sequence.sort_by_key(|&idx| (items[idx].order(), idx));
    let moved = sequence.remove(from);
    sequence.insert(to.min(sequence.len()), moved);
    for (position, idx) in sequence.into_iter().enumerate() {
        items[idx].set_order(position);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn members(orders: &[usize]) -> Vec<Member> {
        orders
            .iter()
            .enumerate()
            .map(|(i, &order)| Member::new(format!("m{i}"), format!("M{i}"), order))
            .collect()
    }

    fn orders(items: &[Member]) -> Vec<usize> {
        items.iter().map(|m| m.order).collect()
    }

    #[test]
    fn renumber_closes_gaps_and_breaks_ties_by_position() {
        let mut items = members(&[4, 0, 4, 9]);
        renumber(&mut items);
        assert_eq!(orders(&items), vec![1, 0, 2, 3]);
    }

    #[test]
    fn open_slot_shifts_later_items() {
        let mut items = members(&[0, 1, 2]);
        assert_eq!(open_slot(&mut items, Some(0)), 1);
        assert_eq!(orders(&items), vec![0, 2, 3]);
    }

    #[test]
    fn open_slot_past_the_end_appends() {
        let mut items = members(&[0, 1]);
        assert_eq!(open_slot(&mut items, Some(10)), 2);
        assert_eq!(open_slot(&mut items, None), 2);
        assert_eq!(orders(&items), vec![0, 1]);
    }

    #[test]
    fn move_order_reinserts_and_clamps() {
        let mut items = members(&[0, 1, 2]);
        assert!(move_order(&mut items, 0, 99));
        assert_eq!(orders(&items), vec![2, 0, 1]);
        assert!(!move_order(&mut items, 3, 0));
    }

    #[test]
    fn fresh_board_has_two_sprints_and_one_member() {
        let board = GanttBoard::default();
        let sprints = board.sprints();
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[0].end_date, sprints[1].start_date);
        assert_eq!(sprints[1].color, "#D9B5B0");
        assert_eq!(board.members().len(), 1);
        assert!(board.tasks().is_empty());
        assert_eq!(board.primary_color(), "#6750A4");
    }

    #[test]
    fn out_of_range_sprint_length_falls_back_to_default() {
        let settings: BoardSettings =
            serde_json::from_str(r#"{ "sprintLengthDays": 1000000000000000 }"#).unwrap();
        let mut board =
            GanttBoard::with_id_generator(settings, crate::ids::SequentialIds::new("e"));
        let sprints = board.sprints();
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[0].end_date - sprints[0].start_date, Duration::days(14));
        assert_eq!(sprints[0].end_date, sprints[1].start_date);

        board.add_sprint(None);
        board.reset();
        assert_eq!(board.sprints().len(), 1);
    }

    #[test]
    fn sprint_length_past_the_calendar_end_does_not_panic() {
        // representable as a duration, but no date lies that far ahead
        let settings = BoardSettings {
            sprint_length_days: 100_000_000_000,
            ..Default::default()
        };
        let board = GanttBoard::with_id_generator(settings, crate::ids::SequentialIds::new("e"));
        let sprints = board.sprints();
        assert_eq!(sprints[0].end_date, sprints[0].start_date);
        assert_eq!(sprints[1].start_date, sprints[0].start_date);
    }
}
