//! Property tests: random operation sequences must never leave two
//! overlapping bars in the same lane, and every order sequence stays dense.

mod common;

use proptest::prelude::*;
use sprint_gantt::layout::{overlaps, pack_lanes, resolve_lane};
use sprint_gantt::{GanttBoard, Placement, Task, TaskUpdate};

use common::{assert_dense_orders, assert_no_overlap, board};

const MAX_X: f64 = 1200.0;
const MAX_WIDTH: f64 = 400.0;

#[derive(Debug, Clone)]
enum Op {
    AddTask,
    AddMember(Option<usize>),
    AddSprint(Option<usize>),
    Move { task: usize, member: Option<usize>, x: f64, width: Option<f64> },
    Resize { task: usize, width: f64 },
    Shift { task: usize, x: f64 },
    Reassign { task: usize, member: Option<usize> },
    Delete(usize),
    Duplicate(usize),
    DeleteMember(usize),
    DeleteSprint(usize),
    ReorderMembers(usize, usize),
    ReorderStorage(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    let idx = 0usize..8;
    let x = -20.0..MAX_X;
    let width = -10.0..MAX_WIDTH;
    prop_oneof![
        3 => Just(Op::AddTask),
        2 => (any::<bool>(), proptest::option::of(idx.clone())).prop_map(|(sprint, after)| {
            if sprint { Op::AddSprint(after) } else { Op::AddMember(after) }
        }),
        6 => (idx.clone(), proptest::option::of(idx.clone()), x.clone(), proptest::option::of(width.clone()))
            .prop_map(|(task, member, x, width)| Op::Move { task, member, x, width }),
        3 => (idx.clone(), width).prop_map(|(task, width)| Op::Resize { task, width }),
        3 => (idx.clone(), x).prop_map(|(task, x)| Op::Shift { task, x }),
        2 => (idx.clone(), proptest::option::of(idx.clone()))
            .prop_map(|(task, member)| Op::Reassign { task, member }),
        3 => (any::<bool>(), idx.clone()).prop_map(|(copy, task)| {
            if copy { Op::Duplicate(task) } else { Op::Delete(task) }
        }),
        1 => idx.clone().prop_map(Op::DeleteMember),
        1 => idx.clone().prop_map(Op::DeleteSprint),
        2 => (any::<bool>(), idx.clone(), idx).prop_map(|(storage, from, to)| {
            if storage { Op::ReorderStorage(from, to) } else { Op::ReorderMembers(from, to) }
        }),
    ]
}

fn task_id(board: &GanttBoard, n: usize) -> Option<String> {
    let tasks = board.tasks();
    (!tasks.is_empty()).then(|| tasks[n % tasks.len()].id.clone())
}

fn member_id(board: &GanttBoard, n: usize) -> Option<String> {
    let members = board.members();
    (!members.is_empty()).then(|| members[n % members.len()].id.clone())
}

fn apply(board: &mut GanttBoard, op: Op) {
    match op {
        Op::AddTask => {
            board.add_task();
        }
        Op::AddMember(after) => {
            board.add_member(after);
        }
        Op::AddSprint(after) => {
            board.add_sprint(after);
        }
        Op::Move { task, member, x, width } => {
            let Some(task) = task_id(board, task) else { return };
            let member = member.and_then(|m| member_id(board, m));
            board.move_task(&task, member.as_deref(), x, width);
        }
        Op::Resize { task, width } => {
            let Some(task) = task_id(board, task) else { return };
            board.update_task(&task, TaskUpdate { width: Some(width), ..Default::default() });
        }
        Op::Shift { task, x } => {
            let Some(task) = task_id(board, task) else { return };
            board.update_task(&task, TaskUpdate { start_x: Some(x), ..Default::default() });
        }
        Op::Reassign { task, member } => {
            let Some(task) = task_id(board, task) else { return };
            let member = member.and_then(|m| member_id(board, m));
            board.update_task(&task, TaskUpdate { member_id: Some(member), ..Default::default() });
        }
        Op::Delete(task) => {
            if let Some(task) = task_id(board, task) {
                board.delete_task(&task);
            }
        }
        Op::Duplicate(task) => {
            if let Some(task) = task_id(board, task) {
                board.duplicate_task(&task);
            }
        }
        Op::DeleteMember(member) => {
            if let Some(member) = member_id(board, member) {
                board.delete_member(&member);
            }
        }
        Op::DeleteSprint(n) => {
            let sprints = board.sprints();
            if !sprints.is_empty() {
                let id = sprints[n % sprints.len()].id.clone();
                board.delete_sprint(&id);
            }
        }
        Op::ReorderMembers(from, to) => board.reorder_members(from, to),
        Op::ReorderStorage(from, to) => board.reorder_storage_tasks(from, to),
    }
}

fn placed(id: usize, start_x: f64, width: f64, row_index: usize) -> Task {
    let mut task = Task::new(format!("t{id}"), "t", width, 0);
    task.placement = Placement::Placed {
        member_id: "m".into(),
        start_x,
        row_index,
    };
    task
}

proptest! {
    #[test]
    fn operations_preserve_board_invariants(ops in proptest::collection::vec(op(), 1..60)) {
        let mut board = board();
        for op in ops {
            apply(&mut board, op);
            assert_no_overlap(board.tasks());
            assert_dense_orders(&board);
            let members: Vec<String> = board.members().iter().map(|m| m.id.clone()).collect();
            for task in board.tasks() {
                if let Some(m) = task.member_id() {
                    prop_assert!(members.iter().any(|id| id == m), "task on deleted member {m}");
                }
            }
        }
    }

    #[test]
    fn resolved_lane_is_the_lowest_free_one(
        row in proptest::collection::vec((0.0..MAX_X, 1.0..MAX_WIDTH, 0usize..4), 0..12),
        start in 0.0..MAX_X,
        width in 1.0..MAX_WIDTH,
    ) {
        let tasks: Vec<Task> = row
            .iter()
            .enumerate()
            .map(|(i, &(s, w, lane))| placed(i, s, w, lane))
            .collect();
        let lane = resolve_lane(&tasks, "m", start, width, "candidate").suggested_row_index;

        let blocked = |l: usize| {
            tasks.iter().any(|t| t.row_index() == l && overlaps(start, width, t.start_x(), t.width))
        };
        prop_assert!(!blocked(lane));
        for lower in 0..lane {
            prop_assert!(blocked(lower));
        }
    }

    #[test]
    fn packed_lanes_never_collide(
        spans in proptest::collection::vec((0.0..MAX_X, -5.0..MAX_WIDTH), 0..20),
    ) {
        let lanes = pack_lanes(&spans);
        prop_assert_eq!(lanes.len(), spans.len());
        for i in 0..spans.len() {
            for j in i + 1..spans.len() {
                if lanes[i] == lanes[j] {
                    prop_assert!(!overlaps(spans[i].0, spans[i].1, spans[j].0, spans[j].1));
                }
            }
        }
    }
}
