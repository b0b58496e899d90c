#![allow(dead_code)]

use sprint_gantt::layout::overlaps;
use sprint_gantt::{BoardSettings, GanttBoard, SequentialIds, Task};

pub fn board() -> GanttBoard {
    GanttBoard::with_id_generator(BoardSettings::default(), SequentialIds::new("e"))
}

pub fn first_member(board: &GanttBoard) -> String {
    board.members()[0].id.clone()
}

/// Add a task and drop it on a row.
pub fn place(board: &mut GanttBoard, member: &str, start_x: f64, width: f64) -> String {
    let id = board.add_task();
    board.move_task(&id, Some(member), start_x, Some(width));
    id
}

/// Every pair of tasks on the same row and lane is disjoint.
pub fn assert_no_overlap(tasks: &[Task]) {
    for (i, a) in tasks.iter().enumerate() {
        for b in &tasks[i + 1..] {
            let (Some(ma), Some(mb)) = (a.member_id(), b.member_id()) else {
                continue;
            };
            if ma == mb && a.row_index() == b.row_index() {
                assert!(
                    !overlaps(a.start_x(), a.width, b.start_x(), b.width),
                    "{} [{}, +{}) and {} [{}, +{}) share lane {} on {}",
                    a.id,
                    a.start_x(),
                    a.width,
                    b.id,
                    b.start_x(),
                    b.width,
                    a.row_index(),
                    ma
                );
            }
        }
    }
}

/// Sprint orders, member orders and storage orders are each `0..n`.
pub fn assert_dense_orders(board: &GanttBoard) {
    let sprints: Vec<usize> = board.sprints().iter().map(|s| s.order).collect();
    assert_eq!(sprints, (0..sprints.len()).collect::<Vec<_>>());

    let members: Vec<usize> = board.members().iter().map(|m| m.order).collect();
    assert_eq!(members, (0..members.len()).collect::<Vec<_>>());

    let storage: Vec<usize> = board
        .storage_tasks()
        .iter()
        .filter_map(|t| t.storage_order())
        .collect();
    assert_eq!(storage, (0..storage.len()).collect::<Vec<_>>());
}
