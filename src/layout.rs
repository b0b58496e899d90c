//! Overlap detection and lane assignment for task bars within a member row.
//!
//! Placement is greedy and incremental: a single task is fitted into the
//! lowest lane that has no overlapping occupant, against whatever lanes its
//! neighbours currently hold. Lane usage is therefore not globally minimal
//! after a series of moves. [`pack_lanes`] performs a full repack and is only
//! used when explicitly requested.

use crate::model::{Placement, Task};

/// Result of fitting a span into a member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneResolution {
    /// Lane 0 already holds a task overlapping the span.
    pub has_overlap: bool,
    /// Lowest lane with no overlapping occupant.
    pub suggested_row_index: usize,
}

/// Half-open interval intersection of `[a_start, a_start + a_width)` and
/// `[b_start, b_start + b_width)`.
///
/// Touching endpoints do not overlap. A non-positive width is an empty
/// interval and overlaps nothing.
pub fn overlaps(a_start: f64, a_width: f64, b_start: f64, b_width: f64) -> bool {
    if !(a_width > 0.0) || !(b_width > 0.0) {
        return false;
    }
    a_start < b_start + b_width && a_start + a_width > b_start
}

/// Find the lane for a span of `width` at `start_x` on `member_id`'s row.
///
/// `exclude_task_id` is the task being placed; it is never compared with
/// itself. The scan is bounded by the number of peers on the row: `n` peers
/// can block at most `n` lanes.
pub fn resolve_lane(
    tasks: &[Task],
    member_id: &str,
    start_x: f64,
    width: f64,
    exclude_task_id: &str,
) -> LaneResolution {
    let peers: Vec<(f64, f64, usize)> = tasks
        .iter()
        .filter(|t| t.id != exclude_task_id)
        .filter_map(|t| match &t.placement {
            Placement::Placed {
                member_id: m,
                start_x,
                row_index,
            } if m == member_id => Some((*start_x, t.width, *row_index)),
            _ => None,
        })
        .collect();

    let blocked = |lane: usize| {
        peers
            .iter()
            .any(|&(s, w, row)| row == lane && overlaps(start_x, width, s, w))
    };

    let suggested_row_index = (0..=peers.len())
        .find(|&lane| !blocked(lane))
        .unwrap_or(peers.len());

    LaneResolution {
        has_overlap: blocked(0),
        suggested_row_index,
    }
}

/// Re-fit every task on `member_id`'s row, one after another in list order.
///
/// Each task is resolved against the row as already updated by the earlier
/// steps, so when this returns no two tasks on the row share a lane and
/// overlap. Tasks listed in `skip` keep their lane (they still block others).
/// Returns how many lanes changed.
pub fn relayout_member(tasks: &mut [Task], member_id: &str, skip: Option<&str>) -> usize {
    let mut changed = 0;
    for idx in 0..tasks.len() {
        let task = &tasks[idx];
        if !task.belongs_to(member_id) || skip == Some(task.id.as_str()) {
            continue;
        }
        let lane = resolve_lane(tasks, member_id, task.start_x(), task.width, &task.id)
            .suggested_row_index;
        if let Placement::Placed { row_index, .. } = &mut tasks[idx].placement {
            if *row_index != lane {
                *row_index = lane;
                changed += 1;
            }
        }
    }
    changed
}

/// Globally repack spans into the fewest lanes.
///
/// Spans are taken in order of start (ties by input position) and each goes
/// to the lowest lane whose last occupant ends at or before it starts. Empty
/// spans always land in lane 0. Returns one lane per input span.
pub fn pack_lanes(spans: &[(f64, f64)]) -> Vec<usize> {
    let mut by_start: Vec<usize> = (0..spans.len()).collect();
    by_start.sort_by(|&a, &b| spans[a].0.total_cmp(&spans[b].0).then(a.cmp(&b)));

    let mut lanes = vec![0; spans.len()];
    let mut lane_ends: Vec<f64> = Vec::new();
    for idx in by_start {
        let (start, width) = spans[idx];
        if !(width > 0.0) {
            continue;
        }
        let end = start + width;
        match lane_ends.iter().position(|&lane_end| lane_end <= start) {
            Some(lane) => {
                lane_ends[lane] = end;
                lanes[idx] = lane;
            }
            None => {
                lanes[idx] = lane_ends.len();
                lane_ends.push(end);
            }
        }
    }
    lanes
}
