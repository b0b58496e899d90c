use crate::model::GanttSnapshot;

/// Receives the board state after every committed change.
///
/// Undo/redo lives with the implementor; the board only reports commits.
/// Any `FnMut(&GanttSnapshot)` closure is a recorder.
pub trait HistoryRecorder {
    fn record(&mut self, snapshot: &GanttSnapshot);

    /// Called when the board is replaced wholesale (load, reset), after
    /// which earlier snapshots no longer apply. The replacement board is
    /// recorded right after.
    fn clear(&mut self) {}
}

impl<F> HistoryRecorder for F
where
    F: FnMut(&GanttSnapshot),
{
    fn record(&mut self, snapshot: &GanttSnapshot) {
        self(snapshot)
    }
}
