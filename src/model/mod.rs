pub mod member;
pub mod snapshot;
pub mod sprint;
pub mod task;

pub use member::{Member, MemberUpdate};
pub use snapshot::{GanttSnapshot, SelectionMap};
pub use sprint::{Sprint, SprintUpdate};
pub use task::{Placement, Task, TaskUpdate};

/// Entities that occupy a dense, zero-based `order` slot.
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}
