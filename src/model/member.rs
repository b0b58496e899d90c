use serde::{Deserialize, Serialize};

use super::Ordered;

/// Owner of a horizontal row on the timeline, e.g. a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Top-to-bottom row position.
    pub order: usize,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

impl Ordered for Member {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
    pub name: Option<String>,
}

impl MemberUpdate {
    pub(crate) fn apply(self, member: &mut Member) {
        if let Some(name) = self.name {
            member.name = name;
        }
    }
}
