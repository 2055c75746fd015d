//! Group snapshot: the full state of one expense group

use crate::types::expense::{ExpenseRecord, MemberName};

/// Members and expenses of one group, in insertion order
///
/// This is the immutable input handed to the settlement core and the unit
/// persisted by [`crate::io::snapshot`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub members: Vec<MemberName>,
    pub expenses: Vec<ExpenseRecord>,
}

impl Snapshot {
    pub fn new(members: Vec<MemberName>, expenses: Vec<ExpenseRecord>) -> Self {
        Snapshot { members, expenses }
    }
}
