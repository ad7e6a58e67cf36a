use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::goal::Goal;
use super::task::Task;

/// The complete persisted record set
///
/// The `next_*` counters only ever grow: removing an entry leaves them
/// untouched so an index is never handed out twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub next_goal_index: usize,
    #[serde(default)]
    pub next_task_index: usize,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Records {
    /// First assigned index that appears on more than one entry of a kind
    pub fn duplicate_index(&self) -> Option<(&'static str, usize)> {
        fn first_repeat(indices: impl Iterator<Item = usize>) -> Option<usize> {
            let mut seen = HashSet::new();
            indices.into_iter().find(|&i| !seen.insert(i))
        }
        first_repeat(self.goals.iter().map(|g| g.index))
            .map(|i| ("goal", i))
            .or_else(|| first_repeat(self.tasks.iter().map(|t| t.index)).map(|i| ("task", i)))
    }

    /// Raise the counters past every index already in use. Returns whether
    /// either counter moved.
    pub fn settle_counters(&mut self) -> bool {
        let goal_floor = self.goals.iter().map(|g| g.index + 1).max().unwrap_or(0);
        let task_floor = self.tasks.iter().map(|t| t.index + 1).max().unwrap_or(0);
        let moved = goal_floor > self.next_goal_index || task_floor > self.next_task_index;
        self.next_goal_index = self.next_goal_index.max(goal_floor);
        self.next_task_index = self.next_task_index.max(task_floor);
        moved
    }
}
