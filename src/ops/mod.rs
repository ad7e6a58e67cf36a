pub mod goal_ops;
pub mod task_ops;

use crate::model::GoalType;

/// Error type for record store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("no {kind} with index {index}")]
    NotFound { kind: &'static str, index: usize },
    #[error("goal {index} has no element at position {position}")]
    ElementNotFound { index: usize, position: usize },
    #[error("goal {index} is not of type {expected}")]
    WrongGoalType { index: usize, expected: GoalType },
}
