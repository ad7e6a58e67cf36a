use serde::{Deserialize, Serialize};

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task title text
    pub name: String,
    /// Assigned creation index (never reused)
    pub index: usize,
}

impl Task {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Task {
            name: name.into(),
            index,
        }
    }
}
