use serde::{Deserialize, Serialize};

/// How progress on a goal is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// A bounded counter (`progress` out of `max`)
    #[default]
    Tally,
    /// A checklist of named sub-items
    Elements,
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalType::Tally => write!(f, "tally"),
            GoalType::Elements => write!(f, "elements"),
        }
    }
}

/// Counter state for tally goals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub max: u32,
    pub progress: u32,
}

/// A checklist item on an elements goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub is_done: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            is_done: false,
        }
    }
}

/// A goal with either tally or checklist progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    /// Assigned creation index (never reused)
    pub index: usize,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default)]
    pub tally: Tally,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Goal {
    /// Create a tally goal counting up to `max`
    pub fn tally(name: impl Into<String>, index: usize, max: u32) -> Self {
        Goal {
            name: name.into(),
            index,
            goal_type: GoalType::Tally,
            tally: Tally { max, progress: 0 },
            elements: Vec::new(),
        }
    }

    /// Create an empty checklist goal
    pub fn checklist(name: impl Into<String>, index: usize) -> Self {
        Goal {
            name: name.into(),
            index,
            goal_type: GoalType::Elements,
            tally: Tally::default(),
            elements: Vec::new(),
        }
    }

    /// `(done, total)` regardless of goal type
    pub fn completion(&self) -> (u32, u32) {
        match self.goal_type {
            GoalType::Tally => (self.tally.progress, self.tally.max),
            GoalType::Elements => (
                self.elements.iter().filter(|e| e.is_done).count() as u32,
                self.elements.len() as u32,
            ),
        }
    }

    pub fn is_complete(&self) -> bool {
        let (done, total) = self.completion();
        total > 0 && done >= total
    }
}
