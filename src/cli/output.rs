use serde::Serialize;

use crate::model::{Goal, GoalType, Records, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListingJson {
    pub tasks: Vec<TaskJson>,
    pub goals: Vec<GoalJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    pub name: String,
}

#[derive(Serialize)]
pub struct GoalJson {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub done: u32,
    pub total: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementJson>,
}

#[derive(Serialize)]
pub struct ElementJson {
    pub name: String,
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        index: task.index,
        name: task.name.clone(),
    }
}

pub fn goal_to_json(goal: &Goal) -> GoalJson {
    let (done, total) = goal.completion();
    GoalJson {
        index: goal.index,
        name: goal.name.clone(),
        goal_type: goal.goal_type,
        done,
        total,
        elements: goal
            .elements
            .iter()
            .map(|e| ElementJson {
                name: e.name.clone(),
                done: e.is_done,
            })
            .collect(),
    }
}

pub fn listing_to_json(records: &Records) -> ListingJson {
    ListingJson {
        tasks: records.tasks.iter().map(task_to_json).collect(),
        goals: records.goals.iter().map(goal_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn format_task_line(task: &Task) -> String {
    format!("  {}: {}", task.index, task.name)
}

/// One line per goal plus one per checklist element
pub fn format_goal(goal: &Goal) -> Vec<String> {
    let (done, total) = goal.completion();
    let mut lines = vec![format!(
        "  {}: {} [{} {}/{}]",
        goal.index, goal.name, goal.goal_type, done, total
    )];
    if goal.goal_type == GoalType::Elements {
        for (pos, element) in goal.elements.iter().enumerate() {
            let mark = if element.is_done { 'x' } else { ' ' };
            lines.push(format!("      {} [{}] {}", pos, mark, element.name));
        }
    }
    lines
}

/// Task and goal listings printed when no command words are given
pub fn format_listing(records: &Records) -> Vec<String> {
    let mut lines = vec!["Tasks".to_string()];
    if records.tasks.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(records.tasks.iter().map(format_task_line));

    lines.push("Goals".to_string());
    if records.goals.is_empty() {
        lines.push("  (none)".to_string());
    }
    for goal in &records.goals {
        lines.extend(format_goal(goal));
    }
    lines
}
