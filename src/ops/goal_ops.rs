use crate::model::{Element, Goal, GoalType, Records, Tally};

use super::RecordError;

fn next_goal_index(records: &mut Records) -> usize {
    let index = records.next_goal_index;
    records.next_goal_index += 1;
    index
}

/// `name`, or "Goal N" (N being the index the next goal will get) when blank
pub fn name_or_default(records: &Records, name: &str) -> String {
    if name.is_empty() {
        format!("Goal {}", records.next_goal_index)
    } else {
        name.to_string()
    }
}

/// Append a tally goal and return its assigned index.
pub fn add_tally_goal(records: &mut Records, name: &str, max: u32) -> usize {
    let index = next_goal_index(records);
    records.goals.push(Goal::tally(name, index, max));
    index
}

/// Append an empty checklist goal and return its assigned index.
pub fn add_checklist_goal(records: &mut Records, name: &str) -> usize {
    let index = next_goal_index(records);
    records.goals.push(Goal::checklist(name, index));
    index
}

/// Find a goal by its assigned index.
pub fn find_goal_mut(records: &mut Records, index: usize) -> Result<&mut Goal, RecordError> {
    records
        .goals
        .iter_mut()
        .find(|g| g.index == index)
        .ok_or(RecordError::NotFound {
            kind: "goal",
            index,
        })
}

/// Remove a goal by its assigned index.
pub fn remove_goal(records: &mut Records, index: usize) -> Result<Goal, RecordError> {
    let pos = records
        .goals
        .iter()
        .position(|g| g.index == index)
        .ok_or(RecordError::NotFound {
            kind: "goal",
            index,
        })?;
    Ok(records.goals.remove(pos))
}

fn expect_type(goal: &Goal, expected: GoalType) -> Result<(), RecordError> {
    if goal.goal_type == expected {
        Ok(())
    } else {
        Err(RecordError::WrongGoalType {
            index: goal.index,
            expected,
        })
    }
}

/// Current tally counter of a tally goal
pub fn tally_of(goal: &Goal) -> Result<Tally, RecordError> {
    expect_type(goal, GoalType::Tally)?;
    Ok(goal.tally)
}

/// Set the tally maximum. Progress beyond the new maximum is clamped.
pub fn set_max(goal: &mut Goal, max: u32) -> Result<(), RecordError> {
    expect_type(goal, GoalType::Tally)?;
    goal.tally.max = max;
    goal.tally.progress = goal.tally.progress.min(max);
    Ok(())
}

/// Set tally progress. Callers validate `progress <= max` first.
pub fn set_progress(goal: &mut Goal, progress: u32) -> Result<(), RecordError> {
    expect_type(goal, GoalType::Tally)?;
    goal.tally.progress = progress;
    Ok(())
}

/// Append an unchecked element to a checklist goal.
pub fn add_element(goal: &mut Goal, name: &str) -> Result<(), RecordError> {
    expect_type(goal, GoalType::Elements)?;
    goal.elements.push(Element::new(name));
    Ok(())
}

/// Flip the done flag of the element at `position`, returning the new value.
pub fn toggle_element(goal: &mut Goal, position: usize) -> Result<bool, RecordError> {
    expect_type(goal, GoalType::Elements)?;
    let index = goal.index;
    let element = goal
        .elements
        .get_mut(position)
        .ok_or(RecordError::ElementNotFound { index, position })?;
    element.is_done = !element.is_done;
    Ok(element.is_done)
}
