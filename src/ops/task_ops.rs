use crate::model::{Records, Task};

use super::RecordError;

/// Append a task and return its freshly assigned index.
pub fn add_task(records: &mut Records, name: &str) -> usize {
    let index = records.next_task_index;
    records.next_task_index += 1;
    records.tasks.push(Task::new(name, index));
    index
}

/// Remove a task by its assigned index. Other indices and the counter are
/// left alone.
pub fn remove_task(records: &mut Records, index: usize) -> Result<Task, RecordError> {
    let pos = records
        .tasks
        .iter()
        .position(|t| t.index == index)
        .ok_or(RecordError::NotFound {
            kind: "task",
            index,
        })?;
    Ok(records.tasks.remove(pos))
}
