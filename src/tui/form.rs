//! Focused-field editing for data-entry pages.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::model::{Goal, Records};
use crate::ops::{RecordError, goal_ops, task_ops};

use super::motion::{NEW_GOAL_MAX, Page, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Digits only, appended as `value * 10 + digit`, never above `max`.
    Int { value: u32, max: u32 },
    /// Alphabetic characters only.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub value: FieldValue,
}

impl InputField {
    pub fn text(name: &'static str) -> Self {
        InputField {
            name,
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn int(name: &'static str, max: u32) -> Self {
        InputField {
            name,
            value: FieldValue::Int { value: 0, max },
        }
    }

    /// Append one typed character. Returns false if the field refused it.
    pub fn input(&mut self, c: char) -> bool {
        match &mut self.value {
            FieldValue::Int { value, max } => {
                let Some(digit) = c.to_digit(10) else {
                    return false;
                };
                match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                    Some(next) if next <= *max => {
                        *value = next;
                        true
                    }
                    _ => false,
                }
            }
            FieldValue::Text(text) => {
                if c.is_alphabetic() {
                    text.push(c);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn reset(&mut self) {
        match &mut self.value {
            FieldValue::Int { value, .. } => *value = 0,
            FieldValue::Text(text) => text.clear(),
        }
    }

    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) => text,
            FieldValue::Int { .. } => "",
        }
    }

    pub fn as_int(&self) -> u32 {
        match self.value {
            FieldValue::Int { value, .. } => value,
            FieldValue::Text(_) => 0,
        }
    }

    pub fn display(&self) -> String {
        match &self.value {
            FieldValue::Int { value, .. } => value.to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

/// Confirm action of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewGoal,
    NewTask,
    Progress,
    NewElement,
    ToggleElement,
}

impl FormKind {
    /// The form a page owns, if any
    pub fn for_page(page: Page) -> Option<FormKind> {
        match page {
            Page::NewGoal => Some(FormKind::NewGoal),
            Page::NewTask => Some(FormKind::NewTask),
            Page::Progress => Some(FormKind::Progress),
            Page::NewElement => Some(FormKind::NewElement),
            Page::Element => Some(FormKind::ToggleElement),
            _ => None,
        }
    }
}

/// What a keystroke did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Edited,
    Moved,
    Ignored,
    Cancel,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<InputField>,
    pub focus: usize,
}

impl Form {
    /// Build the empty form for `kind`. Bounds that depend on records (the
    /// progress maximum) are read from the current selection.
    pub fn new(kind: FormKind, selection: Selection, records: &Records) -> Self {
        let fields = match kind {
            FormKind::NewGoal => vec![
                InputField::text("name"),
                InputField::int("max", NEW_GOAL_MAX),
            ],
            FormKind::NewTask | FormKind::NewElement => vec![InputField::text("name")],
            FormKind::Progress => {
                let max = selection.goal(records).map_or(0, |g| g.tally.max);
                vec![InputField::int("progress", max)]
            }
            FormKind::ToggleElement => Vec::new(),
        };
        Form {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn focused(&self) -> Option<&InputField> {
        self.fields.get(self.focus)
    }

    fn on_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    fn move_down(&mut self) {
        if !self.on_last_field() {
            self.focus += 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => FormEvent::Cancel,
            KeyCode::Up if self.focus == 0 => FormEvent::Cancel,
            KeyCode::Up => {
                self.focus -= 1;
                FormEvent::Moved
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_down();
                FormEvent::Moved
            }
            KeyCode::Enter if self.on_last_field() => FormEvent::Submit,
            KeyCode::Enter => {
                self.move_down();
                FormEvent::Moved
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match self.fields.get_mut(self.focus) {
                    Some(field) => {
                        if field.input(c) {
                            FormEvent::Edited
                        } else {
                            FormEvent::Ignored
                        }
                    }
                    None => FormEvent::Ignored,
                }
            }
            _ => FormEvent::Ignored,
        }
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.focus = 0;
    }

    /// Run the confirm action against `records` and reset the fields.
    /// Returns a line for the status row.
    pub fn commit(
        &mut self,
        records: &mut Records,
        selection: Selection,
    ) -> Result<String, RecordError> {
        let result = self.apply(records, selection);
        debug!(kind = ?self.kind, ok = result.is_ok(), "form committed");
        self.reset();
        result
    }

    fn text(&self, position: usize) -> &str {
        self.fields.get(position).map_or("", InputField::as_text)
    }

    fn int(&self, position: usize) -> u32 {
        self.fields.get(position).map_or(0, InputField::as_int)
    }

    fn apply(&self, records: &mut Records, selection: Selection) -> Result<String, RecordError> {
        match self.kind {
            FormKind::NewGoal => {
                let name = goal_ops::name_or_default(records, self.text(0));
                let max = self.int(1);
                let index = if max == 0 {
                    goal_ops::add_checklist_goal(records, &name)
                } else {
                    goal_ops::add_tally_goal(records, &name, max)
                };
                Ok(format!("added goal {}: {}", index, name))
            }
            FormKind::NewTask => {
                let name = self.text(0);
                let index = task_ops::add_task(records, name);
                Ok(format!("added task {}: {}", index, name))
            }
            FormKind::Progress => {
                let goal = selected_goal(records, selection)?;
                let tally = goal_ops::tally_of(goal)?;
                let progress = self.int(0).min(tally.max);
                goal_ops::set_progress(goal, progress)?;
                Ok(format!("{}: {}/{}", goal.name, progress, tally.max))
            }
            FormKind::NewElement => {
                let goal = selected_goal(records, selection)?;
                let name = self.text(0);
                goal_ops::add_element(goal, name)?;
                Ok(format!("{}: added {}", goal.name, name))
            }
            FormKind::ToggleElement => {
                let goal = selected_goal(records, selection)?;
                let position = selection.element.unwrap_or_default();
                let done = goal_ops::toggle_element(goal, position)?;
                let state = if done { "done" } else { "open" };
                Ok(format!("{}: {}", goal.elements[position].name, state))
            }
        }
    }
}

fn selected_goal(records: &mut Records, selection: Selection) -> Result<&mut Goal, RecordError> {
    let position = selection.goal.unwrap_or_default();
    records
        .goals
        .get_mut(position)
        .ok_or(RecordError::NotFound {
            kind: "goal",
            index: position,
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::GoalType;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn new_goal_form() -> Form {
        Form::new(FormKind::NewGoal, Selection::default(), &Records::default())
    }

    #[test]
    fn int_field_appends_digits_within_bound() {
        let mut field = InputField::int("max", 99);
        assert!(field.input('4'));
        assert!(field.input('2'));
        assert_eq!(field.as_int(), 42);
        assert!(!field.input('1'));
        assert!(!field.input('x'));
        assert_eq!(field.as_int(), 42);
    }

    #[test]
    fn int_field_with_zero_bound_only_takes_zero() {
        let mut field = InputField::int("progress", 0);
        assert!(!field.input('1'));
        assert!(field.input('0'));
        assert_eq!(field.display(), "0");
    }

    #[test]
    fn text_field_takes_letters_only() {
        let mut field = InputField::text("name");
        for c in "Al3x !".chars() {
            field.input(c);
        }
        assert_eq!(field.as_text(), "Alx");
    }

    #[test]
    fn focus_is_clamped_without_wraparound() {
        let mut form = new_goal_form();
        assert_eq!(form.handle_key(key(KeyCode::Down)), FormEvent::Moved);
        assert_eq!(form.handle_key(key(KeyCode::Tab)), FormEvent::Moved);
        assert_eq!(form.focus, 1);
        assert_eq!(form.handle_key(key(KeyCode::Up)), FormEvent::Moved);
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn up_on_first_field_or_esc_cancels() {
        let mut form = new_goal_form();
        assert_eq!(form.handle_key(key(KeyCode::Up)), FormEvent::Cancel);
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancel);
    }

    #[test]
    fn enter_moves_down_then_submits() {
        let mut form = new_goal_form();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Moved);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
    }

    #[test]
    fn keys_go_to_focused_field() {
        let mut form = new_goal_form();
        type_str(&mut form, "Run5");
        form.handle_key(key(KeyCode::Down));
        type_str(&mut form, "12a");
        assert_eq!(form.fields[0].as_text(), "Run");
        assert_eq!(form.fields[1].as_int(), 12);
    }

    #[test]
    fn typed_keys_report_whether_the_field_took_them() {
        let mut form = new_goal_form();
        assert_eq!(form.handle_key(key(KeyCode::Char('R'))), FormEvent::Edited);
        assert_eq!(form.handle_key(key(KeyCode::Char('7'))), FormEvent::Ignored);
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.handle_key(key(KeyCode::Char('7'))), FormEvent::Edited);
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormEvent::Ignored);
        assert_eq!(form.fields[0].as_text(), "R");
        assert_eq!(form.fields[1].as_int(), 7);
    }

    #[test]
    fn new_goal_with_zero_max_is_checklist() {
        let mut records = Records::default();
        let mut form = new_goal_form();
        type_str(&mut form, "Trip");
        let message = form.commit(&mut records, Selection::default()).unwrap();
        assert_eq!(message, "added goal 0: Trip");
        assert_eq!(records.goals[0].goal_type, GoalType::Elements);
        assert_eq!(form.fields[0].as_text(), "");
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn new_goal_with_max_is_tally() {
        let mut records = Records::default();
        let mut form = new_goal_form();
        form.handle_key(key(KeyCode::Down));
        type_str(&mut form, "30");
        form.commit(&mut records, Selection::default()).unwrap();
        assert_eq!(records.goals[0].name, "Goal 0");
        assert_eq!(records.goals[0].goal_type, GoalType::Tally);
        assert_eq!(records.goals[0].tally.max, 30);
    }

    #[test]
    fn progress_bound_comes_from_selected_goal() {
        let mut records = Records::default();
        goal_ops::add_tally_goal(&mut records, "Read", 12);
        let selection = Selection {
            goal: Some(0),
            ..Selection::default()
        };
        let mut form = Form::new(FormKind::Progress, selection, &records);
        type_str(&mut form, "13");
        assert_eq!(form.fields[0].as_int(), 1);
        form.handle_key(key(KeyCode::Char('2')));
        assert_eq!(form.commit(&mut records, selection).unwrap(), "Read: 12/12");
        assert_eq!(records.goals[0].tally.progress, 12);
    }

    #[test]
    fn commit_against_vanished_goal_fails() {
        let mut records = Records::default();
        let selection = Selection {
            goal: Some(3),
            ..Selection::default()
        };
        let mut form = Form::new(FormKind::NewElement, selection, &records);
        type_str(&mut form, "Hotel");
        assert_eq!(
            form.commit(&mut records, selection),
            Err(RecordError::NotFound {
                kind: "goal",
                index: 3
            })
        );
        assert_eq!(form.fields[0].as_text(), "");
    }

    #[test]
    fn toggle_element_has_no_fields() {
        let mut records = Records::default();
        let index = goal_ops::add_checklist_goal(&mut records, "Trip");
        let goal = goal_ops::find_goal_mut(&mut records, index).unwrap();
        goal_ops::add_element(goal, "Tickets").unwrap();
        let selection = Selection {
            goal: Some(0),
            element: Some(0),
            task: None,
        };
        let mut form = Form::new(FormKind::ToggleElement, selection, &records);
        assert!(form.fields.is_empty());
        assert_eq!(form.commit(&mut records, selection).unwrap(), "Tickets: done");
        assert!(records.goals[0].elements[0].is_done);
    }
}
