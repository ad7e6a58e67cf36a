mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Submodules reach each other's helpers through `use super::*;`
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from anywhere, an open form is dropped uncommitted
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigation => handle_navigate(app, key),
        Mode::FieldEntry => handle_field_entry(app, key),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Config, GoalType, Records};
    use crate::ops::{goal_ops, task_ops};
    use crate::tui::motion::Page;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_keys(app: &mut App, keys: &str) {
        for c in keys.chars() {
            let modifiers = if c.is_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            handle_key(app, KeyEvent::new(KeyCode::Char(c), modifiers));
        }
    }

    fn app() -> App {
        let mut records = Records::default();
        goal_ops::add_tally_goal(&mut records, "Read", 10);
        task_ops::add_task(&mut records, "Milk");
        App::new(Config::default(), records)
    }

    #[test]
    fn new_goal_through_form() {
        let mut app = app();
        type_keys(&mut app, "g+");
        assert_eq!(app.motions.page(), Page::NewGoal);
        let depth_before_form = app.motions.breadcrumb().depth() - 1;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::FieldEntry);
        type_keys(&mut app, "Alex");
        assert_eq!(app.form.as_ref().unwrap().fields[0].as_text(), "Alex");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.as_ref().unwrap().focus, 1);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigation);
        assert!(app.form.is_none());
        assert_eq!(app.motions.page(), Page::Goals);
        assert_eq!(app.motions.breadcrumb().depth(), depth_before_form);
        assert_eq!(app.records.goals.len(), 2);
        assert_eq!(app.records.goals[1].name, "Alex");
        assert_eq!(app.records.goals[1].goal_type, GoalType::Elements);
        assert!(app.dirty);
        assert_eq!(app.status.as_ref().unwrap().text, "added goal 1: Alex");
    }

    #[test]
    fn esc_cancels_form_without_commit() {
        let mut app = app();
        type_keys(&mut app, "t+");
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "Eggs");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigation);
        assert_eq!(app.motions.page(), Page::Tasks);
        assert_eq!(app.records.tasks.len(), 1);
        assert!(!app.dirty);
    }

    #[test]
    fn enter_on_page_without_form_does_nothing() {
        let mut app = app();
        type_keys(&mut app, "g0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigation);
        assert_eq!(app.motions.page(), Page::Goal);
    }

    #[test]
    fn progress_form_sets_tally() {
        let mut app = app();
        type_keys(&mut app, "g0p");
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "7");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.records.goals[0].tally.progress, 7);
        assert_eq!(app.motions.page(), Page::Goal);
    }

    #[test]
    fn element_page_toggles_on_enter() {
        let mut app = app();
        let index = goal_ops::add_checklist_goal(&mut app.records, "Trip");
        let goal = goal_ops::find_goal_mut(&mut app.records, index).unwrap();
        goal_ops::add_element(goal, "Tickets").unwrap();

        type_keys(&mut app, "g10");
        assert_eq!(app.motions.page(), Page::Element);
        press(&mut app, KeyCode::Enter);
        assert!(app.records.goals[1].elements[0].is_done);
        assert_eq!(app.mode, Mode::Navigation);
        assert_eq!(app.motions.page(), Page::Goal);
    }

    #[test]
    fn failed_commit_reports_and_exits() {
        let mut app = app();
        // "Read" is a tally goal, elements cannot be added to it
        type_keys(&mut app, "g0+");
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "Ch");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigation);
        assert_eq!(app.motions.page(), Page::Goal);
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "goal 0 is not of type elements");
        assert!(!app.dirty);
    }

    #[test]
    fn quit_keys() {
        let mut plain = app();
        type_keys(&mut plain, "q");
        assert!(plain.should_quit);

        let mut editing = app();
        type_keys(&mut editing, "t+");
        press(&mut editing, KeyCode::Enter);
        handle_key(
            &mut editing,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(editing.should_quit);
        assert_eq!(editing.records.tasks.len(), 1);
    }

    #[test]
    fn q_inside_a_text_field_is_typed() {
        let mut app = app();
        type_keys(&mut app, "t+");
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.form.as_ref().unwrap().fields[0].as_text(), "q");
    }

    #[test]
    fn backspace_and_esc_pop_in_navigation() {
        let mut app = app();
        type_keys(&mut app, "g0");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.motions.page(), Page::Goals);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.motions.page(), Page::Home);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.motions.breadcrumb().depth(), 1);
    }
}
